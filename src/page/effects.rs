//! Runs effects against the injected services and turns their outcome into events.

use super::state::{Effect, Event};
use crate::error::PaymentError;
use crate::services::Services;

/// Performs one effect. The returned event should be fed back into `reduce`.
pub async fn perform(effect: Effect, services: &Services) -> Event {
    match effect {
        Effect::FetchDeck {
            request,
            user_id,
            deck_id,
        } => {
            let result = services.decks.list_flashcards(&user_id, &deck_id).await;
            Event::DeckLoaded { request, result }
        }
        Effect::Tokenize(card) => {
            let result = match &services.payments {
                Some(tokenizer) => tokenizer.create_payment_method(&card).await,
                None => Err(PaymentError::Invalid(
                    "Payments are not available right now.".to_string(),
                )),
            };
            Event::PaymentTokenized(result)
        }
    }
}
