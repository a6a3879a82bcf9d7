//! Page state and its transition function.
//!
//! `reduce` is pure: it takes the current state and one event and returns the next state plus
//! the effects the shell must run. Effect results come back as events.

use super::Route;
use crate::error::{DeckError, PaymentError};
use crate::models::{CardInput, Deck, FlipState, Identity, PaymentMethod};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeckStatus {
    /// No deck selected, or nobody signed in.
    #[default]
    Empty,
    Loading,
    Loaded(Deck),
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentState {
    Idle { last_error: Option<String> },
    Submitting,
    Succeeded { payment_method: PaymentMethod },
}

impl Default for PaymentState {
    fn default() -> Self {
        PaymentState::Idle { last_error: None }
    }
}

impl PaymentState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PaymentState::Submitting)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageState {
    pub identity: Identity,
    pub route: Route,
    pub deck: DeckStatus,
    /// Id of the most recent deck fetch. Responses carrying any other id are stale.
    pub request: u64,
    pub flips: FlipState,
    pub payment: PaymentState,
    /// Whether a payment tokenizer is available at all.
    pub tokenizer_ready: bool,
}

impl PageState {
    pub fn new(tokenizer_ready: bool) -> Self {
        Self {
            tokenizer_ready,
            ..Default::default()
        }
    }
}

#[derive(Debug)]
pub enum Event {
    IdentityChanged(Identity),
    Navigated(Route),
    DeckLoaded {
        request: u64,
        result: Result<Deck, DeckError>,
    },
    DeckRetryRequested,
    CardClicked(String),
    PaymentSubmitted(CardInput),
    PaymentTokenized(Result<PaymentMethod, PaymentError>),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    FetchDeck {
        request: u64,
        user_id: String,
        deck_id: String,
    },
    Tokenize(CardInput),
}

pub fn reduce(mut state: PageState, event: Event) -> (PageState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        Event::IdentityChanged(identity) => {
            if state.identity != identity {
                state.identity = identity;
                effects.extend(start_fetch(&mut state));
            }
        }
        Event::Navigated(route) => {
            if state.route != route {
                state.route = route;
                effects.extend(start_fetch(&mut state));
            }
        }
        Event::DeckRetryRequested => {
            if matches!(state.deck, DeckStatus::Failed(_)) {
                effects.extend(start_fetch(&mut state));
            }
        }
        Event::DeckLoaded { request, result } => {
            if request != state.request || state.deck != DeckStatus::Loading {
                tracing::debug!(request, current = state.request, "Dropping stale deck response");
            } else {
                state.deck = match result {
                    Ok(deck) => {
                        tracing::info!(deck_id = %deck.id, count = deck.len(), "Deck loaded");
                        DeckStatus::Loaded(deck)
                    }
                    Err(e) => {
                        tracing::error!(request, error = %e, "Deck fetch failed");
                        DeckStatus::Failed(e.to_string())
                    }
                };
            }
        }
        Event::CardClicked(id) => {
            state.flips.toggle(&id);
        }
        Event::PaymentSubmitted(card) => {
            if state.tokenizer_ready && matches!(state.payment, PaymentState::Idle { .. }) {
                state.payment = PaymentState::Submitting;
                effects.push(Effect::Tokenize(card));
            }
        }
        Event::PaymentTokenized(result) => {
            if state.payment.is_loading() {
                state.payment = match result {
                    Ok(payment_method) => PaymentState::Succeeded { payment_method },
                    Err(e) => {
                        tracing::warn!(error = %e, "Tokenization failed");
                        PaymentState::Idle {
                            last_error: Some(e.to_string()),
                        }
                    }
                };
            }
        }
    }

    (state, effects)
}

/// Re-evaluates the fetch precondition after identity or route changed.
fn start_fetch(state: &mut PageState) -> Option<Effect> {
    state.flips.clear();

    let user_id = state.identity.active_user().map(str::to_string);
    let deck_id = state.route.deck_id.clone();

    match (user_id, deck_id) {
        (Some(user_id), Some(deck_id)) => {
            state.request += 1;
            state.deck = DeckStatus::Loading;
            tracing::debug!(request = state.request, %user_id, %deck_id, "Fetching deck");
            Some(Effect::FetchDeck {
                request: state.request,
                user_id,
                deck_id,
            })
        }
        _ => {
            state.deck = DeckStatus::Empty;
            None
        }
    }
}
