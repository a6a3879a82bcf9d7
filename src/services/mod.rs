//! External collaborators of the page, injected as trait objects.
//!
//! - `IdentityProvider`: read-only session snapshot
//! - `DeckSource`: lists the documents of one deck collection
//! - `PaymentTokenizer`: exchanges card details for a payment-method reference

pub mod firestore;
pub mod identity;
pub mod local;
pub mod stripe;
#[cfg(test)]
mod test_server;

use crate::error::{DeckError, PaymentError};
use crate::models::{CardInput, Deck, Identity, PaymentMethod};
use async_trait::async_trait;
use std::sync::Arc;

pub use firestore::FirestoreDeckSource;
pub use identity::SessionIdentity;
pub use local::LocalDeckSource;
pub use stripe::StripeTokenizer;

pub trait IdentityProvider: Send + Sync {
    fn current(&self) -> Identity;
}

#[async_trait]
pub trait DeckSource: Send + Sync {
    /// Lists every card in `users/{user_id}/{deck_id}`, in the store's order.
    async fn list_flashcards(&self, user_id: &str, deck_id: &str) -> Result<Deck, DeckError>;
}

#[async_trait]
pub trait PaymentTokenizer: Send + Sync {
    async fn create_payment_method(&self, card: &CardInput) -> Result<PaymentMethod, PaymentError>;
}

/// Everything the page talks to outside itself.
#[derive(Clone)]
pub struct Services {
    pub identity: Arc<dyn IdentityProvider>,
    pub decks: Arc<dyn DeckSource>,
    /// `None` when no payment processor is configured.
    pub payments: Option<Arc<dyn PaymentTokenizer>>,
}
