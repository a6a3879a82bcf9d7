pub mod deck;
pub mod flashcard;
pub mod flip_state;
pub mod identity;
pub mod payment;

pub use deck::Deck;
pub use flashcard::Flashcard;
pub use flip_state::FlipState;
pub use identity::Identity;
pub use payment::{CardInput, PaymentMethod, ValidatedCard};
