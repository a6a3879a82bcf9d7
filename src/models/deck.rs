//! Deck is the ordered set of flashcards stored in one of a user's collections
use super::Flashcard;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub flashcards: Vec<Flashcard>,
}

impl Deck {
    pub fn new(id: impl Into<String>, flashcards: Vec<Flashcard>) -> Self {
        Self {
            id: id.into(),
            flashcards,
        }
    }

    pub fn len(&self) -> usize {
        self.flashcards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
    }

    /// Document path of a deck collection: `users/{user_id}/{deck_id}`.
    pub fn collection_path(user_id: &str, deck_id: &str) -> String {
        format!("users/{}/{}", user_id, deck_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path() {
        assert_eq!(Deck::collection_path("user_1", "deck1"), "users/user_1/deck1");
    }

    #[test]
    fn test_keeps_provider_order() {
        let deck = Deck::new(
            "deck1",
            vec![Flashcard::new("b", "Q2", "A2"), Flashcard::new("a", "Q1", "A1")],
        );

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.flashcards[0].id, "b");
    }
}
