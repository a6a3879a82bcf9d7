//! Deck source over the local SQLite document store.

use super::DeckSource;
use crate::database::db;
use crate::error::DeckError;
use crate::models::Deck;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LocalDeckSource {
    conn: Arc<Mutex<Connection>>,
}

impl LocalDeckSource {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn load(&self, user_id: &str, deck_id: &str) -> Result<Deck, DeckError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| DeckError::StorageUnavailable("connection lock poisoned".to_string()))?;
        Ok(db::get_flashcards_for_deck(user_id, deck_id, &conn)?)
    }
}

#[async_trait]
impl DeckSource for LocalDeckSource {
    async fn list_flashcards(&self, user_id: &str, deck_id: &str) -> Result<Deck, DeckError> {
        self.load(user_id, deck_id)
    }
}
