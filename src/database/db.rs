//! Local document storage for decks
//!
//! Mirrors the hosted layout on SQLite: each row is one document of the collection
//! `users/{user_id}/{collection}`. Rows come back in insertion order, which plays the role of
//! the provider's order.

use crate::models::{Deck, Flashcard};
use rusqlite::{Connection, Result, params};

/// Opens (or creates) the database file and ensures the schema exists
pub fn init_database(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates the documents table if missing
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            collection TEXT NOT NULL,
            doc_id TEXT NOT NULL,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            UNIQUE(user_id, collection, doc_id)
        )",
        (),
    )?;
    Ok(())
}

/// Adds a card document to a user's deck collection
///
/// Returns `false` if a document with the same id already exists in that collection.
pub fn add_flashcard(
    user_id: &str,
    deck_id: &str,
    card: &Flashcard,
    conn: &Connection,
) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO documents (user_id, collection, doc_id, front, back)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, deck_id, card.id, card.front, card.back],
    )?;
    Ok(inserted == 1)
}

/// Lists all card documents of `users/{user_id}/{deck_id}`
pub fn get_flashcards_for_deck(user_id: &str, deck_id: &str, conn: &Connection) -> Result<Deck> {
    let mut stmt = conn.prepare(
        "SELECT doc_id, front, back FROM documents
         WHERE user_id = ?1 AND collection = ?2
         ORDER BY seq ASC",
    )?;

    let flashcards = stmt
        .query_map(params![user_id, deck_id], |row| {
            Ok(Flashcard {
                id: row.get(0)?,
                front: row.get(1)?,
                back: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<Flashcard>>>()?;

    Ok(Deck::new(deck_id, flashcards))
}

/// Lists the deck collections a user owns
pub fn get_deck_ids(user_id: &str, conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT collection FROM documents WHERE user_id = ?1
         GROUP BY collection ORDER BY MIN(seq)",
    )?;
    let decks = stmt
        .query_map(params![user_id], |row| row.get(0))?
        .collect::<Result<Vec<String>>>()?;
    Ok(decks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_cards_come_back_in_insertion_order() {
        let conn = memory_db();
        add_flashcard("u1", "deck1", &Flashcard::new("b", "Q2", "A2"), &conn).unwrap();
        add_flashcard("u1", "deck1", &Flashcard::new("a", "Q1", "A1"), &conn).unwrap();

        let deck = get_flashcards_for_deck("u1", "deck1", &conn).unwrap();
        assert_eq!(deck.id, "deck1");
        assert_eq!(
            deck.flashcards,
            vec![Flashcard::new("b", "Q2", "A2"), Flashcard::new("a", "Q1", "A1")]
        );
    }

    #[test]
    fn test_duplicate_id_is_ignored() {
        let conn = memory_db();
        assert!(add_flashcard("u1", "deck1", &Flashcard::new("a", "Q1", "A1"), &conn).unwrap());
        assert!(!add_flashcard("u1", "deck1", &Flashcard::new("a", "Other", "Other"), &conn).unwrap());

        let deck = get_flashcards_for_deck("u1", "deck1", &conn).unwrap();
        assert_eq!(deck.flashcards, vec![Flashcard::new("a", "Q1", "A1")]);
    }

    #[test]
    fn test_collections_are_isolated() {
        let conn = memory_db();
        add_flashcard("u1", "deck1", &Flashcard::new("a", "Q1", "A1"), &conn).unwrap();
        add_flashcard("u1", "deck2", &Flashcard::new("a", "X", "Y"), &conn).unwrap();
        add_flashcard("u2", "deck1", &Flashcard::new("z", "Z1", "Z2"), &conn).unwrap();

        assert_eq!(get_flashcards_for_deck("u1", "deck1", &conn).unwrap().len(), 1);
        assert_eq!(get_flashcards_for_deck("u1", "deck2", &conn).unwrap().flashcards[0].front, "X");
        assert_eq!(get_flashcards_for_deck("u2", "deck1", &conn).unwrap().flashcards[0].id, "z");
        assert!(get_flashcards_for_deck("u3", "deck1", &conn).unwrap().is_empty());
        assert_eq!(get_deck_ids("u1", &conn).unwrap(), vec!["deck1", "deck2"]);
    }
}
