pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod page;
pub mod services;

pub use models::{Deck, Flashcard};
