//! Application configuration loaded from environment variables (and `.env` when present).

use crate::error::ConfigError;
use std::env;

/// Where decks are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// SQLite file on this machine.
    Local { db_path: String },
    /// Hosted document database over its REST API.
    Firestore {
        project_id: String,
        base_url: String,
        id_token: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    /// Signed-in user. `None` means the session is signed out.
    pub user_id: Option<String>,
    /// Publishable key for card tokenization. `None` disables the payment button.
    pub stripe_publishable_key: Option<String>,
    pub stripe_base_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            backend: Backend::Local {
                db_path: ":memory:".to_string(),
            },
            user_id: Some("test_user".to_string()),
            stripe_publishable_key: None,
            stripe_base_url: "https://api.stripe.com".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match get("FLASHCARDS_BACKEND").as_deref() {
            None | Some("local") => Backend::Local {
                db_path: get("FLASHCARDS_DB_PATH").unwrap_or_else(|| "db.sqlite3".to_string()),
            },
            Some("firestore") => Backend::Firestore {
                project_id: get("FIREBASE_PROJECT_ID")
                    .ok_or(ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
                base_url: get("FIRESTORE_BASE_URL")
                    .unwrap_or_else(|| "https://firestore.googleapis.com/v1".to_string()),
                id_token: get("FIREBASE_ID_TOKEN"),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "FLASHCARDS_BACKEND",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            backend,
            user_id: get("FLASHCARDS_USER_ID"),
            stripe_publishable_key: get("STRIPE_PUBLISHABLE_KEY"),
            stripe_base_url: get("STRIPE_BASE_URL")
                .unwrap_or_else(|| "https://api.stripe.com".to_string()),
        })
    }
}
