//! Deck source backed by the hosted document database's REST API.
//!
//! A deck is the sub-collection `users/{userId}/{deckId}`. Every document in it is one card;
//! the document id becomes the card id and the `front`/`back` fields its faces.

use super::DeckSource;
use crate::error::DeckError;
use crate::models::{Deck, Flashcard};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

const PAGE_SIZE: u32 = 300;

#[derive(Clone)]
pub struct FirestoreDeckSource {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    id_token: Option<String>,
}

impl FirestoreDeckSource {
    pub fn new(base_url: String, project_id: String, id_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            id_token,
        }
    }

    /// REST URL of a deck collection. Path segments are percent-encoded.
    pub fn collection_url(&self, user_id: &str, deck_id: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.base_url,
            urlencoding::encode(&self.project_id),
            Deck::collection_path(&urlencoding::encode(user_id), &urlencoding::encode(deck_id)),
        )
    }

    async fn fetch_page(
        &self,
        url: &str,
        page_token: Option<&str>,
    ) -> Result<ListDocumentsResponse, DeckError> {
        let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let mut request = self.http.get(url).query(&query);
        if let Some(token) = &self.id_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DeckError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(DeckError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeckError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DeckError::Decode(e.to_string()))
    }
}

#[async_trait]
impl DeckSource for FirestoreDeckSource {
    /// Follows `nextPageToken` until the collection is exhausted.
    async fn list_flashcards(&self, user_id: &str, deck_id: &str) -> Result<Deck, DeckError> {
        let url = self.collection_url(user_id, deck_id);
        let mut flashcards = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(&url, page_token.as_deref()).await?;
            flashcards.extend(page.documents.into_iter().map(Document::into_flashcard));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    tracing::warn!(user_id, deck_id, "Page token repeated, stopping");
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(user_id, deck_id, count = flashcards.len(), "Fetched deck documents");
        Ok(Deck::new(deck_id, flashcards))
    }
}

/// One page of a `documents.list` response. An empty collection comes back as `{}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Document {
    /// Full resource name; the last segment is the document id.
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl Document {
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn into_flashcard(self) -> Flashcard {
        let front = self.text_field("front");
        let back = self.text_field("back");
        Flashcard::new(self.id(), front, back)
    }

    /// Reads a field as display text. Scalars other than strings are rendered as text,
    /// missing fields become empty.
    fn text_field(&self, key: &str) -> String {
        let Some(value) = self.fields.get(key) else {
            tracing::warn!(document = %self.name, field = key, "Document is missing a field");
            return String::new();
        };

        if let Some(s) = value.get("stringValue").and_then(|v| v.as_str()) {
            return s.to_string();
        }
        // integerValue is encoded as a JSON string
        if let Some(s) = value.get("integerValue").and_then(|v| v.as_str()) {
            return s.to_string();
        }
        if let Some(n) = value.get("doubleValue").and_then(|v| v.as_f64()) {
            return n.to_string();
        }
        if let Some(b) = value.get("booleanValue").and_then(|v| v.as_bool()) {
            return b.to_string();
        }

        tracing::warn!(document = %self.name, field = key, "Unsupported field type");
        String::new()
    }
}
