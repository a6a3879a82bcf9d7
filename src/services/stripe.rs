//! Card tokenization through the payment processor's payment-methods endpoint.
//!
//! Only a payment method is created. No charge, intent or confirmation is made here.

use super::PaymentTokenizer;
use crate::error::PaymentError;
use crate::models::{CardInput, PaymentMethod, ValidatedCard};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone)]
pub struct StripeTokenizer {
    http: reqwest::Client,
    base_url: String,
    publishable_key: String,
}

impl StripeTokenizer {
    pub fn new(base_url: String, publishable_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            publishable_key,
        }
    }
}

#[async_trait]
impl PaymentTokenizer for StripeTokenizer {
    async fn create_payment_method(&self, input: &CardInput) -> Result<PaymentMethod, PaymentError> {
        let card = input.validate(Utc::now().date_naive())?;
        let last4 = card.last4();
        tracing::debug!(last4 = %last4, "Creating payment method");

        let response = self
            .http
            .post(format!("{}/v1/payment_methods", self.base_url))
            .bearer_auth(&self.publishable_key)
            .form(&form_params(&card))
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = decode_error(status.as_u16(), &body);
            tracing::warn!(
                status = status.as_u16(),
                last4 = %last4,
                error = %err,
                "Tokenization rejected"
            );
            return Err(err);
        }

        let method = decode_payment_method(&body)?;
        tracing::info!(
            payment_method = %method.id,
            brand = %method.brand,
            last4 = %method.last4,
            "Payment method created"
        );
        Ok(method)
    }
}

fn form_params(card: &ValidatedCard) -> Vec<(&'static str, String)> {
    vec![
        ("type", "card".to_string()),
        ("card[number]", card.number.clone()),
        ("card[exp_month]", card.exp_month.to_string()),
        ("card[exp_year]", card.exp_year.to_string()),
        ("card[cvc]", card.cvc.clone()),
    ]
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<String>,
    decline_code: Option<String>,
}

/// Maps a non-success response to a user-facing error.
fn decode_error(status: u16, body: &str) -> PaymentError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => PaymentError::Declined {
            code: envelope.error.decline_code.or(envelope.error.code),
            message: envelope
                .error
                .message
                .unwrap_or_else(|| format!("Payment processor returned HTTP {}", status)),
        },
        Err(_) => PaymentError::Decode(format!("HTTP {}: {}", status, body)),
    }
}

#[derive(Deserialize)]
struct PaymentMethodBody {
    id: String,
    created: i64,
    card: CardBody,
}

#[derive(Deserialize)]
struct CardBody {
    brand: String,
    last4: String,
    exp_month: u32,
    exp_year: i32,
}

fn decode_payment_method(body: &str) -> Result<PaymentMethod, PaymentError> {
    let parsed: PaymentMethodBody =
        serde_json::from_str(body).map_err(|e| PaymentError::Decode(e.to_string()))?;
    let created = DateTime::<Utc>::from_timestamp(parsed.created, 0)
        .ok_or_else(|| PaymentError::Decode(format!("invalid timestamp {}", parsed.created)))?;

    Ok(PaymentMethod {
        id: parsed.id,
        brand: parsed.card.brand,
        last4: parsed.card.last4,
        exp_month: parsed.card.exp_month,
        exp_year: parsed.card.exp_year,
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_server::TestServer;

    #[test]
    fn test_form_params() {
        let card = ValidatedCard {
            number: "4242424242424242".to_string(),
            exp_month: 4,
            exp_year: 2030,
            cvc: "123".to_string(),
        };
        let params = form_params(&card);

        assert!(params.contains(&("type", "card".to_string())));
        assert!(params.contains(&("card[exp_month]", "4".to_string())));
        assert!(params.contains(&("card[exp_year]", "2030".to_string())));
        assert!(!params.iter().any(|(k, _)| k.contains("postal")));
    }

    #[test]
    fn test_decode_payment_method() {
        let body = r#"{
            "id": "pm_1Abc",
            "object": "payment_method",
            "created": 1723800000,
            "type": "card",
            "card": {"brand": "visa", "last4": "4242", "exp_month": 4, "exp_year": 2030, "funding": "credit"}
        }"#;

        let method = decode_payment_method(body).unwrap();
        assert_eq!(method.id, "pm_1Abc");
        assert_eq!(method.brand, "visa");
        assert_eq!(method.last4, "4242");
        assert_eq!(method.created.timestamp(), 1723800000);
    }

    #[test]
    fn test_decode_card_error() {
        let body = r#"{"error": {"type": "card_error", "code": "card_declined", "decline_code": "insufficient_funds", "message": "Your card has insufficient funds."}}"#;

        match decode_error(402, body) {
            PaymentError::Declined { code, message } => {
                assert_eq!(code.as_deref(), Some("insufficient_funds"));
                assert_eq!(message, "Your card has insufficient funds.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unparseable_error() {
        assert!(matches!(
            decode_error(502, "<html>bad gateway</html>"),
            PaymentError::Decode(_)
        ));
    }

    #[test]
    fn test_invalid_card_fails_before_network() {
        let tokenizer = StripeTokenizer::new("http://127.0.0.1:9".to_string(), "pk_test".to_string());
        let input = CardInput {
            number: "1234".to_string(),
            ..Default::default()
        };

        let result = futures::executor::block_on(tokenizer.create_payment_method(&input));
        assert!(matches!(result, Err(PaymentError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_card_error_response_is_declined() {
        let server = TestServer::start(vec![(
            402,
            r#"{"error": {"type": "card_error", "code": "card_declined", "decline_code": "generic_decline", "message": "Your card was declined."}}"#,
        )]);
        let tokenizer = StripeTokenizer::new(server.base_url.clone(), "pk_test".to_string());
        let input = CardInput {
            number: "4242 4242 4242 4242".to_string(),
            exp_month: "12".to_string(),
            exp_year: "34".to_string(),
            cvc: "123".to_string(),
        };

        let err = tokenizer.create_payment_method(&input).await.unwrap_err();

        match err {
            PaymentError::Declined { code, message } => {
                assert_eq!(code.as_deref(), Some("generic_decline"));
                assert_eq!(message, "Your card was declined.");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(server.requests(), vec!["POST /v1/payment_methods HTTP/1.1".to_string()]);
    }
}
