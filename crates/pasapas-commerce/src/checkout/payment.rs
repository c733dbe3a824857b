//! Hosted payment types.
//!
//! The card form is run by the payment processor's widget. This side hands
//! it a client secret and interprets what it reports back.

use serde::{Deserialize, Serialize};

/// Message shown when the widget fails without saying why.
pub const DEFAULT_DECLINE_MESSAGE: &str = "Payment declined. Please check your card.";

/// Response of `POST /payments/{orderId}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentIntent {
    #[serde(default)]
    pub client_secret: Option<String>,
}

impl PaymentIntent {
    /// The secret to hand to the widget, if the backend issued one.
    pub fn secret(&self) -> Option<&str> {
        self.client_secret
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// What the widget reported after confirming a card payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// Funds captured.
    Succeeded,
    /// Accepted but not settled yet.
    Processing,
    /// Refused or errored.
    Failed(String),
}

impl PaymentOutcome {
    /// Interpret a widget result: an error message, or an intent status.
    pub fn from_widget(error: Option<&str>, status: Option<&str>) -> Self {
        if let Some(message) = error {
            let message = message.trim();
            return if message.is_empty() {
                PaymentOutcome::Failed(DEFAULT_DECLINE_MESSAGE.to_string())
            } else {
                PaymentOutcome::Failed(message.to_string())
            };
        }
        match status {
            Some("succeeded") => PaymentOutcome::Succeeded,
            _ => PaymentOutcome::Processing,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PaymentOutcome::Succeeded)
    }

    /// Text shown under the payment form.
    pub fn message(&self) -> &str {
        match self {
            PaymentOutcome::Succeeded => "Payment succeeded! Thank you for your order.",
            PaymentOutcome::Processing => {
                "Payment is being processed. We will let you know once it is confirmed."
            }
            PaymentOutcome::Failed(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_requires_content() {
        assert_eq!(PaymentIntent::default().secret(), None);
        let blank = PaymentIntent {
            client_secret: Some("  ".into()),
        };
        assert_eq!(blank.secret(), None);
        let ok: PaymentIntent = serde_json::from_str(r#"{"client_secret":"pi_1_secret"}"#).unwrap();
        assert_eq!(ok.secret(), Some("pi_1_secret"));
    }

    #[test]
    fn test_from_widget() {
        assert_eq!(
            PaymentOutcome::from_widget(None, Some("succeeded")),
            PaymentOutcome::Succeeded
        );
        assert_eq!(
            PaymentOutcome::from_widget(None, Some("requires_action")),
            PaymentOutcome::Processing
        );
        assert_eq!(
            PaymentOutcome::from_widget(Some("Card expired"), None).message(),
            "Card expired"
        );
        assert_eq!(
            PaymentOutcome::from_widget(Some(""), None).message(),
            DEFAULT_DECLINE_MESSAGE
        );
    }
}
