use serde::{Deserialize, Serialize};

/// Application code the backend uses for a successful call.
pub const CODE_SUCCESS: i64 = 1000;
/// Alternate success code returned by the payment endpoints.
pub const CODE_PAYMENT_SUCCESS: i64 = 0;

/// Set of envelope codes a call treats as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessCodes {
    Standard,
    Payment,
}

impl SuccessCodes {
    pub fn accepts(self, code: i64) -> bool {
        match self {
            Self::Standard => code == CODE_SUCCESS,
            Self::Payment => code == CODE_SUCCESS || code == CODE_PAYMENT_SUCCESS,
        }
    }
}

/// Body the backend sends alongside a non-2xx status. Every field is
/// optional because proxies and the servlet container answer with other shapes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_calls_accept_both_success_codes() {
        assert!(SuccessCodes::Payment.accepts(1000));
        assert!(SuccessCodes::Payment.accepts(0));
        assert!(!SuccessCodes::Payment.accepts(1001));
    }

    #[test]
    fn standard_calls_reject_zero() {
        assert!(SuccessCodes::Standard.accepts(1000));
        assert!(!SuccessCodes::Standard.accepts(0));
    }

    #[test]
    fn blank_error_message_is_ignored() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"message":"   "}"#).expect("body");
        assert_eq!(body.message(), None);

        let body: ApiErrorBody =
            serde_json::from_str(r#"{"code":1004,"message":"Vehicle not found"}"#).expect("body");
        assert_eq!(body.message(), Some("Vehicle not found"));
    }
}
