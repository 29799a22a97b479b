use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::validation::ValidationError;

/// Failure of a single backend call or of the checks that run before it.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced an HTTP response (connect, timeout, TLS).
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Http {
        status: u16,
        message: String,
        payload: Option<Value>,
    },
    /// 2xx response whose envelope code is not a success code.
    #[error("{message} (code {code})")]
    Rejected {
        code: i64,
        message: String,
        payload: Value,
    },
    /// 2xx response that is not an envelope, or whose result has another shape.
    #[error("{message}: {source}")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ServiceError {
    /// The single line a front end shows to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message, .. }
            | Self::Http { message, .. }
            | Self::Rejected { message, .. }
            | Self::Decode { message, .. } => message.clone(),
            Self::Validation(err) => err.message.clone(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    fn raw_payload(&self) -> Value {
        match self {
            Self::Rejected { payload, .. } => payload.clone(),
            Self::Http {
                payload: Some(payload),
                ..
            } => payload.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Uniform `{success, data, message, error}` record for front ends that want
/// one shape for every call.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl<T> From<ServiceResult<T>> for ServiceResponse<T> {
    fn from(result: ServiceResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                message: None,
                error: None,
            },
            Err(err) => Self {
                success: false,
                data: None,
                message: Some(err.user_message()),
                error: Some(err.raw_payload()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_maps_to_success_record() {
        let response = ServiceResponse::from(Ok::<_, ServiceError>(vec![1, 2]));
        assert!(response.success);
        assert_eq!(response.data, Some(vec![1, 2]));
        assert_eq!(response.message, None);
    }

    #[test]
    fn rejection_keeps_raw_payload() {
        let payload = json!({"code": 1002, "message": "Vehicle already exists"});
        let response = ServiceResponse::<()>::from(Err(ServiceError::Rejected {
            code: 1002,
            message: "Vehicle already exists".into(),
            payload: payload.clone(),
        }));

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Vehicle already exists"));
        assert_eq!(response.error, Some(payload));
    }

    #[test]
    fn validation_message_is_user_facing() {
        let err = ServiceError::from(ValidationError::new("vin", "VIN must be 17 characters"));
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "VIN must be 17 characters");
    }
}
