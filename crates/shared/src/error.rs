use serde::{Deserialize, Serialize};

/// Substituted when a non-2xx response carries no usable `detail` field.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Body shape the prediction service uses for non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// The human-readable message to surface, falling back to the generic
    /// text when the server gave none.
    pub fn detail_or_fallback(self) -> String {
        match self.detail {
            Some(detail) if !detail.trim().is_empty() => detail,
            _ => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_server_detail_when_present() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":"Model could not make a prediction."}"#)
                .expect("parse");
        assert_eq!(
            body.detail_or_fallback(),
            "Model could not make a prediction."
        );
    }

    #[test]
    fn falls_back_when_detail_absent_or_blank() {
        let absent: ErrorBody = serde_json::from_str("{}").expect("parse");
        assert_eq!(absent.detail_or_fallback(), UNKNOWN_ERROR_MESSAGE);

        let blank: ErrorBody = serde_json::from_str(r#"{"detail":"  "}"#).expect("parse");
        assert_eq!(blank.detail_or_fallback(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn tolerates_unrelated_keys() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":"internal","detail":"boom"}"#).expect("parse");
        assert_eq!(body.detail_or_fallback(), "boom");
    }
}
