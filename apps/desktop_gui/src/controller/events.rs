//! UI/backend events and error modeling for the desktop controller.

use client_core::PredictionError;
use shared::protocol::PredictionOutcome;

/// Events flowing from the backend worker to the UI thread. Prediction
/// events carry the generation of the submission that produced them so the
/// UI can discard responses that lost a race with a newer submission.
pub enum UiEvent {
    Info(String),
    StartupFailed(UiError),
    PredictionReady {
        generation: u64,
        outcome: PredictionOutcome,
    },
    PredictionFailed {
        generation: u64,
        error: UiError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Application,
    MalformedResponse,
    Startup,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Transport => "Transport",
            UiErrorCategory::Application => "Service",
            UiErrorCategory::MalformedResponse => "Response",
            UiErrorCategory::Startup => "Startup",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    message: String,
}

impl UiError {
    /// The taxonomy is carried over from the typed pipeline error rather
    /// than re-derived by sniffing message text.
    pub fn from_prediction(err: &PredictionError) -> Self {
        let category = match err {
            PredictionError::Validation(_) => UiErrorCategory::Validation,
            PredictionError::Transport { .. } => UiErrorCategory::Transport,
            PredictionError::Api { .. } => UiErrorCategory::Application,
            PredictionError::MalformedResponse { .. } => UiErrorCategory::MalformedResponse,
            PredictionError::InvalidServerUrl { .. } | PredictionError::Startup(_) => {
                UiErrorCategory::Startup
            }
        };
        Self {
            category,
            message: err.user_message(),
        }
    }

    pub fn startup(message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Startup,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{QueryParseError, FORM_VALIDATION_MESSAGE};

    #[test]
    fn categorizes_typed_pipeline_errors() {
        let validation = UiError::from_prediction(&PredictionError::Validation(
            QueryParseError::MissingField("brand"),
        ));
        assert_eq!(validation.category(), UiErrorCategory::Validation);
        assert_eq!(validation.message(), FORM_VALIDATION_MESSAGE);

        let api = UiError::from_prediction(&PredictionError::Api {
            endpoint: "/predict/price",
            status: 500,
            detail: "Model could not make a prediction.".to_string(),
        });
        assert_eq!(api.category(), UiErrorCategory::Application);
        assert_eq!(api.message(), "Model could not make a prediction.");

        let transport = UiError::from_prediction(&PredictionError::Transport {
            endpoint: "/predict/fraud",
            message: "connection refused".to_string(),
        });
        assert_eq!(transport.category(), UiErrorCategory::Transport);
    }
}
