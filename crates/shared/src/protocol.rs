use serde::{Deserialize, Serialize};

/// The closed set of prediction endpoints. Rendering and response parsing
/// dispatch on this enum exhaustively, so adding an endpoint surfaces every
/// place that must learn about it as a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionEndpoint {
    Price,
    Fraud,
}

impl PredictionEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            PredictionEndpoint::Price => "/predict/price",
            PredictionEndpoint::Fraud => "/predict/fraud",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PredictionEndpoint::Price => "price prediction",
            PredictionEndpoint::Fraud => "fraud detection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePredictionResponse {
    pub predicted_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudDetectionResponse {
    pub is_fraud: bool,
}

/// One variant per endpoint; parsed from the endpoint the request was sent
/// to, never sniffed from the payload shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionOutcome {
    Price { predicted_price: f64 },
    Fraud { is_fraud: bool },
}

/// Presentation state applied to the result slot a rendered outcome lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPresentation {
    PriceNormal,
    FraudDetected,
    FraudNotDetected,
}

impl PredictionOutcome {
    pub fn endpoint(&self) -> PredictionEndpoint {
        match self {
            PredictionOutcome::Price { .. } => PredictionEndpoint::Price,
            PredictionOutcome::Fraud { .. } => PredictionEndpoint::Fraud,
        }
    }

    /// User-facing result line, matching the presentation contract exactly:
    /// prices carry a currency prefix and two decimals.
    pub fn display_text(&self) -> String {
        match self {
            PredictionOutcome::Price { predicted_price } => {
                format!("Predicted Price: ${predicted_price:.2}")
            }
            PredictionOutcome::Fraud { is_fraud: true } => {
                "Fraud Status: Potential Fraud Detected".to_string()
            }
            PredictionOutcome::Fraud { is_fraud: false } => {
                "Fraud Status: No Fraud Detected".to_string()
            }
        }
    }

    pub fn presentation(&self) -> ResultPresentation {
        match self {
            PredictionOutcome::Price { .. } => ResultPresentation::PriceNormal,
            PredictionOutcome::Fraud { is_fraud: true } => ResultPresentation::FraudDetected,
            PredictionOutcome::Fraud { is_fraud: false } => ResultPresentation::FraudNotDetected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_are_stable() {
        assert_eq!(PredictionEndpoint::Price.path(), "/predict/price");
        assert_eq!(PredictionEndpoint::Fraud.path(), "/predict/fraud");
    }

    #[test]
    fn price_renders_with_currency_prefix_and_two_decimals() {
        let outcome = PredictionOutcome::Price {
            predicted_price: 19.999,
        };
        assert_eq!(outcome.display_text(), "Predicted Price: $20.00");
        assert_eq!(outcome.presentation(), ResultPresentation::PriceNormal);
    }

    #[test]
    fn negative_price_keeps_two_decimals() {
        let outcome = PredictionOutcome::Price {
            predicted_price: -3.5,
        };
        assert_eq!(outcome.display_text(), "Predicted Price: $-3.50");
    }

    #[test]
    fn fraud_flag_selects_detection_text_and_presentation() {
        let detected = PredictionOutcome::Fraud { is_fraud: true };
        assert_eq!(
            detected.display_text(),
            "Fraud Status: Potential Fraud Detected"
        );
        assert_eq!(detected.presentation(), ResultPresentation::FraudDetected);

        let clean = PredictionOutcome::Fraud { is_fraud: false };
        assert_eq!(clean.display_text(), "Fraud Status: No Fraud Detected");
        assert_eq!(clean.presentation(), ResultPresentation::FraudNotDetected);
    }

    #[test]
    fn outcome_maps_back_to_its_endpoint() {
        assert_eq!(
            PredictionOutcome::Price {
                predicted_price: 1.0
            }
            .endpoint(),
            PredictionEndpoint::Price
        );
        assert_eq!(
            PredictionOutcome::Fraud { is_fraud: false }.endpoint(),
            PredictionEndpoint::Fraud
        );
    }
}
