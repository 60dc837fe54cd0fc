use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed user-facing message for any form validation failure.
pub const FORM_VALIDATION_MESSAGE: &str = "Please fill out all fields correctly.";

/// A product submission as it goes over the wire: three required string
/// attributes, two numeric attributes, plus any extra opaque fields the
/// form happens to carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub brand: String,
    pub category: String,
    pub material: String,
    pub rating: f64,
    pub transactions: i64,
    #[serde(flatten)]
    pub extras: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParseError {
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),
    #[error("field '{field}' is not a valid number: '{value}'")]
    NotNumeric { field: &'static str, value: String },
    #[error("field 'rating' must be a finite number, got '{0}'")]
    NonFiniteRating(String),
}

/// Raw form buffers as typed by the user. Parsing replaces what a browser
/// form would do with native constraint checks: every field is validated
/// before anything is serialized, so a non-numeric rating can never leak
/// into the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    pub brand: String,
    pub category: String,
    pub material: String,
    pub rating: String,
    pub transactions: String,
    pub extras: BTreeMap<String, String>,
}

impl ProductFields {
    pub fn parse(&self) -> Result<ProductQuery, QueryParseError> {
        let brand = required_text("brand", &self.brand)?;
        let category = required_text("category", &self.category)?;
        let material = required_text("material", &self.material)?;

        let rating_text = required_text("rating", &self.rating)?;
        let rating: f64 = rating_text
            .parse()
            .map_err(|_| QueryParseError::NotNumeric {
                field: "rating",
                value: rating_text.clone(),
            })?;
        if !rating.is_finite() {
            return Err(QueryParseError::NonFiniteRating(rating_text));
        }

        let transactions_text = required_text("transactions", &self.transactions)?;
        let transactions: i64 =
            transactions_text
                .parse()
                .map_err(|_| QueryParseError::NotNumeric {
                    field: "transactions",
                    value: transactions_text,
                })?;

        Ok(ProductQuery {
            brand,
            category,
            material,
            rating,
            transactions,
            extras: self.extras.clone(),
        })
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, QueryParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(QueryParseError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_fields() -> ProductFields {
        ProductFields {
            brand: "Acme".to_string(),
            category: "Footwear".to_string(),
            material: "Leather".to_string(),
            rating: "4.5".to_string(),
            transactions: "12".to_string(),
            extras: BTreeMap::new(),
        }
    }

    #[test]
    fn parses_well_formed_fields() {
        let query = filled_fields().parse().expect("parse");
        assert_eq!(query.brand, "Acme");
        assert_eq!(query.rating, 4.5);
        assert_eq!(query.transactions, 12);
    }

    #[test]
    fn rejects_empty_required_field() {
        let mut fields = filled_fields();
        fields.material = "   ".to_string();
        assert_eq!(
            fields.parse(),
            Err(QueryParseError::MissingField("material"))
        );
    }

    #[test]
    fn rejects_non_numeric_rating_before_serialization() {
        let mut fields = filled_fields();
        fields.rating = "four and a half".to_string();
        assert!(matches!(
            fields.parse(),
            Err(QueryParseError::NotNumeric { field: "rating", .. })
        ));
    }

    #[test]
    fn rejects_non_finite_rating() {
        let mut fields = filled_fields();
        fields.rating = "NaN".to_string();
        assert!(matches!(
            fields.parse(),
            Err(QueryParseError::NonFiniteRating(_))
        ));
    }

    #[test]
    fn rejects_fractional_transactions() {
        let mut fields = filled_fields();
        fields.transactions = "12.5".to_string();
        assert!(matches!(
            fields.parse(),
            Err(QueryParseError::NotNumeric {
                field: "transactions",
                ..
            })
        ));
    }

    #[test]
    fn serializes_typed_numbers_and_flattened_extras() {
        let mut fields = filled_fields();
        fields.extras.insert("color".to_string(), "red".to_string());
        let query = fields.parse().expect("parse");

        let value = serde_json::to_value(&query).expect("serialize");
        assert!(value["rating"].is_number());
        assert_eq!(value["transactions"], serde_json::json!(12));
        assert_eq!(value["color"], serde_json::json!("red"));
    }

    #[test]
    fn trims_whitespace_from_text_fields() {
        let mut fields = filled_fields();
        fields.brand = "  Acme  ".to_string();
        let query = fields.parse().expect("parse");
        assert_eq!(query.brand, "Acme");
    }
}
