use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub mod form;
pub mod vitals;

pub use form::{flag_code, AssessmentForm, Field, Gender, Level, SelectOption};
pub use vitals::{bmi, coerce_number};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const PREDICT_PATH: &str = "/predict";

/// Largest integer a JSON consumer can round-trip exactly through a double.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A coerced form value as it goes over the wire.
///
/// Integral values are written as JSON integers, other finite values as
/// floats, and NaN or infinities as `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireNumber(pub f64);

impl WireNumber {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Serialize for WireNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if !value.is_finite() {
            return serializer.serialize_none();
        }
        if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
            return serializer.serialize_i64(value as i64);
        }
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for WireNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<f64>::deserialize(deserializer)?;
        Ok(Self(value.unwrap_or(f64::NAN)))
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    pub age: WireNumber,
    pub gender: WireNumber,
    pub height: WireNumber,
    pub weight: WireNumber,
    pub ap_hi: WireNumber,
    pub ap_lo: WireNumber,
    pub cholesterol: WireNumber,
    pub gluc: WireNumber,
    pub smoke: WireNumber,
    pub alco: WireNumber,
    pub active: WireNumber,
    pub bmi: WireNumber,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskClassification {
    Low,
    High,
}

impl RiskClassification {
    /// Only the number 1 means high risk; anything else, including a missing
    /// indicator, reads as low.
    pub fn from_indicator(indicator: Option<&Value>) -> Self {
        match indicator.and_then(Value::as_f64) {
            Some(value) if value == 1.0 => Self::High,
            _ => Self::Low,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::High => "Attention Needed",
            Self::Low => "Optimal Health",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::High => {
                "Our model detects patterns similar to patients with cardiovascular issues. \
                 Please consult a specialist."
            }
            Self::Low => {
                "Your biometric patterns align with healthy patients in our dataset. \
                 Keep up the good work!"
            }
        }
    }
}

/// Reads the `risk` indicator out of a prediction response body.
pub fn classify_response(body: &str) -> Result<RiskClassification, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    Ok(RiskClassification::from_indicator(value.get("risk")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_number_encodes_like_a_browser() {
        assert_eq!(serde_json::to_value(WireNumber(50.0)).unwrap(), json!(50));
        assert_eq!(serde_json::to_value(WireNumber(-0.0)).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(WireNumber(24.5)).unwrap(), json!(24.5));
        assert_eq!(serde_json::to_value(WireNumber(f64::NAN)).unwrap(), Value::Null);
        assert_eq!(
            serde_json::to_value(WireNumber(f64::INFINITY)).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn wire_number_reads_null_as_nan() {
        let decoded: WireNumber = serde_json::from_str("null").expect("deserialize");
        assert!(decoded.value().is_nan());
        let decoded: WireNumber = serde_json::from_str("7").expect("deserialize");
        assert_eq!(decoded.value(), 7.0);
    }

    #[test]
    fn risk_of_one_is_high() {
        assert_eq!(
            classify_response(r#"{"risk": 1}"#).unwrap(),
            RiskClassification::High
        );
        assert_eq!(
            classify_response(r#"{"risk": 1.0, "probability": 0.8}"#).unwrap(),
            RiskClassification::High
        );
    }

    #[test]
    fn anything_else_is_low() {
        for body in [
            r#"{"risk": 0}"#,
            r#"{"risk": null}"#,
            r#"{"risk": "1"}"#,
            r#"{"risk": true}"#,
            r#"{"score": 1}"#,
            r#"[1]"#,
        ] {
            assert_eq!(
                classify_response(body).unwrap(),
                RiskClassification::Low,
                "{body}"
            );
        }
    }

    #[test]
    fn invalid_body_is_an_error() {
        assert!(classify_response("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn panel_text_matches_classification() {
        assert_eq!(RiskClassification::High.title(), "Attention Needed");
        assert_eq!(RiskClassification::Low.title(), "Optimal Health");
        assert!(RiskClassification::High.message().contains("consult a specialist"));
    }
}
