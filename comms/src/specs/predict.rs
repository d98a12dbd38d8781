use serde::{Deserialize, Serialize};

use super::housing::FEATURES;

/// The body of a prediction request.
///
/// Each field is keyed by its dataset column name on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictRequest {
    #[serde(rename = "GrLivArea")]
    pub living_area: f64,
    #[serde(rename = "BedroomAbvGr")]
    pub bedrooms: f64,
    #[serde(rename = "FullBath")]
    pub bathrooms: f64,
}

impl PredictRequest {
    /// Returns the request as `(column, value)` pairs, in model order.
    pub fn features(&self) -> [(&'static str, f64); 3] {
        let [area, beds, baths] = FEATURES;
        [
            (area, self.living_area),
            (beds, self.bedrooms),
            (baths, self.bathrooms),
        ]
    }
}

/// The body of a prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: f64,
    /// The prediction as US currency, e.g. `$185,432.10`.
    pub formatted: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_column_names_on_the_wire() {
        let json = r#"{"FullBath": 2, "GrLivArea": 1500, "BedroomAbvGr": 3}"#;
        let req: PredictRequest = serde_json::from_str(json).unwrap();

        assert_eq!(
            req,
            PredictRequest {
                living_area: 1500.0,
                bedrooms: 3.0,
                bathrooms: 2.0,
            }
        );
        assert_eq!(
            req.features(),
            [("GrLivArea", 1500.0), ("BedroomAbvGr", 3.0), ("FullBath", 2.0)]
        );
    }

    #[test]
    fn request_rejects_unknown_and_missing_fields() {
        let extra = r#"{"GrLivArea": 1500, "BedroomAbvGr": 3, "FullBath": 2, "Pool": 1}"#;
        assert!(serde_json::from_str::<PredictRequest>(extra).is_err());

        let missing = r#"{"GrLivArea": 1500, "BedroomAbvGr": 3}"#;
        assert!(serde_json::from_str::<PredictRequest>(missing).is_err());
    }
}
