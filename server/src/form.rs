use std::{error::Error, fmt};

use comms::PredictRequest;
use serde::Deserialize;

/// A bounded numeric input of the prediction form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberInput {
    /// The dataset column the input feeds, also used as the form field name.
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

/// Why a submitted value was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErr {
    Missing {
        name: &'static str,
    },
    NotANumber {
        name: &'static str,
        raw: String,
    },
    OutOfBounds {
        name: &'static str,
        min: f64,
        max: f64,
        got: f64,
    },
}

impl fmt::Display for FieldErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErr::Missing { name } => write!(f, "missing field {name}"),
            FieldErr::NotANumber { name, raw } => write!(f, "{name} must be a number, got {raw:?}"),
            FieldErr::OutOfBounds {
                name,
                min,
                max,
                got,
            } => write!(f, "{name} must be between {min} and {max}, got {got}"),
        }
    }
}

impl Error for FieldErr {}

impl NumberInput {
    /// Checks that `value` lies inside the widget bounds.
    pub fn check(&self, value: f64) -> Result<f64, FieldErr> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(FieldErr::OutOfBounds {
                name: self.name,
                min: self.min,
                max: self.max,
                got: value,
            });
        }

        Ok(value)
    }

    /// Parses a raw submitted value and checks its bounds.
    pub fn parse(&self, raw: Option<&str>) -> Result<f64, FieldErr> {
        let raw = raw
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or(FieldErr::Missing { name: self.name })?;

        let value = raw.parse::<f64>().map_err(|_| FieldErr::NotANumber {
            name: self.name,
            raw: raw.to_string(),
        })?;

        self.check(value)
    }
}

pub const LIVING_AREA: NumberInput = NumberInput {
    name: "GrLivArea",
    label: "Living Area (GrLivArea in sq ft)",
    min: 500.0,
    max: 6000.0,
    default: 1500.0,
};

pub const BEDROOMS: NumberInput = NumberInput {
    name: "BedroomAbvGr",
    label: "Number of Bedrooms (BedroomAbvGr)",
    min: 1.0,
    max: 10.0,
    default: 3.0,
};

pub const BATHROOMS: NumberInput = NumberInput {
    name: "FullBath",
    label: "Number of Bathrooms (FullBath)",
    min: 1.0,
    max: 5.0,
    default: 2.0,
};

/// Every input of the form, in display order.
pub const INPUTS: [NumberInput; 3] = [LIVING_AREA, BEDROOMS, BATHROOMS];

/// A submitted form, kept as raw text so a rejected submission can be shown back as typed.
///
/// Fields the form doesn't know about, like the submit button, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FormFields {
    #[serde(rename = "GrLivArea")]
    pub living_area: Option<String>,
    #[serde(rename = "BedroomAbvGr")]
    pub bedrooms: Option<String>,
    #[serde(rename = "FullBath")]
    pub bathrooms: Option<String>,
}

impl FormFields {
    /// Parses every field into a bounded request.
    pub fn parse(&self) -> Result<PredictRequest, FieldErr> {
        Ok(PredictRequest {
            living_area: LIVING_AREA.parse(self.living_area.as_deref())?,
            bedrooms: BEDROOMS.parse(self.bedrooms.as_deref())?,
            bathrooms: BATHROOMS.parse(self.bathrooms.as_deref())?,
        })
    }

    /// The submitted text of each input, in `INPUTS` order.
    pub fn echo(&self) -> [String; 3] {
        [&self.living_area, &self.bedrooms, &self.bathrooms]
            .map(|v| v.as_deref().unwrap_or_default().trim().to_string())
    }
}

/// The request the form shows before anything is submitted.
pub fn defaults() -> PredictRequest {
    PredictRequest {
        living_area: LIVING_AREA.default,
        bedrooms: BEDROOMS.default,
        bathrooms: BATHROOMS.default,
    }
}

/// The text of each input for `request`, in `INPUTS` order.
pub fn display(request: &PredictRequest) -> [String; 3] {
    [request.living_area, request.bedrooms, request.bathrooms].map(|v| v.to_string())
}

/// Checks every field of `request` against its widget bounds.
pub fn validate(request: PredictRequest) -> Result<PredictRequest, FieldErr> {
    Ok(PredictRequest {
        living_area: LIVING_AREA.check(request.living_area)?,
        bedrooms: BEDROOMS.check(request.bedrooms)?,
        bathrooms: BATHROOMS.check(request.bathrooms)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(area: &str, beds: &str, baths: &str) -> FormFields {
        FormFields {
            living_area: Some(area.to_string()),
            bedrooms: Some(beds.to_string()),
            bathrooms: Some(baths.to_string()),
        }
    }

    #[test]
    fn inputs_follow_the_model_features() {
        let names: Vec<_> = INPUTS.iter().map(|i| i.name).collect();
        assert_eq!(names, comms::FEATURES);
    }

    #[test]
    fn parses_submitted_fields() {
        let req = fields("2400", " 4 ", "3").parse().unwrap();
        assert_eq!(
            req,
            PredictRequest {
                living_area: 2400.0,
                bedrooms: 4.0,
                bathrooms: 3.0,
            }
        );
    }

    #[test]
    fn accepts_widget_bounds() {
        assert!(fields("500", "1", "1").parse().is_ok());
        assert!(fields("6000", "10", "5").parse().is_ok());
    }

    #[test]
    fn rejects_out_of_bounds_values() {
        for (area, beds, baths) in [
            ("499", "3", "2"),
            ("1500", "11", "2"),
            ("1500", "3", "0"),
            ("NaN", "3", "2"),
        ] {
            assert!(
                matches!(
                    fields(area, beds, baths).parse(),
                    Err(FieldErr::OutOfBounds { .. })
                ),
                "{area} {beds} {baths}"
            );
        }
    }

    #[test]
    fn rejects_missing_and_non_numeric_fields() {
        let missing = FormFields {
            bathrooms: None,
            ..fields("1500", "3", "2")
        };
        assert_eq!(
            missing.parse(),
            Err(FieldErr::Missing { name: "FullBath" })
        );

        let blank = fields("1500", "3", "  ");
        assert_eq!(blank.parse(), Err(FieldErr::Missing { name: "FullBath" }));

        let err = fields("big", "3", "2").parse().unwrap_err();
        assert!(err.to_string().contains("GrLivArea"), "{err}");
    }

    #[test]
    fn echoes_what_was_typed() {
        let submitted = FormFields {
            bedrooms: None,
            ..fields(" 2400", "4", "9")
        };
        assert_eq!(submitted.echo(), ["2400", "", "9"]);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(validate(defaults()).unwrap(), defaults());
        assert_eq!(display(&defaults()), ["1500", "3", "2"]);
    }
}
