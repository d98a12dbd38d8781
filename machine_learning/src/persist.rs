//! JSON persistence of fitted pipelines.
//!
//! The on disk layout is described by the schema types below, kept apart from the runtime
//! types so that loading validates every invariant the runtime types rely on.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{ColumnTransformer, LinearRegression, MlErr, Pipeline, Result, StandardScaler};

/// The artifact layout version written by this crate.
pub const FORMAT_VERSION: u32 = 1;

/// Serialized form of a fitted `Pipeline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSchema {
    pub format_version: u32,
    /// Input columns, in model order.
    pub features: Vec<String>,
    pub target: String,
    pub scaler: ScalerSchema,
    pub regressor: RegressorSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerSchema {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressorSchema {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl From<&Pipeline> for PipelineSchema {
    fn from(pipeline: &Pipeline) -> Self {
        let scaler = pipeline.preprocessor().scaler();
        let regressor = pipeline.regressor();

        Self {
            format_version: FORMAT_VERSION,
            features: pipeline.features().to_vec(),
            target: pipeline.target().to_string(),
            scaler: ScalerSchema {
                mean: scaler.mean().to_vec(),
                scale: scaler.scale().to_vec(),
            },
            regressor: RegressorSchema {
                coefficients: regressor.coefficients().to_vec(),
                intercept: regressor.intercept(),
            },
        }
    }
}

impl TryFrom<PipelineSchema> for Pipeline {
    type Error = MlErr;

    fn try_from(schema: PipelineSchema) -> Result<Self> {
        if schema.format_version != FORMAT_VERSION {
            return Err(MlErr::UnsupportedFormat {
                got: schema.format_version,
                expected: FORMAT_VERSION,
            });
        }

        let n = schema.features.len();
        let lengths = [
            ("scaler.mean", schema.scaler.mean.len()),
            ("scaler.scale", schema.scaler.scale.len()),
            ("regressor.coefficients", schema.regressor.coefficients.len()),
        ];
        if let Some((field, len)) = lengths.into_iter().find(|&(_, len)| len != n) {
            return Err(MlErr::CorruptArtifact(format!(
                "{field} has {len} value(s) but there are {n} feature(s)"
            )));
        }

        if schema.scaler.mean.iter().any(|m| !m.is_finite()) {
            return Err(MlErr::CorruptArtifact(
                "scaler mean must be finite".into(),
            ));
        }

        let scaler = StandardScaler::from_parts(schema.scaler.mean, schema.scaler.scale)?;
        let preprocessor = ColumnTransformer::from_parts(schema.features, scaler)?;
        let regressor = LinearRegression::from_parts(
            schema.regressor.coefficients,
            schema.regressor.intercept,
        )?;

        Pipeline::from_parts(preprocessor, regressor, schema.target)
    }
}

impl Pipeline {
    /// Writes the pipeline as JSON into `writer`.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &PipelineSchema::from(self))?;
        Ok(())
    }

    /// Reads and validates a pipeline written by `to_writer`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let schema: PipelineSchema = serde_json::from_reader(reader)?;
        Pipeline::try_from(schema)
    }

    /// Saves the pipeline into the file at `path`, replacing any previous content.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        info!("saved pipeline to {}", path.display());
        Ok(())
    }

    /// Loads a pipeline from the file at `path`.
    ///
    /// # Returns
    /// The pipeline, or an error if the file is missing, isn't valid JSON, was written with an
    /// unknown format version or breaks the pipeline's invariants.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let pipeline = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!(
            "loaded pipeline from {} with features {:?}",
            path.display(),
            pipeline.features()
        );
        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;
    use crate::Frame;

    fn fitted() -> Pipeline {
        let rows = array![
            [1000., 2., 131000.],
            [1500., 3., 184000.],
            [1200., 2., 152000.],
            [2000., 4., 239000.],
            [800., 1., 104000.],
        ];
        let frame = Frame::new(vec!["area", "beds", "price"], rows).unwrap();
        Pipeline::fit(&frame, &["area", "beds"], "price").unwrap()
    }

    #[test]
    fn round_trip_through_json_preserves_pipeline() {
        let pipeline = fitted();
        let mut buf = Vec::new();
        pipeline.to_writer(&mut buf).unwrap();

        let loaded = Pipeline::from_reader(buf.as_slice()).unwrap();
        assert_eq!(loaded, pipeline);
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        let pipeline = fitted();
        pipeline.save(&path).unwrap();
        pipeline.save(&path).unwrap();

        let loaded = Pipeline::load(&path).unwrap();
        let row = [("beds", 3.0), ("area", 1750.0)];
        assert_eq!(
            loaded.predict_one(&row).unwrap(),
            pipeline.predict_one(&row).unwrap()
        );
    }

    #[test]
    fn load_rejects_unknown_version() {
        let mut schema = PipelineSchema::from(&fitted());
        schema.format_version = 99;
        assert!(matches!(
            Pipeline::try_from(schema),
            Err(MlErr::UnsupportedFormat { got: 99, .. })
        ));
    }

    #[test]
    fn load_rejects_inconsistent_lengths() {
        let mut schema = PipelineSchema::from(&fitted());
        schema.regressor.coefficients.pop();
        assert!(matches!(
            Pipeline::try_from(schema),
            Err(MlErr::CorruptArtifact(_))
        ));
    }

    #[test]
    fn load_rejects_garbage() {
        assert!(matches!(
            Pipeline::from_reader("not json".as_bytes()),
            Err(MlErr::Json(_))
        ));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Pipeline::load(dir.path().join("missing.json")),
            Err(MlErr::Io(_))
        ));
    }
}
