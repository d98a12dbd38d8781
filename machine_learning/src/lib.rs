pub mod dataset;
pub mod error;
pub mod linear;
pub mod metrics;
pub mod persist;
pub mod pipeline;
pub mod preprocessing;
pub mod split;

pub use dataset::{Frame, load_csv, read_csv};
pub use error::{MlErr, Result};
pub use linear::LinearRegression;
pub use metrics::{Metric, R2, Rmse};
pub use pipeline::Pipeline;
pub use preprocessing::{ColumnTransformer, StandardScaler};
pub use split::train_test_split;
