/// The input columns of the model, in model order.
pub const FEATURES: [&str; 3] = ["GrLivArea", "BedroomAbvGr", "FullBath"];

/// The column the model predicts.
pub const TARGET: &str = "SalePrice";

/// Where the trainer reads the dataset from unless told otherwise.
pub const DEFAULT_DATASET_PATH: &str = "house_price.csv";

/// Where the trainer writes the fitted pipeline and the server reads it from.
pub const DEFAULT_MODEL_PATH: &str = "house_price_model.json";
