pub mod config;
pub mod currency;
pub mod error;
pub mod form;
pub mod predictor;
pub mod render;
pub mod routes;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiErr, Result, ServeErr};
pub use predictor::Predictor;
pub use server::Server;
