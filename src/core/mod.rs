pub mod assets;
pub mod config;
pub mod error;

pub use assets::LoadedAssets;
pub use config::ServiceConfig;
pub use error::{Result, SentimentError};
