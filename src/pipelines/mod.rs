pub mod batch_prediction;

pub use batch_prediction::*;
