pub mod decoder;
pub mod pipeline;
pub mod pose;
pub mod resampler;
pub mod shared;
pub mod utils;

pub use pipeline::{run, RunOptions};
