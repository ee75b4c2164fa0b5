//! Measurement pipeline
//!
//! Round-robin sampling of the three analog channels and CC/CV sensing.

pub mod pipeline;

pub use pipeline::{MeasurementPipeline, Sample};
