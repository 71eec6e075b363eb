//! Core functionality for the parallel-coordinates pipeline
//! 
//! This crate provides the scaling engine shared by every plotted axis and
//! the diagnostic reporting used by the pipeline stages.

pub mod report;
pub mod scale;

// Re-export commonly used types
pub use report::{
    Diagnostic, Reporter, NoopReporter, TracingReporter, CollectingReporter,
    reporter_from_fn,
};
pub use scale::{Range, Scale, ScaleError, ScaleKind, normalize};
