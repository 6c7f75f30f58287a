//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the immutable numeric table loaded from CSV (`ObservationTable`)
//! - the validated column selection (`Selection`)
//! - fit outputs (`FittedModel`, `FitMetrics`, `RowFit`)

pub mod types;

pub use types::*;
