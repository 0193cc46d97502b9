//! Type definitions for roadbook

mod error;
mod metrics;

pub use error::*;
pub use metrics::*;
