//! Layout calculation modules for stamping
//!
//! This module handles the geometric side of stamping:
//! - Measuring the stamp box (text metrics, image aspect ratio)
//! - Anchoring (quick-grid cells with margins, custom points)
//! - Rotation-aware bounds

mod metrics;
mod placement;
mod types;

pub use metrics::*;
pub use placement::*;
pub use types::*;
