//! Presentation-ready views over derived tooth conditions.

mod chart;
mod export;
mod statistics;

pub use chart::*;
pub use export::*;
pub use statistics::*;
