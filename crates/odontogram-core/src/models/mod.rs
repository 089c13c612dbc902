//! Domain models for the odontogram system.

mod condition;
mod tooth;
mod treatment;

pub use condition::*;
pub use tooth::*;
pub use treatment::*;
