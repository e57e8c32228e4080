//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and the
//! board-specific drivers that actually move a GPIO.

pub mod output;

pub use output::{ButtonLine, DetachedLine, Level, LineError};
