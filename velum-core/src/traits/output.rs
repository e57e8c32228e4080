//! Button line trait
//!
//! A button line is one wire into the remote control: driving it to the
//! active level is equivalent to holding the button down. The pulse
//! controller never cares how that happens, only whether the write landed.

/// Logical level of a button line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Button held
    Active,
    /// Button released (idle)
    Inactive,
}

/// Reasons a line write did not reach the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// No hardware behind this line
    Detached,
    /// The pin driver rejected the write
    WriteFailed,
}

/// Output capability for a single remote button
///
/// Implementations must tolerate being written in any order and any number
/// of times; the pulse controller guarantees only that every active write
/// is eventually followed by an inactive one.
pub trait ButtonLine {
    /// Drive the line to a logical level
    fn write(&mut self, level: Level) -> Result<(), LineError>;

    /// Give the line back to the system
    ///
    /// Called exactly once when the owning controller is torn down, after
    /// the line has been driven inactive.
    fn release(&mut self) {}
}

/// Line with no hardware behind it
///
/// Substituted when the board has no remote wired up. Every write reports
/// [`LineError::Detached`], so controllers keep their bookkeeping and the
/// firmware keeps logging, but nothing moves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetachedLine;

impl ButtonLine for DetachedLine {
    fn write(&mut self, _level: Level) -> Result<(), LineError> {
        Err(LineError::Detached)
    }
}
