//! GPIO pin abstractions
//!
//! Output pins are fallible here: a line that has been released, or one
//! whose driver reports a fault, returns a [`PinError`] instead of silently
//! doing nothing. Callers decide whether that matters.

/// Errors reported by an output pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// The pin has been released and no longer drives the line
    Released,
    /// The underlying driver rejected the write
    WriteFailed,
}

/// Digital output pin
///
/// Implementations handle the register manipulation for a specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self) -> Result<(), PinError>;

    /// Set the pin low (logic 0)
    fn set_low(&mut self) -> Result<(), PinError>;

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) -> Result<(), PinError> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// Stop driving the line
    ///
    /// After this call writes return [`PinError::Released`]. The default
    /// implementation does nothing, for pins that cannot be released.
    fn release(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlakyPin {
        high: bool,
        fail: bool,
    }

    impl OutputPin for FlakyPin {
        fn set_high(&mut self) -> Result<(), PinError> {
            if self.fail {
                return Err(PinError::WriteFailed);
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), PinError> {
            if self.fail {
                return Err(PinError::WriteFailed);
            }
            self.high = false;
            Ok(())
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state_dispatch() {
        let mut pin = FlakyPin {
            high: false,
            fail: false,
        };

        pin.set_state(true).unwrap();
        assert!(pin.is_set_high());

        pin.set_state(false).unwrap();
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_set_state_propagates_failure() {
        let mut pin = FlakyPin {
            high: true,
            fail: true,
        };

        assert_eq!(pin.set_state(false), Err(PinError::WriteFailed));
        assert!(pin.is_set_high());
    }
}
