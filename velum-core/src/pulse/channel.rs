//! Remote button identities

/// Number of remote buttons wired to the controller
pub const CHANNEL_COUNT: usize = 3;

/// Button on the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Open (move toward 100%)
    Up,
    /// Close (move toward 0%)
    Down,
    /// "my" preset; stops the motor when pressed during travel
    MyPosition,
}

impl Channel {
    /// All channels, in index order
    pub const ALL: [Channel; CHANNEL_COUNT] = [Channel::Up, Channel::Down, Channel::MyPosition];

    /// Stable index for per-channel tables
    pub const fn index(self) -> usize {
        match self {
            Channel::Up => 0,
            Channel::Down => 1,
            Channel::MyPosition => 2,
        }
    }

    /// Label printed on the remote
    pub const fn label(self) -> &'static str {
        match self {
            Channel::Up => "UP",
            Channel::Down => "DOWN",
            Channel::MyPosition => "MY",
        }
    }
}

/// One line per remote button
///
/// Construction is where the caller chooses real or detached hardware.
#[derive(Debug, Clone, Default)]
pub struct ButtonLines<L> {
    pub up: L,
    pub down: L,
    pub my_position: L,
}

impl<L> ButtonLines<L> {
    /// Convert into a table indexed by [`Channel::index`]
    pub fn into_array(self) -> [L; CHANNEL_COUNT] {
        [self.up, self.down, self.my_position]
    }
}
