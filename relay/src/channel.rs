use core::convert::TryFrom;

use crate::Error;

/// One of the two control axes carried through the relay
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel 0
    Zero = 0,
    /// Channel 1
    One = 1,
}

impl Channel {
    /// Number of channels
    pub const COUNT: usize = 2;

    /// Both channels in index order
    pub const ALL: [Channel; Channel::COUNT] = [Channel::Zero, Channel::One];

    /// Index of the channel, usable for per channel arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The channel that isn't `self`
    pub const fn other(self) -> Channel {
        match self {
            Channel::Zero => Channel::One,
            Channel::One => Channel::Zero,
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Channel::Zero),
            1 => Ok(Channel::One),
            v => Err(Error::InvalidChannel(v)),
        }
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel as u8
    }
}
