use core::fmt;

/// Errors that can be returned by the relay core
///
/// The interrupt handlers themselves never fail, this only covers
/// conversions at the edges of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A channel index outside of 0..=1
    InvalidChannel(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidChannel(v) => write!(f, "invalid channel index {}", v),
        }
    }
}
