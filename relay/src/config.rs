/// Highest duty that may be written to a PWM compare register.
///
/// One PWM period is this many counts, so a duty at the ceiling holds the output high for
/// the whole period. The receiver times edges with the same count rate.
pub const PWM_CEILING: u8 = 200;

/// Number of ticks a channel may go without a new measurement before the link is
/// considered stale and both outputs are forced to zero.
///
/// RC frames repeat every ~20ms, so this allows a few dropped frames.
pub const LIVENESS_TIMEOUT_TICKS: u8 = 25;

/// Width of the counter that timestamps receiver capture edges
pub const TICK_COUNTER_BITS: u32 = 16;
