use core::sync::atomic::{AtomicU8, Ordering};

use crate::{config::LIVENESS_TIMEOUT_TICKS, Channel};

/// Tracks how many ticks each channel has gone without a new measurement.
///
/// Capture paths never touch this. They only bump their own commit counter
/// and the tick handler compares the counters against what it saw last time,
/// so every field here has the tick handler as its only writer.
#[derive(Debug)]
pub struct Liveness {
    seen: [AtomicU8; Channel::COUNT],
    age: [AtomicU8; Channel::COUNT],
}

impl Liveness {
    /// Create a tracker with both channels stale
    pub const fn new() -> Self {
        Self {
            seen: [AtomicU8::new(0), AtomicU8::new(0)],
            age: [
                AtomicU8::new(LIVENESS_TIMEOUT_TICKS),
                AtomicU8::new(LIVENESS_TIMEOUT_TICKS),
            ],
        }
    }

    /// Forget all history. Both channels become stale
    pub fn reset(&self) {
        for &channel in Channel::ALL.iter() {
            self.seen[channel.index()].store(0, Ordering::Relaxed);
            self.age[channel.index()].store(LIVENESS_TIMEOUT_TICKS, Ordering::Relaxed);
        }
    }

    /// Age both channels by one tick given their current commit counters.
    /// Returns true while both channels have committed recently.
    ///
    /// Must only be called from the tick handler.
    pub fn observe(&self, commits: [u8; Channel::COUNT]) -> bool {
        let mut live = true;
        for &channel in Channel::ALL.iter() {
            let i = channel.index();
            let age = if self.seen[i].load(Ordering::Relaxed) != commits[i] {
                self.seen[i].store(commits[i], Ordering::Relaxed);
                0
            } else {
                self.age[i].load(Ordering::Relaxed).saturating_add(1)
            };
            self.age[i].store(age, Ordering::Relaxed);
            live &= age < LIVENESS_TIMEOUT_TICKS;
        }
        live
    }

    /// Ticks since `channel` last committed, saturating
    pub fn age(&self, channel: Channel) -> u8 {
        self.age[channel.index()].load(Ordering::Relaxed)
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_stale() {
        let liveness = Liveness::new();
        assert!(!liveness.observe([0, 0]));
    }

    #[test]
    fn both_channels_needed() {
        let liveness = Liveness::new();
        // Channel 1 has never committed
        assert!(!liveness.observe([1, 0]));
        assert!(!liveness.observe([2, 0]));
        assert_eq!(liveness.age(Channel::Zero), 0);
        // Now it has, channel 0 is one tick old
        assert!(liveness.observe([2, 1]));
        assert_eq!(liveness.age(Channel::Zero), 1);
        assert_eq!(liveness.age(Channel::One), 0);
    }

    #[test]
    fn expires_after_timeout() {
        let liveness = Liveness::new();
        assert!(liveness.observe([1, 1]));
        // Ages 1..TIMEOUT-1 are still live
        for _ in 1..LIVENESS_TIMEOUT_TICKS {
            assert!(liveness.observe([1, 1]));
        }
        assert!(!liveness.observe([1, 1]));
        assert!(!liveness.observe([1, 1]));
        // A fresh commit on both brings it back
        assert!(liveness.observe([2, 2]));
    }

    #[test]
    fn age_saturates() {
        let liveness = Liveness::new();
        for _ in 0..1000 {
            liveness.observe([0, 0]);
        }
        assert_eq!(liveness.age(Channel::Zero), u8::MAX);
        assert!(!liveness.observe([0, 0]));
    }

    #[test]
    fn reset_makes_stale() {
        let liveness = Liveness::new();
        assert!(liveness.observe([5, 5]));
        liveness.reset();
        assert_eq!(liveness.age(Channel::One), LIVENESS_TIMEOUT_TICKS);
        assert!(!liveness.observe([0, 0]));
    }
}
