use crate::config::PWM_CEILING;

/// Limits a measured width (in counter ticks) to a duty the PWM hardware can take
pub fn clamp_duty(width: u16) -> u8 {
    if width > u16::from(PWM_CEILING) {
        PWM_CEILING
    } else {
        width as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_ceiling_passes_through() {
        assert_eq!(clamp_duty(0), 0);
        assert_eq!(clamp_duty(50), 50);
        assert_eq!(clamp_duty(PWM_CEILING as u16), PWM_CEILING);
    }

    #[test]
    fn above_ceiling_is_clamped() {
        assert_eq!(clamp_duty(PWM_CEILING as u16 + 1), PWM_CEILING);
        assert_eq!(clamp_duty(255), PWM_CEILING);
        assert_eq!(clamp_duty(u16::MAX), PWM_CEILING);
    }
}
