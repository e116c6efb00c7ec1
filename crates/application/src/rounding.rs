//! Half-to-even rounding for manday targets.
//!
//! `f64::round` rounds halves away from zero; allocation targets keep the
//! banker's rounding of the source tables instead, so exact halves go to
//! the even neighbor. Fractional mandays are not tracked, and the small
//! cumulative drift across departments is accepted.

/// Rounds to the nearest integer, ties to even.
pub(crate) fn round_half_to_even(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor == 0.5 {
        if floor.rem_euclid(2.0) == 0.0 {
            floor
        } else {
            floor + 1.0
        }
    } else {
        value.round()
    }
}

/// Rounds to one decimal place, ties to even.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    round_half_to_even(value * 10.0) / 10.0
}

#[cfg(test)]
mod tests {
    use super::{round_half_to_even, round_to_tenth};

    #[test]
    fn halves_go_to_the_even_neighbor() {
        assert_eq!(round_half_to_even(0.5), 0.0);
        assert_eq!(round_half_to_even(1.5), 2.0);
        assert_eq!(round_half_to_even(2.5), 2.0);
        assert_eq!(round_half_to_even(3.5), 4.0);
        assert_eq!(round_half_to_even(-2.5), -2.0);
    }

    #[test]
    fn non_halves_round_to_nearest() {
        assert_eq!(round_half_to_even(2.4), 2.0);
        assert_eq!(round_half_to_even(2.6), 3.0);
        assert_eq!(round_half_to_even(487.0), 487.0);
    }

    #[test]
    fn tenth_rounding_applies_the_same_tie_rule() {
        assert_eq!(round_to_tenth(95.25), 95.2);
        assert_eq!(round_to_tenth(95.75), 95.8);
        assert_eq!(round_to_tenth(33.333_333), 33.3);
    }
}
