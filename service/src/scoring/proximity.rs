//! Greenie (closest to the pin) tiers. Only whole feet drive the tier;
//! inches are kept for display.

pub fn tier_points(feet: f64) -> i32 {
    if feet > 20.0 {
        1
    } else if feet >= 10.0 {
        2
    } else if feet >= 2.0 {
        3
    } else {
        4
    }
}

/// Aggregate greenie points for one round.
pub fn total_points(feet: impl IntoIterator<Item = i32>) -> i32 {
    feet.into_iter().map(|f| tier_points(f64::from(f))).sum()
}
