use tracing::debug;

/// Converts an element position into a progress percentage in `[0, 100]`.
///
/// Zero, negative, unknown or non-finite durations yield `0.0` instead of a
/// not-a-number value, so the progress bar never receives garbage before the
/// element has loaded its metadata.
///
/// # Example
/// ```
/// use bubble::progress_percent;
///
/// assert_eq!(progress_percent(15.0, Some(60.0)), 25.0);
/// assert_eq!(progress_percent(3.0, None), 0.0);
/// assert_eq!(progress_percent(90.0, Some(60.0)), 100.0);
/// ```
pub fn progress_percent(current_time: f64, duration: Option<f64>) -> f64 {
    let Some(duration) = duration else {
        return 0.0;
    };

    let raw = current_time / duration * 100.0;
    if !raw.is_finite() || duration <= 0.0 {
        debug!(current_time, duration, "progress undefined; reporting zero");
        return 0.0;
    }

    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::progress_percent;

    #[test]
    fn zero_duration_is_reported_as_zero_progress() {
        assert_eq!(progress_percent(0.0, Some(0.0)), 0.0);
        assert_eq!(progress_percent(4.0, Some(0.0)), 0.0);
    }

    #[test]
    fn non_finite_inputs_are_reported_as_zero_progress() {
        assert_eq!(progress_percent(f64::NAN, Some(10.0)), 0.0);
        assert_eq!(progress_percent(1.0, Some(f64::NAN)), 0.0);
        assert_eq!(progress_percent(1.0, Some(f64::INFINITY)), 0.0);
    }

    #[test]
    fn negative_position_clamps_to_zero() {
        assert_eq!(progress_percent(-2.0, Some(10.0)), 0.0);
    }

    #[test]
    fn proportional_inside_range() {
        assert_eq!(progress_percent(2.5, Some(10.0)), 25.0);
    }
}
