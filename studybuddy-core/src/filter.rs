//! Three-sample median filter
//!
//! Ultrasonic readings occasionally pick up a stray reflection. The median
//! of three rejects a single outlier outright instead of averaging it in,
//! while two consistent readings still win.

/// Median of three values
///
/// Uses a min/max comparison network; no sorting needed for three values.
pub fn median3(a: f32, b: f32, c: f32) -> f32 {
    a.min(b).max(a.max(b).min(c))
}
