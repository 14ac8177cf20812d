//! Presence decision
//!
//! Converts echo timing into distance and decides whether the phone is
//! in the dock.
//!
//! # Threshold semantics
//!
//! The dock reports "present" when the filtered distance is **at or above**
//! the threshold. That is the reverse of the obvious "closer than the
//! threshold" rule: with the phone lying on top of the sensor the HC-SR04
//! cannot resolve anything under about 2 cm and reads long instead. Keep
//! the comparison as it is unless the sensor mounting changes.

/// Speed of sound at room temperature (cm/µs)
pub const SPEED_OF_SOUND_CM_PER_US: f32 = 0.0343;

/// Distance reported when no echo comes back (cm)
///
/// Larger than any realistic threshold, so a timeout reads as "far".
pub const NO_ECHO_CM: f32 = 999.0;

/// Default presence threshold (cm)
pub const DEFAULT_THRESHOLD_CM: f32 = 1.0;

/// Convert an echo pulse width into a one-way distance
///
/// `None` (timeout) and a zero-width pulse both map to [`NO_ECHO_CM`].
pub fn echo_to_distance_cm(echo_us: Option<u32>) -> f32 {
    match echo_us {
        Some(us) if us > 0 => us as f32 * SPEED_OF_SOUND_CM_PER_US / 2.0,
        _ => NO_ECHO_CM,
    }
}

/// Presence decision for a filtered distance
///
/// Inclusive: a distance exactly at the threshold counts as present.
pub fn is_present(distance_cm: f32, threshold_cm: f32) -> bool {
    distance_cm >= threshold_cm
}
