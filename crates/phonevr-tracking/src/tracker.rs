use crate::screen::ScreenOrientation;
use crate::types::{RawOrientation, UnknownScreenPolicy};
use glam::DQuat;
use std::f64::consts::FRAC_1_SQRT_2;

/// Rotates the sensor frame (+x East, +y North, +z up) into the camera frame
/// (+x right, +y up, +z backward): -90 degrees about X, so North maps to -Z.
const AXIS_CORRECTION: DQuat = DQuat::from_xyzw(-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);

/// Turns platform orientation samples into a camera-to-world rotation.
///
/// Holds the most recent raw angles and the previously emitted device
/// quaternion, which is needed to keep consecutive outputs on the same
/// hemisphere of S³.
#[derive(Debug, Default)]
pub struct OrientationTracker {
    raw: RawOrientation,
    last_quaternion: Option<DQuat>,
    unknown_screen: UnknownScreenPolicy,
}

impl OrientationTracker {
    /// Tracker with no samples yet, assuming portrait when the screen is unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker with no samples yet and the given handling of unknown screen orientation.
    pub fn with_unknown_screen_policy(policy: UnknownScreenPolicy) -> Self {
        Self {
            unknown_screen: policy,
            ..Self::default()
        }
    }

    /// Store a new sample. Previous angles are replaced, never merged.
    /// Non-finite angles are stored as missing.
    pub fn ingest_sample(&mut self, sample: RawOrientation) {
        self.raw = sample.sanitized();
    }

    /// Whether a reading with an alpha angle has been received.
    ///
    /// Only alpha is checked: the platform reports all three angles together
    /// or none of them.
    pub fn is_available(&self) -> bool {
        self.raw.alpha.is_some()
    }

    /// Latest raw angles as last ingested.
    pub fn raw(&self) -> RawOrientation {
        self.raw
    }

    /// Sign-corrected device quaternion from the previous `compute_rotation`.
    pub fn last_quaternion(&self) -> Option<DQuat> {
        self.last_quaternion
    }

    /// Forget all samples and the continuity reference.
    pub fn reset(&mut self) {
        self.raw = RawOrientation::EMPTY;
        self.last_quaternion = None;
        tracing::info!("Orientation tracker reset");
    }

    /// Compute the camera rotation for a screen rotated by `screen_degrees`
    /// from its natural orientation.
    ///
    /// Returns `None` until a sample with an alpha angle has arrived.
    pub fn compute_rotation(&mut self, screen_degrees: f64) -> Option<DQuat> {
        let alpha = self.raw.alpha?;
        let beta = self.raw.beta.unwrap_or(0.0);
        let gamma = self.raw.gamma.unwrap_or(0.0);

        let mut device = device_quaternion(alpha, beta, gamma);

        // q and -q encode the same rotation; keep whichever is nearer the last output.
        if let Some(last) = self.last_quaternion {
            let difference = last * device.inverse();
            if difference.w < 0.0 {
                device = -device;
            }
        }
        self.last_quaternion = Some(device);

        let half = screen_degrees.to_radians() / 2.0;
        let screen_transform = DQuat::from_xyzw(0.0, 0.0, -half.sin(), half.cos());

        let rotation = AXIS_CORRECTION * (device * screen_transform);
        tracing::trace!(
            x = rotation.x,
            y = rotation.y,
            z = rotation.z,
            w = rotation.w,
            screen_degrees,
            "Computed device rotation"
        );
        Some(rotation)
    }

    /// Like [`compute_rotation`](Self::compute_rotation), resolving the screen
    /// angle through the tracker's [`UnknownScreenPolicy`].
    pub fn rotation_for(&mut self, screen: ScreenOrientation) -> Option<DQuat> {
        let degrees = match (screen.degrees(), self.unknown_screen) {
            (Some(degrees), _) => degrees,
            (None, UnknownScreenPolicy::AssumePortrait) => 0.0,
            (None, UnknownScreenPolicy::Suppress) => return None,
        };
        self.compute_rotation(degrees)
    }
}

/// Build the device quaternion from platform angles in degrees, composing
/// Z (alpha) · X (beta) · Y (gamma).
pub fn device_quaternion(alpha: f64, beta: f64, gamma: f64) -> DQuat {
    let z = alpha.to_radians() / 2.0;
    let x = beta.to_radians() / 2.0;
    let y = gamma.to_radians() / 2.0;

    let (s_x, c_x) = x.sin_cos();
    let (s_y, c_y) = y.sin_cos();
    let (s_z, c_z) = z.sin_cos();

    DQuat::from_xyzw(
        s_x * c_y * c_z - c_x * s_y * s_z,
        c_x * s_y * c_z + s_x * c_y * s_z,
        c_x * c_y * s_z + s_x * s_y * c_z,
        c_x * c_y * c_z - s_x * s_y * s_z,
    )
}
