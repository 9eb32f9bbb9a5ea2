/// Raw reading from the platform orientation sensor, in degrees.
///
/// The platform may fire an initial event with every field unset, so each
/// angle is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawOrientation {
    /// Rotation about the device Z axis (yaw), 0..360.
    pub alpha: Option<f64>,
    /// Rotation about the device X axis (pitch), -180..180.
    pub beta: Option<f64>,
    /// Rotation about the device Y axis (roll), -90..90.
    pub gamma: Option<f64>,
}

impl RawOrientation {
    /// A sample with no fields reported.
    pub const EMPTY: Self = Self {
        alpha: None,
        beta: None,
        gamma: None,
    };

    /// Build a sample from possibly-missing platform values. NaN and
    /// infinite angles count as missing.
    pub fn new(alpha: Option<f64>, beta: Option<f64>, gamma: Option<f64>) -> Self {
        let reported = |v: Option<f64>| v.filter(|v| v.is_finite());
        Self {
            alpha: reported(alpha),
            beta: reported(beta),
            gamma: reported(gamma),
        }
    }

    /// Same sample with any non-finite angle treated as missing.
    pub fn sanitized(self) -> Self {
        Self::new(self.alpha, self.beta, self.gamma)
    }

    /// A fully reported sample.
    pub fn from_degrees(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self::new(Some(alpha), Some(beta), Some(gamma))
    }
}

/// What to do when the screen orientation cannot be determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownScreenPolicy {
    /// Treat the screen as being in its natural portrait orientation (0 degrees).
    #[default]
    AssumePortrait,
    /// Report no rotation for that frame.
    Suppress,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_is_not_reported() {
        let raw = RawOrientation::new(Some(f64::NAN), Some(1.0), None);
        assert_eq!(raw.alpha, None);
        assert_eq!(raw.beta, Some(1.0));
        assert_eq!(raw.gamma, None);
    }

    #[test]
    fn infinite_is_not_reported() {
        let raw = RawOrientation::new(Some(1.0), Some(f64::INFINITY), Some(f64::NEG_INFINITY));
        assert_eq!(raw, RawOrientation::new(Some(1.0), None, None));
    }

    #[test]
    fn sanitized_drops_non_finite_literal_fields() {
        let raw = RawOrientation {
            alpha: Some(f64::NAN),
            beta: Some(2.0),
            gamma: Some(f64::INFINITY),
        };
        assert_eq!(raw.sanitized(), RawOrientation::new(None, Some(2.0), None));
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(RawOrientation::default(), RawOrientation::EMPTY);
    }
}
