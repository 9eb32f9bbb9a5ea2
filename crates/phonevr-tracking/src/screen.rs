use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a platform screen orientation value could not be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScreenOrientationError {
    /// The orientation type string is not one of the four known values.
    #[error("Unrecognised screen orientation type: {0:?}")]
    UnknownType(String),
    /// The legacy angle is not 0, 90, 180 or 270 modulo 360.
    #[error("Legacy screen angle {0} is not a multiple of 90 degrees")]
    UnsupportedAngle(i32),
}

/// Rotation of the screen relative to the device's natural (portrait) orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenOrientation {
    /// Natural upright orientation, 0 degrees.
    PortraitPrimary,
    /// Turned to landscape, 90 degrees.
    LandscapePrimary,
    /// Turned to landscape the other way, -90 degrees.
    LandscapeSecondary,
    /// Upside down, 180 degrees.
    PortraitSecondary,
    /// The platform reported nothing usable.
    Unknown,
}

impl ScreenOrientation {
    /// Screen angle in degrees, or `None` if unknown.
    pub fn degrees(self) -> Option<f64> {
        match self {
            Self::PortraitPrimary => Some(0.0),
            Self::LandscapePrimary => Some(90.0),
            Self::LandscapeSecondary => Some(-90.0),
            Self::PortraitSecondary => Some(180.0),
            Self::Unknown => None,
        }
    }

    /// Screen angle in degrees, treating an unknown orientation as portrait.
    pub fn degrees_or_portrait(self) -> f64 {
        self.degrees().unwrap_or(0.0)
    }

    /// Map a legacy single-axis angle (`window.orientation` style) onto an orientation.
    pub fn from_legacy_angle(angle: i32) -> Result<Self, ScreenOrientationError> {
        match angle.rem_euclid(360) {
            0 => Ok(Self::PortraitPrimary),
            90 => Ok(Self::LandscapePrimary),
            180 => Ok(Self::PortraitSecondary),
            270 => Ok(Self::LandscapeSecondary),
            _ => Err(ScreenOrientationError::UnsupportedAngle(angle)),
        }
    }

    /// Resolve the orientation from the primary orientation type, falling
    /// back to the legacy angle. Yields `Unknown` when neither is usable.
    pub fn resolve(primary: Option<&str>, legacy_angle: Option<i32>) -> Self {
        if let Some(kind) = primary {
            match kind.parse::<Self>() {
                Ok(orientation) => return orientation,
                Err(e) => tracing::warn!(%e, "Ignoring screen orientation type"),
            }
        }

        match legacy_angle.map(Self::from_legacy_angle) {
            Some(Ok(orientation)) => orientation,
            Some(Err(e)) => {
                tracing::warn!(%e, "Ignoring legacy screen angle");
                Self::Unknown
            }
            None => Self::Unknown,
        }
    }
}

impl FromStr for ScreenOrientation {
    type Err = ScreenOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "portrait-primary" => Ok(Self::PortraitPrimary),
            "landscape-primary" => Ok(Self::LandscapePrimary),
            "landscape-secondary" => Ok(Self::LandscapeSecondary),
            "portrait-secondary" => Ok(Self::PortraitSecondary),
            other => Err(ScreenOrientationError::UnknownType(other.to_owned())),
        }
    }
}

impl fmt::Display for ScreenOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PortraitPrimary => "portrait-primary",
            Self::LandscapePrimary => "landscape-primary",
            Self::LandscapeSecondary => "landscape-secondary",
            Self::PortraitSecondary => "portrait-secondary",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Platform query for the current screen orientation.
pub trait ScreenOrientationSource {
    /// Orientation type string, e.g. `"landscape-primary"`, if the platform exposes one.
    fn orientation_type(&self) -> Option<String>;
    /// Legacy orientation angle in degrees, if the platform exposes one.
    fn legacy_angle(&self) -> Option<i32>;
}

/// Query `source` and resolve its current screen orientation.
pub fn screen_orientation(source: &impl ScreenOrientationSource) -> ScreenOrientation {
    ScreenOrientation::resolve(source.orientation_type().as_deref(), source.legacy_angle())
}

/// Fixed screen orientation values, for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticScreen {
    pub orientation_type: Option<String>,
    pub legacy_angle: Option<i32>,
}

impl ScreenOrientationSource for StaticScreen {
    fn orientation_type(&self) -> Option<String> {
        self.orientation_type.clone()
    }

    fn legacy_angle(&self) -> Option<i32> {
        self.legacy_angle
    }
}
