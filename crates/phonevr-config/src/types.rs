use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Orientation tracker behaviour.
    pub tracking: TrackingConfig,
    /// Headless driver settings.
    pub driver: DriverConfig,
}

/// How to treat frames where the screen orientation cannot be determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownScreenSetting {
    /// Assume the natural portrait orientation (0 degrees).
    #[default]
    AssumePortrait,
    /// Skip the rotation update for that frame.
    Suppress,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub unknown_screen: UnknownScreenSetting,
    /// Log a heartbeat every N ingested samples. 0 disables it.
    pub heartbeat_samples: u64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            unknown_screen: UnknownScreenSetting::AssumePortrait,
            heartbeat_samples: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Render frames per second.
    pub frame_rate_hz: u32,
    /// Synthetic sensor samples per second.
    pub sample_rate_hz: u32,
    /// Number of frames to run before exiting.
    pub frames: u32,
    /// Screen orientation type, e.g. "landscape-primary".
    pub screen_orientation: Option<String>,
    /// Legacy screen angle used when `screen_orientation` is absent.
    pub legacy_screen_angle: Option<i32>,
    /// Yaw rate of the synthetic sweep.
    pub yaw_speed_deg_per_sec: f64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            frame_rate_hz: 60,
            sample_rate_hz: 120,
            frames: 600,
            screen_orientation: Some("portrait-primary".to_owned()),
            legacy_screen_angle: None,
            yaw_speed_deg_per_sec: 45.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = parse_config(
            r#"
            [tracking]
            unknown_screen = "suppress"

            [driver]
            frames = 10
            legacy_screen_angle = -90
            "#,
        )
        .unwrap();
        assert_eq!(config.tracking.unknown_screen, UnknownScreenSetting::Suppress);
        assert_eq!(config.tracking.heartbeat_samples, 1000);
        assert_eq!(config.driver.frames, 10);
        assert_eq!(config.driver.legacy_screen_angle, Some(-90));
        assert_eq!(config.driver.frame_rate_hz, 60);
    }

    #[test]
    fn invalid_policy_is_rejected() {
        assert!(parse_config("[tracking]\nunknown_screen = \"sideways\"\n").is_err());
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut config = AppConfig::default();
        config.driver.screen_orientation = Some("landscape-secondary".into());
        config.tracking.unknown_screen = UnknownScreenSetting::Suppress;

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("unknown_screen = \"suppress\""));
        assert_eq!(parse_config(&text).unwrap(), config);
    }
}
