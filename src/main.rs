use anyhow::Result;
use glam::DVec3;
use phonevr_config::{AppConfig, UnknownScreenSetting};
use phonevr_tracking::{
    request_event_permission, sample_channel, screen_orientation, OrientationTracker,
    RawOrientation, SampleSender, StaticPermission, StaticScreen, UnknownScreenPolicy,
};
use std::time::Duration;
use tracing::{info, warn};

/// Synthetic orientation source: the phone held upright, slowly turning
/// through North with a little wobble.
async fn synthetic_sensor(tx: SampleSender, sample_rate_hz: u32, yaw_speed_deg_per_sec: f64) {
    // Platforms commonly fire once with every field unset before real data.
    if !tx.send(RawOrientation::EMPTY) {
        return;
    }

    let period = Duration::from_secs_f64(1.0 / sample_rate_hz.max(1) as f64);
    let mut ticker = tokio::time::interval(period);
    let mut t = 0.0_f64;

    loop {
        ticker.tick().await;
        let alpha = (300.0 + yaw_speed_deg_per_sec * t).rem_euclid(360.0);
        let beta = 90.0 + 5.0 * (t * 1.3).sin();
        let gamma = 3.0 * (t * 0.7).sin();
        if !tx.send(RawOrientation::from_degrees(alpha, beta, gamma)) {
            break;
        }
        t += period.as_secs_f64();
    }
}

fn unknown_screen_policy(setting: UnknownScreenSetting) -> UnknownScreenPolicy {
    match setting {
        UnknownScreenSetting::AssumePortrait => UnknownScreenPolicy::AssumePortrait,
        UnknownScreenSetting::Suppress => UnknownScreenPolicy::Suppress,
    }
}

/// Render-loop stand-in: drain samples once per frame and query the rotation.
async fn run_frames(config: &AppConfig) {
    let driver = &config.driver;
    let frame_rate_hz = driver.frame_rate_hz.max(1);

    let mut tracker =
        OrientationTracker::with_unknown_screen_policy(unknown_screen_policy(config.tracking.unknown_screen));
    let (tx, feed) = sample_channel();
    let mut feed = feed.with_heartbeat(config.tracking.heartbeat_samples);
    let sensor = tokio::spawn(synthetic_sensor(
        tx,
        driver.sample_rate_hz,
        driver.yaw_speed_deg_per_sec,
    ));

    let screen = StaticScreen {
        orientation_type: driver.screen_orientation.clone(),
        legacy_angle: driver.legacy_screen_angle,
    };

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / frame_rate_hz as f64));
    let mut rendered = 0u32;

    for frame in 0..driver.frames {
        ticker.tick().await;
        feed.drain_into(&mut tracker);

        let orientation = screen_orientation(&screen);
        let Some(rotation) = tracker.rotation_for(orientation) else {
            tracing::trace!(frame, available = tracker.is_available(), "No rotation this frame");
            continue;
        };
        rendered += 1;

        let forward = rotation * DVec3::NEG_Z;
        let up = rotation * DVec3::Y;
        if frame % frame_rate_hz == 0 {
            info!(
                frame,
                %orientation,
                heading_deg = forward.x.atan2(-forward.z).to_degrees(),
                forward = ?forward,
                up = ?up,
                "Camera orientation"
            );
        }
    }

    sensor.abort();
    info!(
        frames = driver.frames,
        rendered,
        samples = feed.total_samples(),
        "Tracking session finished"
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phonevr=info,phonevr_tracking=info".into()),
        )
        .init();

    info!("PhoneVR orientation tracking starting");

    let config = phonevr_config::load_config().unwrap_or_else(|e| {
        warn!(?e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    info!(
        frames = config.driver.frames,
        frame_rate_hz = config.driver.frame_rate_hz,
        unknown_screen = ?config.tracking.unknown_screen,
        "Config loaded"
    );

    // Advisory only: a denial just means no samples will ever arrive.
    request_event_permission(&StaticPermission::granted()).await;

    run_frames(&config).await;

    Ok(())
}
