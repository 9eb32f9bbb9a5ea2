//! Phone orientation tracking.
//!
//! Converts platform orientation angles (alpha/beta/gamma) into a
//! camera-to-world rotation quaternion, correcting for quaternion sign
//! flips, screen rotation and the sensor's geographic axis convention.

pub mod feed;
pub mod permission;
pub mod screen;
pub mod tracker;
pub mod types;

pub use feed::{sample_channel, SampleFeed, SampleSender};
pub use permission::{request_event_permission, PermissionSource, PermissionState, StaticPermission};
pub use screen::{screen_orientation, ScreenOrientation, ScreenOrientationError, ScreenOrientationSource, StaticScreen};
pub use tracker::{device_quaternion, OrientationTracker};
pub use types::{RawOrientation, UnknownScreenPolicy};
