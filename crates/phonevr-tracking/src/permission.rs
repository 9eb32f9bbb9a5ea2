use anyhow::Result;
use std::future::Future;

/// Outcome of asking the user for access to orientation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

/// Platform-specific permission prompt for orientation sensor access.
pub trait PermissionSource {
    /// Whether the platform gates orientation events behind an explicit request.
    fn requires_request(&self) -> bool;
    /// Ask for access. Resolves once the user has answered.
    fn request(&self) -> impl Future<Output = Result<PermissionState>> + Send;
}

/// Request orientation event access and log the outcome.
///
/// The result is advisory: a denial only means samples never arrive, so
/// nothing here fails. Returns `None` when no request was made or it failed.
pub async fn request_event_permission(source: &impl PermissionSource) -> Option<PermissionState> {
    if !source.requires_request() {
        tracing::debug!("Orientation events need no permission request");
        return None;
    }

    match source.request().await {
        Ok(PermissionState::Granted) => {
            tracing::info!("Access to orientation events granted");
            Some(PermissionState::Granted)
        }
        Ok(PermissionState::Denied) => {
            // Denied in the past means the user has to re-enable it in settings.
            tracing::info!("Access to orientation events denied");
            Some(PermissionState::Denied)
        }
        Err(e) => {
            tracing::warn!(?e, "Orientation permission request failed");
            None
        }
    }
}

/// Permission source answering with a fixed state.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermission {
    pub requires_request: bool,
    pub state: PermissionState,
}

impl StaticPermission {
    pub fn granted() -> Self {
        Self {
            requires_request: true,
            state: PermissionState::Granted,
        }
    }

    pub fn denied() -> Self {
        Self {
            requires_request: true,
            state: PermissionState::Denied,
        }
    }
}

impl PermissionSource for StaticPermission {
    fn requires_request(&self) -> bool {
        self.requires_request
    }

    fn request(&self) -> impl Future<Output = Result<PermissionState>> + Send {
        let state = self.state;
        async move { Ok(state) }
    }
}
