use std::sync::Arc;

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use tracing::instrument;

use crate::{settings::SettingsLauncher, types::AppError};

/// Empty `202 Accepted` response
#[derive(Debug)]
pub struct Accepted;

impl IntoResponse for Accepted {
    fn into_response(self) -> Response {
        StatusCode::ACCEPTED.into_response()
    }
}

impl OperationOutput for Accepted {
    type Inner = ();
}

/// Opens the system screen where notification access is granted
///
/// Responds once the screen has been started; the user's choice is not
/// reported back.
///
/// # Errors
///
/// Returns `settings_unavailable` if the settings screen could not be started
#[instrument(skip(launcher))]
pub async fn open_notification_access_settings(
    Extension(launcher): Extension<Arc<dyn SettingsLauncher>>,
) -> Result<Accepted, AppError> {
    launcher.open_notification_access_settings().map_err(|e| {
        tracing::error!("Failed to open notification access settings: {e:#}");
        AppError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "settings_unavailable",
            "Notification access settings could not be opened",
            true,
        )
    })?;

    Ok(Accepted)
}
