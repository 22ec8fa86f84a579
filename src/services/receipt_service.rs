use tracing::info;
use uuid::Uuid;

use crate::errors::{ApiError, CalculationError, StoreError};
use crate::models::Receipt;
use crate::services::cancel::CancelSignal;
use crate::services::points_service::calculate_points;
use crate::state::AppState;

/// Validates and scores a receipt, then stores the score.
///
/// The same signal guards the calculation and the save, so a cancelled
/// request never leaves a score behind.
pub async fn process_receipt(
    app_state: &AppState,
    signal: &CancelSignal,
    receipt: Receipt,
) -> Result<Uuid, ApiError> {
    receipt.validate()?;

    let points = calculate_points(signal, &receipt)?;

    signal.check().map_err(CalculationError::from)?;
    let id = app_state.store.save(points).await?;

    info!(%id, points, retailer = %receipt.retailer, "receipt processed successfully");
    Ok(id)
}

/// Points stored for `id`. Ids that are not UUIDs cannot exist, so they are
/// reported as not found.
pub async fn get_points(app_state: &AppState, id: &str) -> Result<u64, ApiError> {
    let uuid = Uuid::parse_str(id).map_err(|_| StoreError::NotFound(id.to_string()))?;
    let points = app_state.store.points(uuid).await?;

    info!(id = %uuid, points, "points retrieved successfully");
    Ok(points)
}
