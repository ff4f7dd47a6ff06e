use validator::Validate;

use crate::domain::kardex::{KardexFilters, KardexMovement, NewKardexMovement};
use crate::pagination::PaginationController;
use crate::repository::{KardexReader, KardexWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the controller's current page of Kardex movements.
pub async fn load_kardex_movements<R>(repo: &R, controller: &PaginationController<KardexMovement>)
where
    R: KardexReader + ?Sized,
{
    controller
        .load_data(|params| async move { repo.list_kardex_movements(&params).await })
        .await;
}

/// Replaces the Kardex filters and reloads from the first page.
///
/// A start date after the end date is rejected without touching the
/// controller.
pub async fn filter_kardex_movements<R>(
    repo: &R,
    controller: &PaginationController<KardexMovement>,
    filters: KardexFilters,
) -> ServiceResult<()>
where
    R: KardexReader + ?Sized,
{
    if let (Some(start), Some(end)) = (filters.start_date, filters.end_date) {
        if start > end {
            return Err(ServiceError::Validation(
                "start date must not be after end date".to_string(),
            ));
        }
    }
    controller.set_filters(filters.into());
    load_kardex_movements(repo, controller).await;
    Ok(())
}

/// Validates and records an inventory movement.
pub async fn record_kardex_movement<R>(
    repo: &R,
    movement: &NewKardexMovement,
) -> ServiceResult<KardexMovement>
where
    R: KardexWriter + ?Sized,
{
    movement.validate()?;
    Ok(repo.create_kardex_movement(movement).await?)
}
