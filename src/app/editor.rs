//! Add, edit and detail flows shared by every entity.
//!
//! Each flow performs one remote call and turns its outcome into a notice; failures are returned
//! to the caller as well so a front end can decide whether to stay on the form.

use crate::app::notifications::Notifications;
use crate::domain::model::{CatalogEntity, EntityId};
use crate::infra::http::{ApiError, EntityService};

pub async fn submit_create<E: CatalogEntity>(
    service: &dyn EntityService<E>,
    draft: &E::Draft,
    notices: &mut Notifications,
) -> Result<(), ApiError> {
    match service.create(draft).await {
        Ok(()) => {
            tracing::info!(kind = E::KIND.singular(), "created");
            notices.success(format!("{} added successfully!", E::KIND.label()));
            Ok(())
        }
        Err(e) => {
            notices.error(e.notice_text(&format!("Failed to add the {}", E::KIND.singular())));
            Err(e)
        }
    }
}

pub async fn submit_update<E: CatalogEntity>(
    service: &dyn EntityService<E>,
    id: &EntityId,
    draft: &E::Draft,
    notices: &mut Notifications,
) -> Result<(), ApiError> {
    match service.update(id, draft).await {
        Ok(()) => {
            tracing::info!(kind = E::KIND.singular(), %id, "updated");
            notices.success(format!("{} updated successfully!", E::KIND.label()));
            Ok(())
        }
        Err(e) => {
            notices.error(e.notice_text(&format!("Failed to update {}", E::KIND.singular())));
            Err(e)
        }
    }
}

/// Fetches one record for a detail view or to pre-fill an edit form.
pub async fn load_one<E: CatalogEntity>(
    service: &dyn EntityService<E>,
    id: &EntityId,
    notices: &mut Notifications,
) -> Result<E, ApiError> {
    service.get(id).await.map_err(|e| {
        notices.error(e.notice_text(&format!("No {} details found for {}", E::KIND.singular(), id)));
        e
    })
}
