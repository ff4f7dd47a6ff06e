use log::info;
use validator::Validate;

use crate::domain::patient::{BalanceUpdate, NewPatient, Patient};
use crate::domain::types::{PatientId, non_empty};
use crate::dto::patient::PatientPageData;
use crate::pagination::PaginationController;
use crate::repository::{PatientReader, PatientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the controller's current page of patients.
pub async fn load_patients<R>(repo: &R, controller: &PaginationController<Patient>)
where
    R: PatientReader + ?Sized,
{
    controller
        .load_data(|params| async move { repo.list_patients(&params).await })
        .await;
}

/// Applies a new search term and reloads from the first page.
pub async fn search_patients<R>(
    repo: &R,
    controller: &PaginationController<Patient>,
    term: &str,
) where
    R: PatientReader + ?Sized,
{
    controller.set_search_term(term);
    load_patients(repo, controller).await;
}

/// Fetches the patient together with the aggregates for the detail page.
pub async fn load_patient_page<R>(repo: &R, patient_id: i64) -> ServiceResult<PatientPageData>
where
    R: PatientReader + ?Sized,
{
    let id = PatientId::new(patient_id)?;
    let patient = repo.get_patient_by_id(id).await?;
    let statistics = repo.get_patient_detail_statistics(id).await?;
    Ok(PatientPageData {
        patient,
        statistics,
    })
}

/// Validates and registers a new patient, returning the stored record.
pub async fn register_patient<R>(repo: &R, new_patient: &NewPatient) -> ServiceResult<Patient>
where
    R: PatientWriter + ?Sized,
{
    new_patient.validate()?;
    let patient = repo.create_patient(new_patient).await?;
    info!("Registered patient {}", patient.id);
    Ok(patient)
}

/// Credits (positive `amount`) or debits (negative) a patient's balance.
pub async fn adjust_patient_balance<R>(
    repo: &R,
    patient_id: i64,
    amount: f64,
    reason: Option<String>,
) -> ServiceResult<Patient>
where
    R: PatientWriter + ?Sized,
{
    let id = PatientId::new(patient_id)?;
    if !amount.is_finite() || amount == 0.0 {
        return Err(ServiceError::Validation(
            "amount must be a non-zero number".to_string(),
        ));
    }
    let update = BalanceUpdate {
        amount,
        reason: reason.and_then(|r| non_empty(r).ok()),
    };
    repo.update_patient_balance(id, &update)
        .await
        .map_err(ServiceError::from)
}
