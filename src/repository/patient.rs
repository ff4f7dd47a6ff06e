use async_trait::async_trait;

use crate::domain::patient::{
    BalanceUpdate, NewPatient, Patient, PatientDetailStatistics, UpdatePatient,
};
use crate::domain::types::PatientId;
use crate::http_client::HttpClient;
use crate::pagination::{PaginatedResponse, PaginatedSearchParams};
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, PATIENTS, PatientReader, PatientWriter};

#[async_trait]
impl<C: HttpClient> PatientReader for HttpRepository<C> {
    async fn list_patients(
        &self,
        params: &PaginatedSearchParams,
    ) -> RepositoryResult<PaginatedResponse<Patient>> {
        self.fetch_page(&PATIENTS, params).await
    }

    async fn get_patient_by_id(&self, id: PatientId) -> RepositoryResult<Patient> {
        self.fetch_entity(&PATIENTS, &format!("/{id}")).await
    }

    async fn get_patient_detail_statistics(
        &self,
        id: PatientId,
    ) -> RepositoryResult<PatientDetailStatistics> {
        self.fetch_entity(&PATIENTS, &format!("/{id}/statistics"))
            .await
    }
}

#[async_trait]
impl<C: HttpClient> PatientWriter for HttpRepository<C> {
    async fn create_patient(&self, new_patient: &NewPatient) -> RepositoryResult<Patient> {
        self.post_entity(&PATIENTS, "", new_patient).await
    }

    async fn update_patient(
        &self,
        id: PatientId,
        updates: &UpdatePatient,
    ) -> RepositoryResult<Patient> {
        self.put_entity(&PATIENTS, &format!("/{id}"), updates).await
    }

    async fn update_patient_balance(
        &self,
        id: PatientId,
        update: &BalanceUpdate,
    ) -> RepositoryResult<Patient> {
        self.post_entity(&PATIENTS, &format!("/{id}/balance"), update)
            .await
    }
}
