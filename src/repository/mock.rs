//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::kardex::{KardexMovement, NewKardexMovement};
use crate::domain::patient::{
    BalanceUpdate, NewPatient, Patient, PatientDetailStatistics, UpdatePatient,
};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{PatientId, ProductId};
use crate::pagination::{PaginatedResponse, PaginatedSearchParams};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    KardexReader, KardexWriter, PatientReader, PatientWriter, ProductReader, ProductWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl PatientReader for Repository {
        async fn list_patients(
            &self,
            params: &PaginatedSearchParams,
        ) -> RepositoryResult<PaginatedResponse<Patient>>;
        async fn get_patient_by_id(&self, id: PatientId) -> RepositoryResult<Patient>;
        async fn get_patient_detail_statistics(
            &self,
            id: PatientId,
        ) -> RepositoryResult<PatientDetailStatistics>;
    }

    #[async_trait]
    impl PatientWriter for Repository {
        async fn create_patient(&self, new_patient: &NewPatient) -> RepositoryResult<Patient>;
        async fn update_patient(
            &self,
            id: PatientId,
            updates: &UpdatePatient,
        ) -> RepositoryResult<Patient>;
        async fn update_patient_balance(
            &self,
            id: PatientId,
            update: &BalanceUpdate,
        ) -> RepositoryResult<Patient>;
    }

    #[async_trait]
    impl ProductReader for Repository {
        async fn list_products(
            &self,
            params: &PaginatedSearchParams,
        ) -> RepositoryResult<PaginatedResponse<Product>>;
        async fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Product>;
    }

    #[async_trait]
    impl ProductWriter for Repository {
        async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        async fn update_product(
            &self,
            id: ProductId,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
    }

    #[async_trait]
    impl KardexReader for Repository {
        async fn list_kardex_movements(
            &self,
            params: &PaginatedSearchParams,
        ) -> RepositoryResult<PaginatedResponse<KardexMovement>>;
    }

    #[async_trait]
    impl KardexWriter for Repository {
        async fn create_kardex_movement(
            &self,
            movement: &NewKardexMovement,
        ) -> RepositoryResult<KardexMovement>;
    }
}
