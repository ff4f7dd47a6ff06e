use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::domain::kardex::{KardexMovement, NewKardexMovement};
use crate::domain::patient::{
    BalanceUpdate, NewPatient, Patient, PatientDetailStatistics, UpdatePatient,
};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{PatientId, ProductId};
use crate::http_client::HttpClient;
use crate::pagination::{PaginatedResponse, PaginatedSearchParams};
use crate::repository::envelope::{
    EnvelopeShape, ResourceConfig, TotalPagesSource, unwrap_entity, unwrap_page,
};

pub mod envelope;
pub mod errors;
pub mod kardex;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod patient;
pub mod product;

pub use errors::{RepositoryError, RepositoryResult};

/// Patients wrap everything in `{state, data}` and leave page counting to
/// the client.
pub const PATIENTS: ResourceConfig = ResourceConfig {
    path: "/patients",
    shape: EnvelopeShape {
        state_discriminator: true,
        total_pages: TotalPagesSource::Computed,
        entity_wrapped: true,
    },
    fallback_error: "Error while communicating with the patients service",
};

pub const PRODUCTS: ResourceConfig = ResourceConfig {
    path: "/products",
    shape: EnvelopeShape {
        state_discriminator: true,
        total_pages: TotalPagesSource::Server,
        entity_wrapped: true,
    },
    fallback_error: "Error while communicating with the products service",
};

/// Kardex responses carry no discriminator and return records unwrapped.
pub const KARDEX: ResourceConfig = ResourceConfig {
    path: "/kardex",
    shape: EnvelopeShape {
        state_discriminator: false,
        total_pages: TotalPagesSource::Server,
        entity_wrapped: false,
    },
    fallback_error: "Error while communicating with the kardex service",
};

#[async_trait]
pub trait PatientReader: Send + Sync {
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
pub trait PatientWriter: Send + Sync {
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
pub trait ProductReader: Send + Sync {
    async fn list_products(
        &self,
        params: &PaginatedSearchParams,
    ) -> RepositoryResult<PaginatedResponse<Product>>;
    async fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Product>;
}

#[async_trait]
pub trait ProductWriter: Send + Sync {
    async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    async fn update_product(
        &self,
        id: ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
}

#[async_trait]
pub trait KardexReader: Send + Sync {
    async fn list_kardex_movements(
        &self,
        params: &PaginatedSearchParams,
    ) -> RepositoryResult<PaginatedResponse<KardexMovement>>;
}

#[async_trait]
pub trait KardexWriter: Send + Sync {
    async fn create_kardex_movement(
        &self,
        movement: &NewKardexMovement,
    ) -> RepositoryResult<KardexMovement>;
}

/// Repository backed by the REST API. Holds no data of its own; every call
/// is an independent round trip.
pub struct HttpRepository<C> {
    api: Arc<ApiClient<C>>,
}

impl<C> Clone for HttpRepository<C> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<C: HttpClient> HttpRepository<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api: Arc::new(api) }
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: &ResourceConfig,
        params: &PaginatedSearchParams,
    ) -> RepositoryResult<PaginatedResponse<T>> {
        let response = self.api.get(resource.path, &params.query_pairs()).await;
        unwrap_page(resource, params, response)
    }

    async fn fetch_entity<T: DeserializeOwned>(
        &self,
        resource: &ResourceConfig,
        sub_path: &str,
    ) -> RepositoryResult<T> {
        let path = format!("{}{sub_path}", resource.path);
        let response = self.api.get(&path, &[]).await;
        unwrap_entity(resource, response)
    }

    async fn post_entity<B, T>(
        &self,
        resource: &ResourceConfig,
        sub_path: &str,
        body: &B,
    ) -> RepositoryResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let path = format!("{}{sub_path}", resource.path);
        let response = self.api.post(&path, body).await;
        unwrap_entity(resource, response)
    }

    async fn put_entity<B, T>(
        &self,
        resource: &ResourceConfig,
        sub_path: &str,
        body: &B,
    ) -> RepositoryResult<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let path = format!("{}{sub_path}", resource.path);
        let response = self.api.put(&path, body).await;
        unwrap_entity(resource, response)
    }
}
