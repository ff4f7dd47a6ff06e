use async_trait::async_trait;

use crate::domain::kardex::{KardexMovement, NewKardexMovement};
use crate::http_client::HttpClient;
use crate::pagination::{PaginatedResponse, PaginatedSearchParams};
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, KARDEX, KardexReader, KardexWriter};

#[async_trait]
impl<C: HttpClient> KardexReader for HttpRepository<C> {
    async fn list_kardex_movements(
        &self,
        params: &PaginatedSearchParams,
    ) -> RepositoryResult<PaginatedResponse<KardexMovement>> {
        self.fetch_page(&KARDEX, params).await
    }
}

#[async_trait]
impl<C: HttpClient> KardexWriter for HttpRepository<C> {
    async fn create_kardex_movement(
        &self,
        movement: &NewKardexMovement,
    ) -> RepositoryResult<KardexMovement> {
        self.post_entity(&KARDEX, "", movement).await
    }
}
