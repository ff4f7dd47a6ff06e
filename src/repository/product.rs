use async_trait::async_trait;

use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::ProductId;
use crate::http_client::HttpClient;
use crate::pagination::{PaginatedResponse, PaginatedSearchParams};
use crate::repository::errors::RepositoryResult;
use crate::repository::{HttpRepository, PRODUCTS, ProductReader, ProductWriter};

#[async_trait]
impl<C: HttpClient> ProductReader for HttpRepository<C> {
    async fn list_products(
        &self,
        params: &PaginatedSearchParams,
    ) -> RepositoryResult<PaginatedResponse<Product>> {
        self.fetch_page(&PRODUCTS, params).await
    }

    async fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Product> {
        self.fetch_entity(&PRODUCTS, &format!("/{id}")).await
    }
}

#[async_trait]
impl<C: HttpClient> ProductWriter for HttpRepository<C> {
    async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
        self.post_entity(&PRODUCTS, "", new_product).await
    }

    async fn update_product(
        &self,
        id: ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product> {
        self.put_entity(&PRODUCTS, &format!("/{id}"), updates).await
    }
}
