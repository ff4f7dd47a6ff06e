use validator::Validate;

use crate::domain::product::{NewProduct, Product, ProductFilters};
use crate::pagination::PaginationController;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::ServiceResult;

/// Loads the controller's current page of products.
pub async fn load_products<R>(repo: &R, controller: &PaginationController<Product>)
where
    R: ProductReader + ?Sized,
{
    controller
        .load_data(|params| async move { repo.list_products(&params).await })
        .await;
}

/// Replaces the product filters and reloads from the first page.
pub async fn filter_products<R>(
    repo: &R,
    controller: &PaginationController<Product>,
    filters: ProductFilters,
) where
    R: ProductReader + ?Sized,
{
    controller.set_filters(filters.into());
    load_products(repo, controller).await;
}

/// Validates and creates a product.
pub async fn register_product<R>(repo: &R, new_product: &NewProduct) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    new_product.validate()?;
    Ok(repo.create_product(new_product).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CategoryId, ProductId};
    use crate::pagination::{FilterValue, PaginatedResponse};
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;

    /// Category filters are forwarded and the page resets.
    #[tokio::test]
    async fn filter_products_sends_category() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|params| {
                params.page == Some(1)
                    && params.filters.get("categoryId") == Some(&FilterValue::Number(2.0))
            })
            .times(1)
            .returning(|_| {
                Ok(PaginatedResponse::new(
                    vec![Product {
                        id: ProductId::new(1).expect("valid id"),
                        name: "Gauze".to_string(),
                        sku: None,
                        category_id: CategoryId::new(2).ok(),
                        price: 2.0,
                        stock: 5,
                    }],
                    1,
                    1,
                    15,
                    1,
                ))
            });
        let controller = PaginationController::default();
        controller.go_to_page(2);

        filter_products(
            &repo,
            &controller,
            ProductFilters {
                category_id: CategoryId::new(2).ok(),
            },
        )
        .await;

        assert_eq!(controller.current_page(), 1);
        assert_eq!(controller.state().data[0].name, "Gauze");
    }

    /// Products with a blank name are refused.
    #[tokio::test]
    async fn register_product_validates_name() {
        let mut repo = MockRepository::new();
        repo.expect_create_product().times(0);
        let product = NewProduct {
            name: String::new(),
            sku: None,
            category_id: None,
            price: 1.0,
            stock: 0,
        };

        let result = register_product(&repo, &product).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
