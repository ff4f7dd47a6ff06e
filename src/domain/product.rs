use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{CategoryId, ProductId};
use crate::pagination::{FilterMap, FilterValue};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock: i64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Typed filters for the product list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFilters {
    pub category_id: Option<CategoryId>,
}

impl From<ProductFilters> for FilterMap {
    fn from(filters: ProductFilters) -> Self {
        let mut map = FilterMap::new();
        if let Some(category_id) = filters.category_id {
            map.insert("categoryId".to_string(), FilterValue::from(category_id.get()));
        }
        map
    }
}
