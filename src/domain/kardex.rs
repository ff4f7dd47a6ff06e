//! Inventory movements ("Kardex") recorded per product.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{KardexMovementId, ProductId};
use crate::pagination::{FilterMap, FilterValue};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum KardexMovementType {
    Entry,
    Exit,
}

impl KardexMovementType {
    pub fn as_str(self) -> &'static str {
        match self {
            KardexMovementType::Entry => "entry",
            KardexMovementType::Exit => "exit",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KardexMovement {
    pub id: KardexMovementId,
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub movement_type: KardexMovementType,
    pub quantity: i64,
    #[serde(default)]
    pub unit_cost: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewKardexMovement {
    pub product_id: ProductId,
    #[serde(rename = "type")]
    pub movement_type: KardexMovementType,
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Typed filters for the Kardex list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KardexFilters {
    pub product_id: Option<ProductId>,
    pub movement_type: Option<KardexMovementType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl From<KardexFilters> for FilterMap {
    fn from(filters: KardexFilters) -> Self {
        let mut map = FilterMap::new();
        if let Some(product_id) = filters.product_id {
            map.insert("productId".to_string(), FilterValue::from(product_id.get()));
        }
        if let Some(movement_type) = filters.movement_type {
            map.insert("type".to_string(), FilterValue::from(movement_type.as_str()));
        }
        if let Some(start) = filters.start_date {
            map.insert(
                "startDate".to_string(),
                FilterValue::from(start.format(DATE_FORMAT).to_string()),
            );
        }
        if let Some(end) = filters.end_date {
            map.insert(
                "endDate".to_string(),
                FilterValue::from(end.format(DATE_FORMAT).to_string()),
            );
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::pagination::PaginatedSearchParams;

    #[test]
    fn kardex_filters_produce_backend_keys() {
        let filters = KardexFilters {
            product_id: Some(ProductId::new(9).expect("valid id")),
            movement_type: Some(KardexMovementType::Exit),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        };

        let params = PaginatedSearchParams {
            filters: filters.into(),
            ..PaginatedSearchParams::new(1, 15)
        };

        assert_eq!(
            params.query_pairs(),
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "15".to_string()),
                ("endDate".to_string(), "2024-03-31".to_string()),
                ("productId".to_string(), "9".to_string()),
                ("startDate".to_string(), "2024-03-01".to_string()),
                ("type".to_string(), "exit".to_string()),
            ]
        );
    }

    #[test]
    fn movement_type_uses_type_key_on_the_wire() {
        let movement: KardexMovement = serde_json::from_value(json!({
            "id": 1,
            "productId": 2,
            "type": "entry",
            "quantity": 10
        }))
        .expect("valid movement");

        assert_eq!(movement.movement_type, KardexMovementType::Entry);
        assert_eq!(movement.unit_cost, None);
    }
}
