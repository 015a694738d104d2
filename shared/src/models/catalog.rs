//! Catalog and party rows read by the order pipeline

use super::geo::Coordinate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store site entity (a physical branch of a store)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct StoreSite {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StoreSite {
    /// Site coordinate, present only when both components are set
    pub fn location(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        }
    }
}

/// Customer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in currency units
    pub price: f64,
    pub enabled: bool,
}

/// Modifier option entity (size, sauce, extra)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ModifierOption {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub name: String,
    /// Flat add-on price per cart line
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(latitude: Option<f64>, longitude: Option<f64>) -> StoreSite {
        StoreSite {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            name: Some("Maarif".to_string()),
            address: None,
            phone: None,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_location_requires_both_components() {
        assert_eq!(
            site(Some(33.5945), Some(-7.4992)).location(),
            Some(Coordinate::new(33.5945, -7.4992))
        );
        assert_eq!(site(Some(33.5945), None).location(), None);
        assert_eq!(site(None, Some(-7.4992)).location(), None);
        assert_eq!(site(None, None).location(), None);
    }
}
