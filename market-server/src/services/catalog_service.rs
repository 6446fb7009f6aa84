//! Catalog Service - product lookup with an in-memory snapshot store
//!
//! The intake pipeline only ever reads immutable snapshots of the catalog;
//! dashboard polling replaces snapshots wholesale, so readers never observe a
//! partially-applied update.

use parking_lot::RwLock;
use shared::AppResult;
use shared::error::AppError;
use shared::models::{CatalogProduct, EnvironmentalMetrics, ProductCreate, Unit};
use std::collections::HashMap;

/// Unified catalog service
///
/// Write path is append-only (`add`); the pipeline consumes `snapshot()`.
#[derive(Default)]
pub struct CatalogService {
    products: RwLock<HashMap<String, CatalogProduct>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogService")
            .field("products", &self.products.read().len())
            .finish()
    }
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full catalog snapshot, sorted by category then display name
    pub fn snapshot(&self) -> Vec<CatalogProduct> {
        let mut products: Vec<CatalogProduct> = self.products.read().values().cloned().collect();
        products.sort_by(|a, b| {
            (a.category.as_str(), a.name.as_str(), a.variety.as_deref())
                .cmp(&(b.category.as_str(), b.name.as_str(), b.variety.as_deref()))
        });
        products
    }

    /// Look up a single product by id
    pub fn get(&self, id: &str) -> Option<CatalogProduct> {
        self.products.read().get(id).cloned()
    }

    /// Append a product to the catalog
    pub fn add(&self, payload: ProductCreate) -> AppResult<CatalogProduct> {
        if payload.name.trim().is_empty() {
            return Err(AppError::validation("product name must not be empty"));
        }
        if !payload.unit_price.is_finite() || payload.unit_price < 0.0 {
            return Err(AppError::validation(format!(
                "unit_price must be a non-negative number, got {}",
                payload.unit_price
            )));
        }

        let product = CatalogProduct {
            id: format!("prod-{}", uuid::Uuid::new_v4()),
            name: payload.name,
            variety: payload.variety,
            category: payload.category,
            unit: payload.unit,
            unit_price: payload.unit_price,
            image: payload.image.unwrap_or_default(),
            metrics: payload.metrics.unwrap_or_default(),
            is_active: true,
        };

        self.products
            .write()
            .insert(product.id.clone(), product.clone());
        tracing::info!(product_id = %product.id, name = %product.name, "catalog product added");
        Ok(product)
    }

    /// One-line-per-product summary passed to the AI parser as context
    pub fn summary_for_parser(&self) -> String {
        self.snapshot()
            .iter()
            .filter(|p| p.is_active)
            .map(|p| {
                format!(
                    "{} | {} | {:.2}/{}",
                    p.id,
                    p.display_name(),
                    p.unit_price,
                    p.unit
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Seed the demo produce catalog (development and tests)
    pub fn seed_demo(&self) {
        let demo = [
            ("Bananas", Some("Cavendish"), "Fruit", Unit::Kg, 1.20, 480.0, 790.0),
            ("Bananas", Some("Plantain"), "Fruit", Unit::Kg, 1.45, 510.0, 810.0),
            ("Tomatoes", Some("Roma"), "Vegetables", Unit::Kg, 3.00, 1400.0, 214.0),
            ("Avocados", Some("Hass"), "Fruit", Unit::Tray, 18.50, 2500.0, 1981.0),
            ("Oranges", None, "Fruit", Unit::Bag, 6.80, 390.0, 560.0),
            ("Cucumbers", None, "Vegetables", Unit::Each, 0.75, 320.0, 353.0),
            ("Potatoes", Some("Maris Piper"), "Vegetables", Unit::Loose, 0.95, 290.0, 287.0),
        ];

        let mut products = self.products.write();
        for (name, variety, category, unit, price, carbon, water) in demo {
            let product = CatalogProduct {
                id: format!("prod-{}", uuid::Uuid::new_v4()),
                name: name.to_string(),
                variety: variety.map(str::to_string),
                category: category.to_string(),
                unit,
                unit_price: price,
                image: String::new(),
                metrics: EnvironmentalMetrics {
                    carbon_grams: carbon,
                    water_liters: water,
                },
                is_active: true,
            };
            products.insert(product.id.clone(), product);
        }
        tracing::info!(count = products.len(), "demo catalog seeded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_snapshot() {
        let catalog = CatalogService::new();
        catalog
            .add(ProductCreate {
                name: "Lemons".to_string(),
                variety: None,
                category: "Fruit".to_string(),
                unit: Unit::Kg,
                unit_price: 2.1,
                image: None,
                metrics: None,
            })
            .unwrap();

        let snapshot = catalog.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Lemons");
        assert!(catalog.get(&snapshot[0].id).is_some());
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let catalog = CatalogService::new();
        let err = catalog
            .add(ProductCreate {
                name: "Lemons".to_string(),
                variety: None,
                category: "Fruit".to_string(),
                unit: Unit::Kg,
                unit_price: -1.0,
                image: None,
                metrics: None,
            })
            .unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_demo_seed_has_two_banana_varieties() {
        let catalog = CatalogService::new();
        catalog.seed_demo();
        let bananas: Vec<_> = catalog
            .snapshot()
            .into_iter()
            .filter(|p| p.name == "Bananas")
            .collect();
        assert_eq!(bananas.len(), 2);
    }
}
