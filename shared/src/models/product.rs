//! Catalog product model

use serde::{Deserialize, Serialize};

/// Sale unit for a catalog product
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    #[default]
    Kg,
    Tray,
    Each,
    Loose,
    Bag,
}

impl Unit {
    /// Short label for display ("100 kg", "3 trays")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Tray => "tray",
            Self::Each => "each",
            Self::Loose => "loose",
            Self::Bag => "bag",
        }
    }

    /// Lenient parse from free text ("kg", "kilos", "trays", ...).
    ///
    /// Returns `None` for units the catalog does not sell in; callers drop
    /// such lines rather than guessing.
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Some(Self::Kg),
            "tray" | "trays" => Some(Self::Tray),
            "each" | "unit" | "units" | "piece" | "pieces" => Some(Self::Each),
            "loose" => Some(Self::Loose),
            "bag" | "bags" | "sack" | "sacks" => Some(Self::Bag),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-unit environmental metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct EnvironmentalMetrics {
    /// Grams of CO2-equivalent per sale unit
    pub carbon_grams: f64,
    /// Liters of water per sale unit
    pub water_liters: f64,
}

/// Catalog product entity
///
/// Read-only from the intake pipeline's perspective; owned by the catalog
/// service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    /// Variety within the product name ("Cavendish", "Roma")
    pub variety: Option<String>,
    pub category: String,
    pub unit: Unit,
    /// Default price per sale unit
    pub unit_price: f64,
    pub image: String,
    pub metrics: EnvironmentalMetrics,
    pub is_active: bool,
}

impl CatalogProduct {
    /// Display name including variety ("Bananas (Cavendish)")
    pub fn display_name(&self) -> String {
        match &self.variety {
            Some(v) => format!("{} ({})", self.name, v),
            None => self.name.clone(),
        }
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub variety: Option<String>,
    pub category: String,
    pub unit: Unit,
    pub unit_price: f64,
    pub image: Option<String>,
    pub metrics: Option<EnvironmentalMetrics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parse_loose() {
        assert_eq!(Unit::parse_loose("KG"), Some(Unit::Kg));
        assert_eq!(Unit::parse_loose("kilos"), Some(Unit::Kg));
        assert_eq!(Unit::parse_loose("trays"), Some(Unit::Tray));
        assert_eq!(Unit::parse_loose("pallet"), None);
    }

    #[test]
    fn test_display_name_with_variety() {
        let p = CatalogProduct {
            id: "prod-1".to_string(),
            name: "Bananas".to_string(),
            variety: Some("Cavendish".to_string()),
            category: "Fruit".to_string(),
            unit: Unit::Kg,
            unit_price: 1.2,
            image: String::new(),
            metrics: EnvironmentalMetrics::default(),
            is_active: true,
        };
        assert_eq!(p.display_name(), "Bananas (Cavendish)");
    }
}
