//! Kiosk configuration loaded from an optional `kiosk.toml`.
//!
//! Every field has a built-in default, so the kiosk runs with no file at all.
//! A config file can re-stock or re-price the catalog and tune the machine
//! thresholds without touching code.
//!
//! # Configuration file format
//!
//! ```toml
//! [machine]
//! cleaning_threshold = 15
//! max_patties = 3
//! max_toppings = 3
//!
//! [[catalog.buns]]
//! name = "White Burger Bun"
//! quantity = 10
//! cost = "1.00"
//!
//! [[catalog.patties]]
//! name = "Beef"
//! quantity = 10
//! cost = "1.00"
//!
//! [[catalog.toppings]]
//! name = "Cheese"
//! quantity = 10
//! cost = "0.25"
//! ```
//!
//! Costs are decimal strings so prices stay exact.

use std::path::Path;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inventory::{Inventory, Item};
use crate::machine::{CLEANING_THRESHOLD, MAX_PATTIES, MAX_TOPPINGS};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "kiosk.toml";

/// Top-level kiosk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KioskConfig {
    #[serde(default)]
    pub machine: MachineConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Machine thresholds and per-order caps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Patty selections allowed before a mandatory clean.
    #[serde(default = "default_cleaning_threshold")]
    pub cleaning_threshold: u32,
    /// Per-order patty cap.
    #[serde(default = "default_max_patties")]
    pub max_patties: u8,
    /// Per-order topping cap.
    #[serde(default = "default_max_toppings")]
    pub max_toppings: u8,
}

fn default_cleaning_threshold() -> u32 {
    CLEANING_THRESHOLD
}

fn default_max_patties() -> u8 {
    MAX_PATTIES
}

fn default_max_toppings() -> u8 {
    MAX_TOPPINGS
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            cleaning_threshold: default_cleaning_threshold(),
            max_patties: default_max_patties(),
            max_toppings: default_max_toppings(),
        }
    }
}

/// The stocked catalog, one list per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_buns")]
    pub buns: Vec<ItemSpec>,
    #[serde(default = "default_patties")]
    pub patties: Vec<ItemSpec>,
    #[serde(default = "default_toppings")]
    pub toppings: Vec<ItemSpec>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            buns: default_buns(),
            patties: default_patties(),
            toppings: default_toppings(),
        }
    }
}

/// One catalog entry as configured.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub cost: Decimal,
}

fn default_quantity() -> u32 {
    10
}

fn entry(name: &str, quantity: u32, cost_cents: i64) -> ItemSpec {
    ItemSpec {
        name: name.to_string(),
        quantity,
        cost: Decimal::new(cost_cents, 2),
    }
}

fn default_buns() -> Vec<ItemSpec> {
    vec![
        entry("No Bun", 10, 0),
        entry("White Burger Bun", 10, 100),
        entry("Wheat Burger Bun", 10, 125),
        entry("Lettuce Wrap", 10, 150),
    ]
}

fn default_patties() -> Vec<ItemSpec> {
    vec![
        entry("Turkey", 20, 100),
        entry("Veggie", 20, 100),
        entry("Beef", 10, 100),
    ]
}

fn default_toppings() -> Vec<ItemSpec> {
    vec![
        entry("Lettuce", 10, 25),
        entry("Tomato", 10, 25),
        entry("Pickles", 10, 25),
        entry("Cheese", 10, 25),
        entry("Ketchup", 10, 25),
        entry("Mayo", 10, 25),
        entry("Mustard", 10, 25),
        entry("BBQ", 10, 25),
    ]
}

impl KioskConfig {
    /// Load the configuration. An explicitly given path must exist and
    /// parse; without one, a `kiosk.toml` in the working directory is used
    /// when present, and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a config file, rejecting catalogs with negative prices.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        for spec in config.all_items() {
            if spec.cost.is_sign_negative() {
                bail!(
                    "Invalid config {}: \"{}\" has a negative cost ({})",
                    path.display(),
                    spec.name,
                    spec.cost
                );
            }
        }
        Ok(config)
    }

    /// Non-fatal configuration smells, reported as human-readable warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.machine.cleaning_threshold == 0 {
            warnings.push(
                "cleaning_threshold is 0: every patty sale is blocked until a manual clean"
                    .to_string(),
            );
        }
        if self.machine.max_patties == 0 && self.machine.max_toppings == 0 {
            warnings.push(
                "max_patties and max_toppings are both 0: no order can ever reach checkout"
                    .to_string(),
            );
        }
        if self.catalog.buns.is_empty() {
            warnings.push("no buns configured: every order will stall at the first stage".to_string());
        }
        for (label, items) in [
            ("buns", &self.catalog.buns),
            ("patties", &self.catalog.patties),
            ("toppings", &self.catalog.toppings),
        ] {
            for (i, spec) in items.iter().enumerate() {
                let duplicated = items[..i]
                    .iter()
                    .any(|other| other.name.eq_ignore_ascii_case(&spec.name));
                if duplicated {
                    warnings.push(format!(
                        "duplicate {label} entry \"{}\": only the first is ever selectable",
                        spec.name
                    ));
                }
            }
        }
        warnings
    }

    /// Materialize the configured catalog as a live inventory.
    pub fn build_inventory(&self) -> Inventory {
        let build = |specs: &[ItemSpec]| {
            specs
                .iter()
                .map(|spec| Item::new(spec.name.clone(), spec.quantity, spec.cost))
                .collect()
        };
        Inventory::new(
            build(&self.catalog.buns),
            build(&self.catalog.patties),
            build(&self.catalog.toppings),
        )
    }

    fn all_items(&self) -> impl Iterator<Item = &ItemSpec> {
        self.catalog
            .buns
            .iter()
            .chain(self.catalog.patties.iter())
            .chain(self.catalog.toppings.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Category;
    use std::io::Write;

    #[test]
    fn defaults_match_the_stock_machine() {
        let config = KioskConfig::default();
        assert_eq!(config.machine.cleaning_threshold, 15);
        assert_eq!(config.machine.max_patties, 3);
        assert_eq!(config.machine.max_toppings, 3);
        assert_eq!(config.catalog.buns.len(), 4);
        assert_eq!(config.catalog.patties.len(), 3);
        assert_eq!(config.catalog.toppings.len(), 8);
    }

    #[test]
    fn default_inventory_prices_are_exact() {
        let inventory = KioskConfig::default().build_inventory();
        let index = inventory.find_by_name(Category::Bun, "wheat burger bun").unwrap();
        assert_eq!(inventory.items(Category::Bun)[index].unit_cost(), Decimal::new(125, 2));
        let index = inventory.find_by_name(Category::Topping, "bbq").unwrap();
        assert_eq!(inventory.items(Category::Topping)[index].unit_cost(), Decimal::new(25, 2));
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let config: KioskConfig = toml::from_str(
            r#"
            [machine]
            cleaning_threshold = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.machine.cleaning_threshold, 5);
        assert_eq!(config.machine.max_patties, 3);
        assert_eq!(config.catalog.buns.len(), 4);
    }

    #[test]
    fn catalog_override_replaces_a_category() {
        let config: KioskConfig = toml::from_str(
            r#"
            [[catalog.patties]]
            name = "Bison"
            quantity = 4
            cost = "2.50"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.patties.len(), 1);
        assert_eq!(config.catalog.patties[0].cost, Decimal::new(250, 2));
        // untouched categories keep their defaults
        assert_eq!(config.catalog.toppings.len(), 8);
    }

    #[test]
    fn explicitly_given_missing_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(KioskConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn from_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
            [machine]
            max_patties = 2

            [[catalog.buns]]
            name = "Pretzel Bun"
            cost = "1.75"
            "#
        )
        .unwrap();

        let config = KioskConfig::from_file(&path).unwrap();
        assert_eq!(config.machine.max_patties, 2);
        assert_eq!(config.catalog.buns[0].name, "Pretzel Bun");
        assert_eq!(config.catalog.buns[0].quantity, 10);
    }

    #[test]
    fn negative_cost_is_rejected_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
            [[catalog.toppings]]
            name = "Refund Sauce"
            cost = "-0.25"
            "#,
        )
        .unwrap();

        let err = KioskConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("negative cost"));
    }

    #[test]
    fn validate_flags_a_zero_cleaning_threshold() {
        let mut config = KioskConfig::default();
        config.machine.cleaning_threshold = 0;
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("cleaning_threshold")));
    }

    #[test]
    fn validate_flags_duplicate_names_case_insensitively() {
        let mut config = KioskConfig::default();
        config.catalog.patties.push(entry("BEEF", 5, 100));
        let warnings = config.validate();
        assert!(warnings.iter().any(|w| w.contains("duplicate")));
    }

    #[test]
    fn validate_is_quiet_on_the_defaults() {
        assert!(KioskConfig::default().validate().is_empty());
    }
}
