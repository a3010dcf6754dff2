//! Stock tracking for the kiosk catalog.
//!
//! Each selectable item carries a quantity and a unit cost. Quantities are
//! mutated only through guarded consumption, which refuses to go below zero;
//! a zero-quantity item is unavailable, never removed.

use std::fmt;

use rust_decimal::Decimal;

use crate::errors::OrderError;
use crate::order::Selection;

/// The three catalog categories, one per selection stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bun,
    Patty,
    Topping,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Bun => write!(f, "bun"),
            Category::Patty => write!(f, "patty"),
            Category::Topping => write!(f, "topping"),
        }
    }
}

/// One selectable catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    name: String,
    quantity: u32,
    unit_cost: Decimal,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32, unit_cost: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_cost,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    /// Whether the item should be *offered*. The consume-time guard holds
    /// independently of this filter.
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    /// Decrement stock by one, returning the remaining quantity. Fails with
    /// `OutOfStock` when already at zero; the failed decrement is not applied.
    pub fn consume(&mut self) -> Result<u32, OrderError> {
        if self.quantity == 0 {
            return Err(OrderError::OutOfStock {
                name: self.name.clone(),
            });
        }
        self.quantity -= 1;
        Ok(self.quantity)
    }
}

/// The full catalog, grouped by category. Built once at session start from
/// `KioskConfig`; items are never added or removed afterwards.
#[derive(Debug, Clone)]
pub struct Inventory {
    buns: Vec<Item>,
    patties: Vec<Item>,
    toppings: Vec<Item>,
}

impl Inventory {
    pub fn new(buns: Vec<Item>, patties: Vec<Item>, toppings: Vec<Item>) -> Self {
        Self {
            buns,
            patties,
            toppings,
        }
    }

    pub fn items(&self, category: Category) -> &[Item] {
        match category {
            Category::Bun => &self.buns,
            Category::Patty => &self.patties,
            Category::Topping => &self.toppings,
        }
    }

    fn items_mut(&mut self, category: Category) -> &mut [Item] {
        match category {
            Category::Bun => &mut self.buns,
            Category::Patty => &mut self.patties,
            Category::Topping => &mut self.toppings,
        }
    }

    /// Case-insensitive exact-name lookup within a category.
    pub fn find_by_name(&self, category: Category, name: &str) -> Option<usize> {
        self.items(category)
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Consume one unit of the item at `index`, returning a selection
    /// snapshot for the order. `OutOfStock` leaves the quantity untouched.
    pub fn consume(&mut self, category: Category, index: usize) -> Result<Selection, OrderError> {
        let item = &mut self.items_mut(category)[index];
        item.consume()?;
        Ok(Selection {
            name: item.name.clone(),
            category,
            unit_cost: item.unit_cost,
        })
    }

    /// Lowercased names of everything still offered in a category, in catalog
    /// order. Feeds the prompt text.
    pub fn in_stock_names(&self, category: Category) -> Vec<String> {
        self.items(category)
            .iter()
            .filter(|item| item.in_stock())
            .map(|item| item.name.to_lowercase())
            .collect()
    }
}
