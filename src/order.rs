//! The in-progress burger: selections in the order the customer made them,
//! the current stage, and the per-order counters the limit rules read.

use std::fmt;

use rust_decimal::Decimal;

use crate::inventory::Category;

/// One phase of the ordering state machine. Stages only advance forward, or
/// the whole order is discarded for a fresh one; the single sanctioned
/// regression (toppings back to patties after `NoItemChosen`) is applied by
/// the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SelectingBun,
    SelectingPatty,
    SelectingTopping,
    AwaitingPayment,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::SelectingBun => write!(f, "bun selection"),
            Stage::SelectingPatty => write!(f, "patty selection"),
            Stage::SelectingTopping => write!(f, "topping selection"),
            Stage::AwaitingPayment => write!(f, "payment"),
        }
    }
}

/// Snapshot of a consumed catalog item, taken at selection time so the order
/// keeps its price even as inventory mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub name: String,
    pub category: Category,
    pub unit_cost: Decimal,
}

/// The burger being assembled. Created at the start of each customer
/// interaction and replaced wholesale after a successful payment.
#[derive(Debug, Clone)]
pub struct Order {
    selections: Vec<Selection>,
    stage: Stage,
    patty_count: u8,
    topping_count: u8,
}

impl Order {
    pub fn new() -> Self {
        Self {
            selections: Vec::new(),
            stage: Stage::SelectingBun,
            patty_count: 0,
            topping_count: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn patty_count(&self) -> u8 {
        self.patty_count
    }

    pub fn topping_count(&self) -> u8 {
        self.topping_count
    }

    pub(crate) fn add_bun(&mut self, selection: Selection) {
        self.selections.push(selection);
    }

    pub(crate) fn add_patty(&mut self, selection: Selection) {
        self.selections.push(selection);
        self.patty_count += 1;
    }

    pub(crate) fn add_topping(&mut self, selection: Selection) {
        self.selections.push(selection);
        self.topping_count += 1;
    }

    /// Whether checkout is allowed: a bun alone is not a sellable burger.
    pub fn has_patty_or_topping(&self) -> bool {
        self.selections
            .iter()
            .any(|s| matches!(s.category, Category::Patty | Category::Topping))
    }

    /// Sum of unit costs in selection order, rounded to two decimal places.
    pub fn cost(&self) -> Decimal {
        self.selections
            .iter()
            .map(|s| s.unit_cost)
            .sum::<Decimal>()
            .round_dp(2)
    }

    /// Comma-joined item names in selection order, for display.
    pub fn summary(&self) -> String {
        self.selections
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}
