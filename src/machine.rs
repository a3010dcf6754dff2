//! The stage-transition engine.
//!
//! `OrderStateMachine` owns the mutable [`Order`] and exposes one handler per
//! stage. Handlers validate the choice against the stage, the inventory, the
//! per-order caps, and the cleaning counter, then consume stock and advance.
//! Every failure is a matchable [`OrderError`]; the session loop decides the
//! recovery, including the documented force-advances.

use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::OrderError;
use crate::inventory::{Category, Inventory};
use crate::order::{Order, Stage};
use crate::session::SessionCounters;

/// Patty selections allowed before a mandatory clean.
pub const CLEANING_THRESHOLD: u32 = 15;
/// Per-order patty cap.
pub const MAX_PATTIES: u8 = 3;
/// Per-order topping cap.
pub const MAX_TOPPINGS: u8 = 3;

/// Reserved input that leaves the patty stage without a selection.
pub const SENTINEL_NEXT: &str = "next";
/// Reserved input that leaves the topping stage for payment.
pub const SENTINEL_DONE: &str = "done";

/// Drives one order at a time through the four stages. Replaced orders are
/// always fresh `Order`s at bun selection; the stage never regresses inside
/// the machine itself.
#[derive(Debug)]
pub struct OrderStateMachine {
    order: Order,
    max_patties: u8,
    max_toppings: u8,
}

impl OrderStateMachine {
    pub fn new() -> Self {
        Self::with_limits(MAX_PATTIES, MAX_TOPPINGS)
    }

    pub fn with_limits(max_patties: u8, max_toppings: u8) -> Self {
        Self {
            order: Order::new(),
            max_patties,
            max_toppings,
        }
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    pub fn stage(&self) -> Stage {
        self.order.stage()
    }

    /// Session-level recovery hook: jump the order to `stage` after a
    /// notified `ExceededLimit` or `NoItemChosen`.
    pub fn force_stage(&mut self, stage: Stage) {
        debug!(from = %self.order.stage(), to = %stage, "forcing stage");
        self.order.set_stage(stage);
    }

    /// Select the bun that anchors the order. Exactly one bun per order:
    /// nothing re-enters this stage short of a full order reset.
    pub fn choose_bun(&mut self, inventory: &mut Inventory, name: &str) -> Result<(), OrderError> {
        if self.order.stage() != Stage::SelectingBun {
            return Err(OrderError::InvalidStage {
                actual: self.order.stage(),
            });
        }
        let index = inventory.find_by_name(Category::Bun, name).ok_or_else(|| {
            OrderError::InvalidChoice {
                category: Category::Bun,
                name: name.to_string(),
            }
        })?;
        let selection = inventory.consume(Category::Bun, index)?;
        debug!(bun = %selection.name, "bun selected");
        self.order.add_bun(selection);
        self.order.set_stage(Stage::SelectingPatty);
        Ok(())
    }

    /// Select a patty, or advance to toppings on the `next` sentinel. Patty
    /// selections are what wear the machine down, so the cleaning counter is
    /// checked and decremented here and nowhere else.
    pub fn choose_patty(
        &mut self,
        inventory: &mut Inventory,
        counters: &mut SessionCounters,
        input: &str,
    ) -> Result<(), OrderError> {
        if self.order.is_empty() {
            return Err(OrderError::InvalidCombination {
                actual: self.order.stage(),
            });
        }
        if input == SENTINEL_NEXT {
            self.order.set_stage(Stage::SelectingTopping);
            return Ok(());
        }
        if self.order.stage() != Stage::SelectingPatty {
            return Err(OrderError::InvalidStage {
                actual: self.order.stage(),
            });
        }
        if counters.needs_cleaning() {
            return Err(OrderError::NeedsCleaning);
        }
        if self.order.patty_count() >= self.max_patties {
            return Err(OrderError::ExceededLimit {
                category: Category::Patty,
                limit: self.max_patties,
            });
        }
        let index = inventory.find_by_name(Category::Patty, input).ok_or_else(|| {
            OrderError::InvalidChoice {
                category: Category::Patty,
                name: input.to_string(),
            }
        })?;
        let selection = inventory.consume(Category::Patty, index)?;
        debug!(patty = %selection.name, count = self.order.patty_count() + 1, "patty selected");
        self.order.add_patty(selection);
        counters.record_patty_use();
        Ok(())
    }

    /// Select a topping, or move to payment on the `done` sentinel. Checkout
    /// requires at least one patty or topping; a bare bun raises
    /// `NoItemChosen` and the session sends the customer back to patties.
    pub fn choose_topping(
        &mut self,
        inventory: &mut Inventory,
        input: &str,
    ) -> Result<(), OrderError> {
        if self.order.is_empty() {
            return Err(OrderError::InvalidCombination {
                actual: self.order.stage(),
            });
        }
        if input == SENTINEL_DONE {
            if !self.order.has_patty_or_topping() {
                return Err(OrderError::NoItemChosen);
            }
            self.order.set_stage(Stage::AwaitingPayment);
            return Ok(());
        }
        if self.order.stage() != Stage::SelectingTopping {
            return Err(OrderError::InvalidStage {
                actual: self.order.stage(),
            });
        }
        if self.order.topping_count() >= self.max_toppings {
            return Err(OrderError::ExceededLimit {
                category: Category::Topping,
                limit: self.max_toppings,
            });
        }
        let index = inventory
            .find_by_name(Category::Topping, input)
            .ok_or_else(|| OrderError::InvalidChoice {
                category: Category::Topping,
                name: input.to_string(),
            })?;
        let selection = inventory.consume(Category::Topping, index)?;
        debug!(topping = %selection.name, count = self.order.topping_count() + 1, "topping selected");
        self.order.add_topping(selection);
        Ok(())
    }

    /// The amount the customer owes: unit costs summed in selection order,
    /// rounded to two decimal places.
    pub fn expected_total(&self) -> Decimal {
        self.order.cost()
    }

    /// Settle the order. The entered text must equal the expected total
    /// rendered with exactly two decimals; numerically equal but differently
    /// formatted input (such as "2.250") is rejected. On success the totals
    /// are committed and a fresh order replaces the paid one.
    pub fn pay(
        &mut self,
        counters: &mut SessionCounters,
        entered: &str,
    ) -> Result<Decimal, OrderError> {
        if self.order.stage() != Stage::AwaitingPayment {
            return Err(OrderError::InvalidStage {
                actual: self.order.stage(),
            });
        }
        let expected = self.expected_total();
        if entered != format!("{expected:.2}") {
            return Err(OrderError::InvalidPayment {
                entered: entered.to_string(),
            });
        }
        counters.record_sale(expected);
        debug!(amount = %expected, "payment accepted");
        self.order = Order::new();
        Ok(expected)
    }
}

impl Default for OrderStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
