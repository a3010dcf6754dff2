//! Process-wide session state and the orchestration loop.
//!
//! `MachineSession` owns the inventory, the cumulative counters, and one
//! `OrderStateMachine`, and drives repeated order lifecycles: read the current
//! stage, solicit input through the [`Prompter`] boundary, delegate to the
//! machine, then apply the documented recovery policy to whatever comes back.
//! The loop is iterative by design; long sessions must not grow the stack.

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::config::KioskConfig;
use crate::errors::OrderError;
use crate::inventory::{Category, Inventory};
use crate::machine::{OrderStateMachine, SENTINEL_DONE, SENTINEL_NEXT};
use crate::order::Stage;
use crate::prompt::{PromptError, Prompter};
use crate::ui;

/// Reserved input that confirms a cleaning cycle (case-insensitive).
pub const SENTINEL_CLEAN: &str = "clean";
/// Reserved input that starts the next order after a sale.
pub const SENTINEL_ORDER: &str = "order";
/// Reserved input that ends the session after a sale.
pub const SENTINEL_QUIT: &str = "quit";

/// Counters that span orders: machine wear and the sales ledger.
///
/// `remaining_uses` starts at the cleaning threshold, is decremented by each
/// patty selection, and is reset to the threshold only by an explicit clean.
/// The totals are mutated only on successful payment.
#[derive(Debug, Clone)]
pub struct SessionCounters {
    remaining_uses: u32,
    cleaning_threshold: u32,
    total_sales: Decimal,
    total_burgers: u64,
}

impl SessionCounters {
    pub fn new(cleaning_threshold: u32) -> Self {
        Self {
            remaining_uses: cleaning_threshold,
            cleaning_threshold,
            total_sales: Decimal::ZERO,
            total_burgers: 0,
        }
    }

    pub fn remaining_uses(&self) -> u32 {
        self.remaining_uses
    }

    pub fn total_sales(&self) -> Decimal {
        self.total_sales
    }

    pub fn total_burgers(&self) -> u64 {
        self.total_burgers
    }

    pub fn needs_cleaning(&self) -> bool {
        self.remaining_uses == 0
    }

    /// Reset the wear counter to exactly the threshold.
    pub fn clean(&mut self) {
        self.remaining_uses = self.cleaning_threshold;
    }

    pub(crate) fn record_patty_use(&mut self) {
        self.remaining_uses = self.remaining_uses.saturating_sub(1);
    }

    pub(crate) fn record_sale(&mut self, amount: Decimal) {
        self.total_burgers += 1;
        self.total_sales += amount;
    }
}

enum Flow {
    Continue,
    Quit,
}

/// One kiosk session: created once per process run, loops until a `quit`
/// token after a sale or an abort at the prompter boundary.
pub struct MachineSession<P: Prompter> {
    inventory: Inventory,
    counters: SessionCounters,
    machine: OrderStateMachine,
    prompter: P,
}

impl<P: Prompter> MachineSession<P> {
    pub fn new(config: &KioskConfig, prompter: P) -> Self {
        Self {
            inventory: config.build_inventory(),
            counters: SessionCounters::new(config.machine.cleaning_threshold),
            machine: OrderStateMachine::with_limits(
                config.machine.max_patties,
                config.machine.max_toppings,
            ),
            prompter,
        }
    }

    pub fn counters(&self) -> &SessionCounters {
        &self.counters
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Drive the session until a graceful quit. Prompt-level errors
    /// (including abort) propagate untouched; every order error is handled
    /// here and the loop resumes at whatever stage the recovery left.
    pub fn run(&mut self) -> Result<(), PromptError> {
        loop {
            let flow = match self.machine.stage() {
                Stage::SelectingBun => self.bun_cycle()?,
                Stage::SelectingPatty => self.patty_cycle()?,
                Stage::SelectingTopping => self.topping_cycle()?,
                Stage::AwaitingPayment => self.pay_cycle()?,
            };
            match flow {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
            }
        }
    }

    fn bun_cycle(&mut self) -> Result<Flow, PromptError> {
        let choices = self.inventory.in_stock_names(Category::Bun).join(", ");
        let input = self
            .prompter
            .ask(&format!("What type of bun would you like ({choices})?"))?;
        match self.machine.choose_bun(&mut self.inventory, &input) {
            Ok(()) => ui::show_burger(self.machine.order()),
            Err(err) => self.recover(err)?,
        }
        Ok(Flow::Continue)
    }

    fn patty_cycle(&mut self) -> Result<Flow, PromptError> {
        let choices = self.inventory.in_stock_names(Category::Patty).join(", ");
        let input = self.prompter.ask(&format!(
            "What type of patty would you like ({choices})? Or type {SENTINEL_NEXT}."
        ))?;
        match self
            .machine
            .choose_patty(&mut self.inventory, &mut self.counters, &input)
        {
            Ok(()) => {}
            Err(err) => self.recover(err)?,
        }
        Ok(Flow::Continue)
    }

    fn topping_cycle(&mut self) -> Result<Flow, PromptError> {
        let choices = self.inventory.in_stock_names(Category::Topping).join(", ");
        let input = self.prompter.ask(&format!(
            "What topping would you like ({choices})? Or type {SENTINEL_DONE}."
        ))?;
        match self.machine.choose_topping(&mut self.inventory, &input) {
            Ok(()) => {}
            Err(err) => self.recover(err)?,
        }
        Ok(Flow::Continue)
    }

    fn pay_cycle(&mut self) -> Result<Flow, PromptError> {
        let expected = self.machine.expected_total();
        // Entered text is dispatched verbatim: the strict string comparison
        // in `pay` must see exactly what the customer typed.
        let input = self.prompter.ask(&format!(
            "Your total is ${expected:.2}, please enter the exact value"
        ))?;
        match self.machine.pay(&mut self.counters, &input) {
            Ok(amount) => {
                ui::thank_you(amount);
                info!(
                    total_sales = %self.counters.total_sales,
                    total_burgers = self.counters.total_burgers,
                    "sale committed"
                );
                let next = self.prompter.ask(&format!(
                    "What would you like to do? ({SENTINEL_ORDER} or {SENTINEL_QUIT})"
                ))?;
                if next == SENTINEL_QUIT {
                    return Ok(Flow::Quit);
                }
            }
            Err(err) => self.recover(err)?,
        }
        Ok(Flow::Continue)
    }

    /// The recovery policy: every expected error kind maps to a notification
    /// plus, where documented, a forced stage change. Anything unrecognized
    /// is logged and the loop resumes at the current stage.
    fn recover(&mut self, err: OrderError) -> Result<(), PromptError> {
        match err {
            OrderError::OutOfStock { ref name } => {
                warn!(item = %name, "selection out of stock");
                ui::notice("The selected option is out of stock. Please pick another option.");
            }
            OrderError::InvalidChoice { .. } => {
                ui::notice("That is not one of the options. Please choose from the list.");
            }
            OrderError::ExceededLimit {
                category: Category::Patty,
                limit,
            } => {
                warn!(limit, "patty cap reached, moving to toppings");
                ui::notice(&format!(
                    "You've reached the maximum of {limit} patties; please choose a topping."
                ));
                ui::show_burger(self.machine.order());
                self.machine.force_stage(Stage::SelectingTopping);
            }
            OrderError::ExceededLimit {
                category: Category::Topping,
                limit,
            } => {
                warn!(limit, "topping cap reached, moving to payment");
                ui::notice(&format!(
                    "You've reached the maximum of {limit} toppings; proceeding to payment."
                ));
                ui::show_burger(self.machine.order());
                self.machine.force_stage(Stage::AwaitingPayment);
            }
            OrderError::NoItemChosen => {
                ui::notice("Please choose at least one patty or topping.");
                self.machine.force_stage(Stage::SelectingPatty);
            }
            OrderError::NeedsCleaning => {
                let answer = self.prompter.ask(&format!(
                    "Sorry, the machine needs cleaning! Type '{SENTINEL_CLEAN}' to clean it"
                ))?;
                if answer.eq_ignore_ascii_case(SENTINEL_CLEAN) {
                    self.counters.clean();
                    info!("machine cleaned");
                    ui::notice("The machine has been cleaned, you can continue.");
                }
                // Anything else leaves the machine uncleaned; the same stage
                // re-prompts and the blocked selection is re-attempted.
            }
            OrderError::InvalidPayment { .. } => {
                ui::notice("You've entered the wrong amount. Please try again.");
            }
            // InvalidStage / InvalidCombination: sequencing bugs, not
            // reachable under normal loop discipline. Log and resume.
            other => {
                error!(error = %other, "unexpected order error");
                ui::notice("Something went wrong. Let's pick up where we left off.");
            }
        }
        Ok(())
    }
}
