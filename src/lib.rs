//! burgerbox — an interactive burger-vending kiosk simulator.
//!
//! The kiosk walks a single customer through a four-stage ordering flow
//! (bun, patties, toppings, payment) while enforcing stock limits, per-order
//! quantity caps, and periodic mandatory cleaning cycles.
//!
//! Module map:
//! - `inventory` — stock tracking and guarded consumption
//! - `order` — the in-progress burger and its stage
//! - `machine` — the stage-transition engine
//! - `session` — the orchestration loop and recovery policy
//! - `errors` — the recoverable error kinds the loop dispatches on
//! - `prompt` — the interactive input boundary
//! - `config` — optional `kiosk.toml` catalog and threshold overrides
//! - `ui` — console-styled output

pub mod config;
pub mod errors;
pub mod inventory;
pub mod machine;
pub mod order;
pub mod prompt;
pub mod session;
pub mod ui;
