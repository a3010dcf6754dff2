//! Typed error kinds for the kiosk ordering flow.
//!
//! Every variant is an *expected, recoverable* condition: the session loop
//! pattern-matches on the kind to choose a recovery action instead of
//! unwinding. Only an aborted prompt terminates the process, and that path
//! lives in `crate::prompt`, not here.

use thiserror::Error;

use crate::inventory::Category;
use crate::order::Stage;

/// Errors raised by the order state machine and inventory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// A selection arrived while the order was in a different stage. Under
    /// normal loop discipline this indicates a sequencing bug in the caller.
    #[error("selection out of sequence during {actual}")]
    InvalidStage { actual: Stage },

    #[error("\"{name}\" is out of stock")]
    OutOfStock { name: String },

    #[error("\"{name}\" is not a known {category}")]
    InvalidChoice { category: Category, name: String },

    #[error("no more than {limit} {category} selections per order")]
    ExceededLimit { category: Category, limit: u8 },

    #[error("at least one patty or topping is required before checkout")]
    NoItemChosen,

    #[error("the machine needs cleaning before more patties can be grilled")]
    NeedsCleaning,

    #[error("entered amount \"{entered}\" does not match the total")]
    InvalidPayment { entered: String },

    /// The order was empty at a stage that requires a bun to exist already.
    /// Unreachable under the bun-first rule; kept as a structural guard.
    #[error("order is empty at the {actual} stage")]
    InvalidCombination { actual: Stage },
}
