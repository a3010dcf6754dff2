//! Console-styled output for the kiosk.

use console::style;
use rust_decimal::Decimal;

use crate::order::Order;
use crate::session::SessionCounters;

pub fn banner() {
    println!("{}", style("burgerbox — burger vending machine").bold());
    println!(
        "{}",
        style("Build your burger one step at a time. Answers are case-insensitive.").dim()
    );
    println!();
}

/// A yellow one-liner for recoverable conditions.
pub fn notice(message: &str) {
    println!("  {}", style(message).yellow());
}

pub fn show_burger(order: &Order) {
    println!("Current burger: {}", style(order.summary()).green());
}

pub fn thank_you(amount: Decimal) {
    println!(
        "{} (${amount:.2})",
        style("Thank you! Enjoy your burger!").green().bold()
    );
}

/// Closing receipt on graceful quit.
pub fn receipt(counters: &SessionCounters) {
    println!();
    println!("{}", style("Session receipt").bold());
    println!("  Burgers sold: {}", counters.total_burgers());
    println!("  Total sales:  ${:.2}", counters.total_sales());
    println!("{}", style("Quitting the burger machine").dim());
}
