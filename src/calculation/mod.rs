//! Calculation logic for the Payroll Computation Engine.
//!
//! This module contains the three payroll calculations and their shared
//! clock-time utilities: break penalty detection over raw clock events,
//! tip pool distribution with exact penny reconciliation, and gross pay
//! aggregation.

mod break_penalty;
mod clock_time;
mod gross_pay;
mod tip_pool;

pub use break_penalty::{
    BreakDetection, detect_break_penalties, required_break_hours, round_up_to_increment,
};
pub use clock_time::{parse_clock_time, parse_flexible_date, span_hours};
pub use gross_pay::{GrossPay, calculate_gross_pay};
pub use tip_pool::{TipAllocation, allocate_tips};
