//! Derived metrics over fetched collections. Pure and synchronous.
mod cards;
mod charts;
mod totals;

pub use cards::*;
pub use charts::*;
pub use totals::*;
