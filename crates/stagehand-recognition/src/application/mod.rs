//! Recognition driver.

pub mod gate;
