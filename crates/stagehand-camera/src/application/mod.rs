//! Camera driver.

pub mod choreographer;
