//! Placement driver.

pub mod validator;
