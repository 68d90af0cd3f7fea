//! The controller.

pub mod controller;
