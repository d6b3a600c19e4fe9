//! Bring-up configuration loading

mod bringup;

pub use bringup::*;
