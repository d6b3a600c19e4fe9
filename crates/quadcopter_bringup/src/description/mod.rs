//! Launch description model and its renderings

mod entity;
mod frontend;
mod plan;

pub use entity::*;
pub use frontend::*;
