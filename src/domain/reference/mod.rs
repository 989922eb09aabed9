//! Reference data: per-type id → display descriptor stores and their resolution.

pub mod error;
pub mod mappers;
pub mod reference_registry;
pub mod reference_store;
pub mod reference_type;
pub mod resolver;
