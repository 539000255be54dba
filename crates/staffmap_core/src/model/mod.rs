//! In-memory entity shapes mapped onto the `departments` and `employees`
//! tables.
//!
//! # Responsibility
//! - Define the entity records and their field validators.
//! - Keep validation at assignment time, independent of storage constraints.
//!
//! # Invariants
//! - An entity value can only be observed in a fully validated state.
//! - `id` is assigned by storage; model code never invents ids.

pub mod department;
pub mod employee;
pub mod validation;
