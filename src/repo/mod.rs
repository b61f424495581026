//! Repository layer: CRUD against the store, one module per entity.
//!
//! Every mutating operation verifies ownership through
//! [`crate::ownership`] first, then executes a single id-plus-ownership
//! scoped statement and checks the affected-row count, so a row vanishing
//! between the check and the write yields a clean `NotFound` instead of
//! acting on someone else's data.

pub mod boards;
pub mod columns;
pub mod tasks;
pub mod users;
