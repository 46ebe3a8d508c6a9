//! Inventory Ledger: the transactional core.
//!
//! Every mutation here is one database transaction pairing the state change
//! with its audit entry — both commit or neither does. Concurrency safety
//! comes from the store (conditional updates under SQLite's write lock),
//! never from in-process locks.

pub mod product;
pub mod sale;
