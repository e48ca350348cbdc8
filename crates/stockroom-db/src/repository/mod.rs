//! # Repository Module
//!
//! One repository per collection, each a lightweight struct over the shared
//! `SqlitePool`:
//!
//! - [`product::ProductRepository`] - catalog records
//! - [`ledger::TransactionRepository`] - the append-only stock ledger
//! - [`order::OrderRepository`] - orders with nested order items
//!
//! Every method is tenant-scoped. Multi-step mutations (product creation
//! with its opening ledger entry, stock changes, order creation) run as
//! single SQL transactions; the `*_in_tx` helpers in [`ledger`] are shared
//! between the ledger and order paths so a sale recorded by an order is
//! byte-for-byte the same kind of entry as a manual one.

pub mod ledger;
pub mod order;
pub mod product;
