//! # stockroom-session: Tenant-Bound Operation Surface
//!
//! This crate is the surface UI callers talk to. A [`Session`] binds the
//! record store to one tenant and exposes the catalog, stock ledger, and
//! order operations, serving reads from an explicit session-owned cache.
//!
//! ## Operation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Every Mutation, Same Four Steps                       │
//! │                                                                         │
//! │   1. VALIDATE   stockroom-core validators, before any I/O              │
//! │   2. DELEGATE   one repository call (one SQL transaction)              │
//! │   3. LOG        tracing info!/warn! with structured fields             │
//! │   4. CACHE      optimistic update from the write's results             │
//! │                                                                         │
//! │  Reads (products(), orders(), transactions_for(..)) never touch the    │
//! │  store: they serve the cache, refreshed explicitly via refresh().      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use stockroom_core::{NewProduct, OrderLine, TransactionKind};
//! use stockroom_db::{Database, DbConfig};
//! use stockroom_session::Session;
//!
//! let db = Database::new(DbConfig::new("stockroom.db")).await?;
//! let session = Session::open(db, "tenant-1").await?;
//!
//! let lamp = session.create_product(NewProduct { /* ... */ }).await?;
//! session
//!     .apply_stock_change(&lamp.id, 20, TransactionKind::Restock, None, None)
//!     .await?;
//! let order = session
//!     .create_order(vec![OrderLine::for_product(&lamp, 2, 0)], None)
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod orders;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SessionError, SessionResult};
pub use orders::StockShortage;
pub use session::Session;
