//! # fareshare-db: Database Layer for FareShare
//!
//! This crate stores trips for the FareShare front ends.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FareShare Data Flow                              │
//! │                                                                         │
//! │  CLI command (fareshare expense add ...)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   fareshare-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐    │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │    │   │
//! │  │   │   (pool.rs)   │    │  (trip.rs)    │    │  (embedded)  │    │   │
//! │  │   │               │    │               │    │              │    │   │
//! │  │   │ SqlitePool    │◄───│ TripRepo      │    │ 001_init.sql │    │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘    │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   trips(id, name, payload JSON, created_at, updated_at)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Trip repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fareshare_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/fareshare.db")).await?;
//!
//! db.trips().save(&trip).await?;
//! let latest = db.trips().latest().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::trip::{TripRepository, TripRow};
