//! # Repository Module
//!
//! Database repository implementations for FareShare.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                            │
//! │       │                                                                 │
//! │       │  db.trips().latest()                                            │
//! │       ▼                                                                 │
//! │  TripRepository                                                         │
//! │  ├── save(&self, trip)        upsert                                    │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── latest(&self)                                                      │
//! │  ├── list(&self)              TripRow summaries                         │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`trip::TripRepository`] - Trip documents

pub mod trip;
