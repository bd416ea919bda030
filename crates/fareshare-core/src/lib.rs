//! # fareshare-core: Pure Settlement Engine for FareShare
//!
//! This crate is the **heart** of FareShare. It turns a trip's shared expenses
//! into per-person balances and a short list of payments that settles them.
//! Everything here is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FareShare Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front End (CLI / web forms)                     │   │
//! │  │    Trip Setup ──► Add Expenses ──► Settle Up ──► Share Text     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ TripCommand                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ fareshare-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌────────────┐  ┌──────────┐     │   │
//! │  │   │   trip   │  │ balance  │  │ settlement │  │  report  │     │   │
//! │  │   │ reducer  │  │ per-user │  │  greedy    │  │ summary  │     │   │
//! │  │   │ commands │  │ net sums │  │  matching  │  │ category │     │   │
//! │  │   └──────────┘  └──────────┘  └────────────┘  └──────────┘     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ Trip (serde JSON)                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                fareshare-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Person, Expense, Trip, Settlement)
//! - [`balance`] - Net balance per person
//! - [`settlement`] - Debt minimizer (balances → payments)
//! - [`report`] - Per-person summaries, category breakdown, share text
//! - [`trip`] - Pure state reducer over [`Trip`]
//! - [`validation`] - Input rules enforced by the reducer, never by the engine
//! - [`money`] - Cent rounding and display formatting
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, including ordering
//! 2. **No I/O**: storage lives in `fareshare-db`
//! 3. **Permissive Engine**: the balance and settlement functions never fail;
//!    malformed input is the caller's problem
//! 4. **Explicit Errors**: the reducer returns typed errors, never panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fareshare_core::{calculate_balances, calculate_settlements};
//! use fareshare_core::types::{Expense, ExpenseCategory, Person, SplitType};
//!
//! let people = vec![
//!     Person::new("a", "Alice", 0),
//!     Person::new("b", "Bob", 1),
//!     Person::new("c", "Cara", 2),
//! ];
//! let dinner = Expense {
//!     id: "e1".to_string(),
//!     description: "Dinner".to_string(),
//!     amount: 90.0,
//!     paid_by: "a".to_string(),
//!     split_among: vec!["a".into(), "b".into(), "c".into()],
//!     split_type: SplitType::Equal,
//!     custom_splits: None,
//!     category: ExpenseCategory::Food,
//!     date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//! };
//!
//! let balances = calculate_balances(&people, &[dinner]);
//! assert_eq!(balances["a"], 60.0);
//!
//! let settlements = calculate_settlements(&balances);
//! assert_eq!(settlements.len(), 2);
//! assert!(settlements.iter().all(|s| s.to == "a" && s.amount == 30.0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod balance;
pub mod error;
pub mod money;
pub mod report;
pub mod settlement;
pub mod trip;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fareshare_core::Trip` instead of
// `use fareshare_core::types::Trip`

pub use balance::{calculate_balances, Balances};
pub use error::{CoreError, CoreResult, ValidationError};
pub use report::{category_breakdown, category_shares, person_summary, share_text, CategoryShare};
pub use settlement::{calculate_settlements, settle_expenses};
pub use trip::{reduce, TripCommand};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when a trip doesn't specify one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Display colors handed out to people in the order they join a trip.
///
/// The palette wraps around: the 11th person gets the first color again.
pub const PERSON_COLORS: [&str; 10] = [
    "#6366f1", // indigo
    "#ec4899", // pink
    "#14b8a6", // teal
    "#f97316", // orange
    "#8b5cf6", // violet
    "#06b6d4", // cyan
    "#eab308", // yellow
    "#ef4444", // red
    "#22c55e", // green
    "#64748b", // slate
];

/// Maximum length of a person's display name.
pub const MAX_PERSON_NAME_LEN: usize = 100;

/// Maximum length of an expense description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Maximum length of a trip name.
pub const MAX_TRIP_NAME_LEN: usize = 100;

/// Largest amount accepted for an expense or a custom share.
///
/// Keeps every balance sum well inside the range where `f64` still
/// resolves cents.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;
