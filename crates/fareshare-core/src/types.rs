//! # Domain Types
//!
//! Core domain types used throughout FareShare.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │      Trip       │   │      Expense        │   │   Settlement    │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id             │   │  id                 │   │  from (debtor)  │   │
//! │  │  name, dates    │──►│  amount             │   │  to (creditor)  │   │
//! │  │  currency       │   │  paid_by ──────────┐│   │  amount         │   │
//! │  │  people ────────┼─┐ │  split_among ─────┐││   └─────────────────┘   │
//! │  │  expenses       │ │ │  split_type        │││                         │
//! │  └─────────────────┘ │ │  custom_splits     │││   ┌─────────────────┐   │
//! │                      │ │  category, date    │││   │  PersonSummary  │   │
//! │  ┌─────────────────┐ │ └─────────────────────┘│   │  ─────────────  │   │
//! │  │     Person      │◄┘◄──────────────────────┘│   │  total_paid     │   │
//! │  │  id, name,color │◄─────────────────────────┘   │  total_owes     │   │
//! │  └─────────────────┘                              │  net            │   │
//! │                                                   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! All records serialize with camelCase fields (`paidBy`, `splitAmong`,
//! `customSplits`) so stored trips and the web front end share one format.
//! Person references are plain string ids; nothing here checks that they
//! resolve.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::{DEFAULT_CURRENCY, PERSON_COLORS};

/// Identifier of a person on a trip.
pub type PersonId = String;

/// Generates a fresh identifier for a trip, person, or expense.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Person
// =============================================================================

/// Someone sharing the trip's costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Person {
    /// Stable identifier, referenced by expenses.
    pub id: PersonId,

    /// Display name (mutable).
    pub name: String,

    /// Display color, a hex string from [`PERSON_COLORS`].
    pub color: String,
}

impl Person {
    /// Creates a person whose color is picked by their position on the trip.
    ///
    /// ## Example
    /// ```rust
    /// use fareshare_core::types::Person;
    ///
    /// let first = Person::new("p1", "Alice", 0);
    /// let eleventh = Person::new("p11", "Kai", 10);
    /// assert_eq!(first.color, eleventh.color); // palette wraps around
    /// ```
    pub fn new(id: impl Into<PersonId>, name: impl Into<String>, position: usize) -> Self {
        Person {
            id: id.into(),
            name: name.into(),
            color: PERSON_COLORS[position % PERSON_COLORS.len()].to_string(),
        }
    }
}

// =============================================================================
// Split Type
// =============================================================================

/// How an expense is divided among its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// Everyone in the split owes `amount / participants`.
    #[default]
    Equal,
    /// Each participant owes the amount listed in `custom_splits`.
    Custom,
}

impl fmt::Display for SplitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitType::Equal => write!(f, "equal"),
            SplitType::Custom => write!(f, "custom"),
        }
    }
}

// =============================================================================
// Expense Category
// =============================================================================

/// Category tag used for the spending breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Lodging,
    Food,
    Transport,
    Activities,
    Drinks,
    Groceries,
    Other,
}

impl ExpenseCategory {
    /// Every category, in display order.
    pub const ALL: [ExpenseCategory; 7] = [
        ExpenseCategory::Lodging,
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Activities,
        ExpenseCategory::Drinks,
        ExpenseCategory::Groceries,
        ExpenseCategory::Other,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Lodging => "Lodging",
            ExpenseCategory::Food => "Food & Dining",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Activities => "Activities",
            ExpenseCategory::Drinks => "Drinks",
            ExpenseCategory::Groceries => "Groceries",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Icon shown next to the label.
    pub fn icon(&self) -> &'static str {
        match self {
            ExpenseCategory::Lodging => "🏨",
            ExpenseCategory::Food => "🍽️",
            ExpenseCategory::Transport => "🚗",
            ExpenseCategory::Activities => "🎯",
            ExpenseCategory::Drinks => "🍻",
            ExpenseCategory::Groceries => "🛒",
            ExpenseCategory::Other => "📦",
        }
    }

    /// The serialized tag (`"food"`, `"lodging"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Lodging => "lodging",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Activities => "activities",
            ExpenseCategory::Drinks => "drinks",
            ExpenseCategory::Groceries => "groceries",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ExpenseCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!(
                    "'{}' is not one of: {}",
                    s,
                    ExpenseCategory::ALL.map(|c| c.as_str()).join(", ")
                ),
            })
    }
}

// =============================================================================
// Expense
// =============================================================================

/// One shared cost paid by a single person.
///
/// ## Invariants (caller-enforced)
/// - `split_among` is non-empty
/// - `paid_by` does not have to be in `split_among`
/// - under [`SplitType::Custom`], `custom_splits` values need not add up to
///   `amount`; participants missing from the map owe nothing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,

    /// What the money was spent on.
    pub description: String,

    /// Total cost in currency units (two decimals).
    pub amount: f64,

    /// Person who paid.
    pub paid_by: PersonId,

    /// People who share the cost.
    pub split_among: Vec<PersonId>,

    pub split_type: SplitType,

    /// Person id → amount owed. Only read under [`SplitType::Custom`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<std::collections::HashMap<String, f64>>")]
    pub custom_splits: Option<IndexMap<PersonId, f64>>,

    pub category: ExpenseCategory,

    /// Calendar date of the expense (`YYYY-MM-DD`).
    #[ts(as = "String")]
    pub date: NaiveDate,
}

/// An expense as entered, before it has an id.
///
/// The trip reducer validates a draft and turns it into an [`Expense`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub paid_by: PersonId,
    pub split_among: Vec<PersonId>,
    pub split_type: SplitType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional, as = "Option<std::collections::HashMap<String, f64>>")]
    pub custom_splits: Option<IndexMap<PersonId, f64>>,
    pub category: ExpenseCategory,
    #[ts(as = "String")]
    pub date: NaiveDate,
}

impl ExpenseDraft {
    /// Attaches an id, producing a full expense.
    pub fn into_expense(self, id: impl Into<String>) -> Expense {
        Expense {
            id: id.into(),
            description: self.description,
            amount: self.amount,
            paid_by: self.paid_by,
            split_among: self.split_among,
            split_type: self.split_type,
            custom_splits: self.custom_splits,
            category: self.category,
            date: self.date,
        }
    }
}

// =============================================================================
// Trip
// =============================================================================

/// The whole state of one trip.
///
/// This is the explicit state object that the reducer in [`crate::trip`]
/// transforms and that `fareshare-db` stores as JSON. Balances and
/// settlements are never stored here; they are recomputed from `expenses`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub people: Vec<Person>,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// ISO 4217 code used when formatting amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Trip {
    /// Creates an empty trip with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Trip {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            people: Vec::new(),
            expenses: Vec::new(),
            currency: default_currency(),
        }
    }

    /// Looks up a person by id.
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    /// Display name for a person id, `"Unknown"` when the id doesn't resolve.
    pub fn person_name<'a>(&'a self, id: &str) -> &'a str {
        self.person(id).map(|p| p.name.as_str()).unwrap_or("Unknown")
    }

    /// Looks up an expense by id.
    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Sum of every expense amount.
    pub fn total_spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// A trip is ready for expenses once it has a name and two people.
    pub fn is_ready(&self) -> bool {
        !self.name.trim().is_empty() && self.people.len() >= 2
    }
}

impl Default for Trip {
    fn default() -> Self {
        Trip::new(generate_id())
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// A single directed payment that reduces debts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    /// Debtor paying.
    pub from: PersonId,
    /// Creditor receiving.
    pub to: PersonId,
    /// Amount in currency units, rounded to cents.
    pub amount: f64,
}

// =============================================================================
// Person Summary
// =============================================================================

/// What one person paid and owes across the trip, each rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub total_paid: f64,
    pub total_owes: f64,
    pub net: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
