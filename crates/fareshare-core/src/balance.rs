//! # Balance Calculator
//!
//! Turns a trip's expenses into one signed net balance per person.
//!
//! ## How Balances Move
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Expense: $90 dinner, paid by A, split equally among A, B, C            │
//! │                                                                         │
//! │  1. Credit the payer the full amount      A: +90                        │
//! │  2. Debit each participant their share    A: -30  B: -30  C: -30        │
//! │                                           ───────────────────────       │
//! │  Net                                      A: +60  B: -30  C: -30        │
//! │                                                                         │
//! │  positive = is owed money • negative = owes money • zero = settled      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Under a custom split the debits come from the custom map instead, walking
//! the map's own keys. Someone in `split_among` without a custom entry is not
//! debited at all.

use indexmap::IndexMap;

use crate::types::{Expense, Person, PersonId, SplitType};

/// Net balance per person, in insertion order.
///
/// Known people come first in trip order; ids that only appear on expenses
/// follow in the order they were first seen.
pub type Balances = IndexMap<PersonId, f64>;

/// Calculates every person's net balance across the given expenses.
///
/// ## Behavior
/// - Every known person starts at zero and stays in the map even with no
///   activity.
/// - Ids that aren't in `people` get a balance created on first use; this
///   function never rejects input.
/// - Equal shares are plain floating-point division with no rounding.
///
/// An equal-split expense with an empty `split_among` breaks the caller
/// contract: the payer is credited and nobody is debited.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use fareshare_core::balance::calculate_balances;
/// use fareshare_core::types::{Expense, ExpenseCategory, Person, SplitType};
///
/// let people = vec![Person::new("a", "A", 0), Person::new("b", "B", 1)];
/// let taxi = Expense {
///     id: "e1".into(),
///     description: "Taxi".into(),
///     amount: 100.0,
///     paid_by: "a".into(),
///     split_among: vec!["a".into(), "b".into()],
///     split_type: SplitType::Equal,
///     custom_splits: None,
///     category: ExpenseCategory::Transport,
///     date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
/// };
///
/// let balances = calculate_balances(&people, &[taxi]);
/// assert_eq!(balances["a"], 50.0);
/// assert_eq!(balances["b"], -50.0);
/// ```
pub fn calculate_balances(people: &[Person], expenses: &[Expense]) -> Balances {
    let mut balances: Balances = people.iter().map(|p| (p.id.clone(), 0.0)).collect();

    for expense in expenses {
        // The payer advanced the money for the group
        *balances.entry(expense.paid_by.clone()).or_insert(0.0) += expense.amount;

        match expense.split_type {
            SplitType::Equal => {
                let share = expense.amount / expense.split_among.len() as f64;
                for id in &expense.split_among {
                    *balances.entry(id.clone()).or_insert(0.0) -= share;
                }
            }
            SplitType::Custom => {
                // Iterate the custom map, not split_among
                for (id, owed) in expense.custom_splits.iter().flatten() {
                    *balances.entry(id.clone()).or_insert(0.0) -= *owed;
                }
            }
        }
    }

    balances
}

// =============================================================================
// Unit Tests
// =============================================================================
