//! # Reporters
//!
//! Read-only views over a trip's expenses: what one person paid and owes,
//! where the money went, and a shareable plain-text summary.
//!
//! ## Share Text Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  💰 Lisbon — Settlement Summary                                         │
//! │  Total: $390.00                                                         │
//! │                                                                         │
//! │  Payments needed:                                                       │
//! │    Bob → Alice: $130.00                                                 │
//! │    Cara → Alice: $100.00                                                │
//! │                                                                         │
//! │  — Split with FareShare                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{format_currency, round_to_cents};
use crate::settlement::settle_expenses;
use crate::types::{Expense, ExpenseCategory, PersonSummary, SplitType, Trip};

// =============================================================================
// Per-Person Summary
// =============================================================================

/// Totals for one person across the given expenses.
///
/// The owed side follows the balance calculator exactly: an equal share
/// when the person is in an equal expense's split, the mapped amount when
/// the person is a key of a custom expense's map. Each of the three figures
/// is rounded to cents on its own, so `net` can differ from
/// `total_paid - total_owes` by a cent.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use fareshare_core::report::person_summary;
/// use fareshare_core::types::{Expense, ExpenseCategory, SplitType};
///
/// let cabin = Expense {
///     id: "e1".into(),
///     description: "Cabin".into(),
///     amount: 100.0,
///     paid_by: "a".into(),
///     split_among: vec!["a".into(), "b".into(), "c".into()],
///     split_type: SplitType::Equal,
///     custom_splits: None,
///     category: ExpenseCategory::Lodging,
///     date: NaiveDate::from_ymd_opt(2024, 8, 3).unwrap(),
/// };
///
/// let summary = person_summary("a", &[cabin]);
/// assert_eq!(summary.total_paid, 100.0);
/// assert_eq!(summary.total_owes, 33.33);
/// assert_eq!(summary.net, 66.67);
/// ```
pub fn person_summary(person_id: &str, expenses: &[Expense]) -> PersonSummary {
    let mut total_paid = 0.0;
    let mut total_owes = 0.0;

    for expense in expenses {
        if expense.paid_by == person_id {
            total_paid += expense.amount;
        }

        match expense.split_type {
            SplitType::Equal => {
                if expense.split_among.iter().any(|id| id == person_id) {
                    total_owes += expense.amount / expense.split_among.len() as f64;
                }
            }
            SplitType::Custom => {
                if let Some(owed) = expense.custom_splits.as_ref().and_then(|m| m.get(person_id)) {
                    total_owes += *owed;
                }
            }
        }
    }

    PersonSummary {
        total_paid: round_to_cents(total_paid),
        total_owes: round_to_cents(total_owes),
        net: round_to_cents(total_paid - total_owes),
    }
}

// =============================================================================
// Category Breakdown
// =============================================================================

/// Sum of expense amounts per category, unrounded, in order of first use.
///
/// Categories with no expenses are absent.
pub fn category_breakdown(expenses: &[Expense]) -> IndexMap<ExpenseCategory, f64> {
    let mut breakdown = IndexMap::new();
    for expense in expenses {
        *breakdown.entry(expense.category).or_insert(0.0) += expense.amount;
    }
    breakdown
}

/// One row of the "where the money went" chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryShare {
    pub category: ExpenseCategory,
    pub amount: f64,
    /// Share of the trip total, 0–100.
    pub percent: f64,
}

/// Category breakdown sorted by amount, largest first, with percentages.
///
/// Ties keep first-use order. Percentages are 0 when the total is 0.
pub fn category_shares(expenses: &[Expense]) -> Vec<CategoryShare> {
    let total: f64 = expenses.iter().map(|e| e.amount).sum();

    let mut shares: Vec<CategoryShare> = category_breakdown(expenses)
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            amount,
            percent: if total > 0.0 { amount / total * 100.0 } else { 0.0 },
        })
        .collect();

    shares.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    shares
}

// =============================================================================
// Share Text
// =============================================================================

/// Renders the plain-text settlement summary people paste into a group chat.
///
/// Names come from the trip; ids that don't resolve show as `Unknown`.
pub fn share_text(trip: &Trip) -> String {
    let settlements = settle_expenses(&trip.people, &trip.expenses);
    let title = if trip.name.trim().is_empty() {
        "Trip"
    } else {
        trip.name.as_str()
    };

    let mut text = String::new();
    // Writing to a String can't fail
    let _ = writeln!(text, "💰 {title} — Settlement Summary");
    let _ = writeln!(
        text,
        "Total: {}\n",
        format_currency(trip.total_spent(), &trip.currency)
    );

    if settlements.is_empty() {
        text.push_str("✅ Everyone is settled up!\n");
    } else {
        text.push_str("Payments needed:\n");
        for s in &settlements {
            let _ = writeln!(
                text,
                "  {} → {}: {}",
                trip.person_name(&s.from),
                trip.person_name(&s.to),
                format_currency(s.amount, &trip.currency)
            );
        }
    }

    text.push_str("\n— Split with FareShare");
    text
}

// =============================================================================
// Unit Tests
// =============================================================================
