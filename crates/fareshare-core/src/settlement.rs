//! # Debt Minimizer
//!
//! Turns net balances into a short list of payments that settles everyone.
//!
//! ## Greedy Largest-to-Largest Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Balances (rounded to cents)                                            │
//! │    A: +70   B: +20   C: -50   D: -40                                    │
//! │                                                                         │
//! │  Debtors  (desc)  C 50, D 40          Creditors (desc)  A 70, B 20      │
//! │                   ▲ i                                   ▲ j             │
//! │                                                                         │
//! │  step 1: min(C 50, A 70) = 50   → C pays A 50    C done (i++)           │
//! │  step 2: min(D 40, A 20) = 20   → D pays A 20    A done (j++)           │
//! │  step 3: min(D 20, B 20) = 20   → D pays B 20    both done              │
//! │                                                                         │
//! │  3 payments for 4 people                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Not Provably Minimal
//! The greedy pass never needs more than `debtors + creditors - 1` payments
//! and is what the app calls "minimum", but some debt topologies admit fewer
//! payments. Finding those is a much harder combinatorial problem; this
//! module keeps the greedy behavior on purpose.
//!
//! ## Cent Thresholds
//! - Balances are rounded to cents first. Anything in (-0.01, 0.01) is
//!   already settled.
//! - A payment is emitted only when its rounded amount exceeds 0.01.
//! - A side is exhausted once less than 0.01 remains.
//! - Infinite or NaN balances are skipped. With finite positions every
//!   step zeroes at least one side, so the loop always ends.

use crate::balance::{calculate_balances, Balances};
use crate::money::{round_to_cents, SETTLEMENT_THRESHOLD};
use crate::types::{Expense, Person, PersonId, Settlement};

/// One side of the matching: a debtor or a creditor and what's left to move.
#[derive(Debug, Clone)]
struct Position {
    id: PersonId,
    amount: f64,
}

/// Splits balances into debtors and creditors, each sorted largest first.
///
/// `sort_by` is stable, so equal amounts keep their balance-map order.
/// Non-finite balances can't be settled and are left out.
fn partition(balances: &Balances) -> (Vec<Position>, Vec<Position>) {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();

    for (id, balance) in balances {
        let rounded = round_to_cents(*balance);
        if !rounded.is_finite() {
            continue;
        }
        if rounded <= -SETTLEMENT_THRESHOLD {
            debtors.push(Position {
                id: id.clone(),
                amount: rounded.abs(),
            });
        } else if rounded >= SETTLEMENT_THRESHOLD {
            creditors.push(Position {
                id: id.clone(),
                amount: rounded,
            });
        }
    }

    debtors.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    creditors.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    (debtors, creditors)
}

/// Calculates the payments that bring every balance to (about) zero.
///
/// ## Guarantees
/// - Each debtor pays out their rounded debt, within a cent.
/// - Each creditor receives their rounded credit, within a cent.
/// - Same balances in, same list out (ordering included).
/// - Never fails; returns an empty list when nobody owes anything.
///
/// ## Example
/// ```rust
/// use fareshare_core::balance::Balances;
/// use fareshare_core::settlement::calculate_settlements;
///
/// let balances = Balances::from([
///     ("a".to_string(), 30.0),
///     ("b".to_string(), -30.0),
/// ]);
///
/// let settlements = calculate_settlements(&balances);
/// assert_eq!(settlements.len(), 1);
/// assert_eq!(settlements[0].from, "b");
/// assert_eq!(settlements[0].to, "a");
/// assert_eq!(settlements[0].amount, 30.0);
/// ```
pub fn calculate_settlements(balances: &Balances) -> Vec<Settlement> {
    let (mut debtors, mut creditors) = partition(balances);
    let mut settlements = Vec::new();

    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let transfer = debtors[i].amount.min(creditors[j].amount);
        let rounded = round_to_cents(transfer);

        if rounded > SETTLEMENT_THRESHOLD {
            settlements.push(Settlement {
                from: debtors[i].id.clone(),
                to: creditors[j].id.clone(),
                amount: rounded,
            });
        }

        debtors[i].amount -= transfer;
        creditors[j].amount -= transfer;

        if debtors[i].amount < SETTLEMENT_THRESHOLD {
            i += 1;
        }
        if creditors[j].amount < SETTLEMENT_THRESHOLD {
            j += 1;
        }
    }

    settlements
}

/// Computes balances from expenses and settles them in one call.
///
/// Equivalent to [`calculate_balances`] followed by [`calculate_settlements`].
pub fn settle_expenses(people: &[Person], expenses: &[Expense]) -> Vec<Settlement> {
    calculate_settlements(&calculate_balances(people, expenses))
}

// =============================================================================
// Unit Tests
// =============================================================================
