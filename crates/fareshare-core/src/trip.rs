//! # Trip Reducer
//!
//! Every change to a trip goes through [`reduce`]: the current [`Trip`] and a
//! [`TripCommand`] in, the next `Trip` out.
//!
//! ## State Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   fareshare-db ──load──► Trip ──┐                                       │
//! │                                 ▼                                       │
//! │   CLI / form ──► TripCommand ─► reduce() ──► Ok(Trip')  ──save──►  db   │
//! │                                    │                                    │
//! │                                    └───────► Err(CoreError)             │
//! │                                              (Trip unchanged)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Removing a Person
//! Removal cascades through the expenses:
//! 1. Expenses the person paid for are deleted.
//! 2. The person is dropped from every `split_among` and custom split map.
//! 3. Expenses whose split is now empty are deleted.
//!
//! ## Ids
//! Commands carry their ids so `reduce` is deterministic. The constructor
//! helpers ([`TripCommand::add_person`], [`TripCommand::add_expense`],
//! [`TripCommand::reset`]) generate fresh UUIDs for callers that don't care.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::round_to_cents;
use crate::types::{generate_id, Expense, ExpenseDraft, Person, PersonId, Trip};
use crate::validation::{
    validate_currency_code, validate_date_range, validate_expense_draft, validate_person_name,
    validate_trip_description, validate_trip_name,
};

// =============================================================================
// Commands
// =============================================================================

/// A single change to a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TripCommand {
    /// Replace the trip's details. People and expenses are untouched.
    #[serde(rename_all = "camelCase")]
    SetTripInfo {
        name: String,
        description: String,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        currency: String,
    },

    AddPerson { id: PersonId, name: String },

    RenamePerson { id: PersonId, name: String },

    /// Remove a person and cascade through the expenses.
    RemovePerson { id: PersonId },

    AddExpense { id: String, draft: ExpenseDraft },

    /// Replace every field of an expense except its id.
    UpdateExpense { id: String, draft: ExpenseDraft },

    RemoveExpense { id: String },

    /// Start over with an empty trip under a new id.
    Reset { id: String },
}

impl TripCommand {
    /// Adds a person under a freshly generated id.
    pub fn add_person(name: impl Into<String>) -> Self {
        TripCommand::AddPerson {
            id: generate_id(),
            name: name.into(),
        }
    }

    /// Adds an expense under a freshly generated id.
    pub fn add_expense(draft: ExpenseDraft) -> Self {
        TripCommand::AddExpense {
            id: generate_id(),
            draft,
        }
    }

    /// Resets to an empty trip under a freshly generated id.
    pub fn reset() -> Self {
        TripCommand::Reset { id: generate_id() }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// Applies a command to a trip and returns the updated trip.
///
/// The input trip is never modified. On error nothing changes and the
/// caller keeps using its current state.
///
/// ## Errors
/// - [`CoreError::PersonNotFound`] / [`CoreError::ExpenseNotFound`] when a
///   rename, update, or removal names an id that isn't on the trip
/// - [`CoreError::DuplicateId`] when an add reuses an existing id
/// - [`CoreError::Validation`] when names, amounts, splits, the currency,
///   or the date range are invalid
///
/// ## Example
/// ```rust
/// use fareshare_core::trip::{reduce, TripCommand};
/// use fareshare_core::types::Trip;
///
/// let trip = Trip::new("t1");
/// let trip = reduce(&trip, TripCommand::AddPerson { id: "a".into(), name: " Alice ".into() }).unwrap();
/// assert_eq!(trip.people[0].name, "Alice");
///
/// let err = reduce(&trip, TripCommand::RemovePerson { id: "zz".into() });
/// assert!(err.is_err());
/// ```
pub fn reduce(trip: &Trip, command: TripCommand) -> CoreResult<Trip> {
    let mut next = trip.clone();

    match command {
        TripCommand::SetTripInfo {
            name,
            description,
            start_date,
            end_date,
            currency,
        } => {
            let name = validate_trip_name(&name)?;
            let description = validate_trip_description(&description)?;
            validate_currency_code(&currency)?;
            validate_date_range(start_date, end_date)?;

            next.name = name;
            next.description = description;
            next.start_date = start_date;
            next.end_date = end_date;
            next.currency = currency;
        }

        TripCommand::AddPerson { id, name } => {
            if next.person(&id).is_some() {
                return Err(CoreError::DuplicateId {
                    entity: "Person".to_string(),
                    id,
                });
            }
            let name = validate_person_name(&name)?;
            let position = next.people.len();
            next.people.push(Person::new(id, name, position));
        }

        TripCommand::RenamePerson { id, name } => {
            let name = validate_person_name(&name)?;
            let person = next
                .people
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(CoreError::PersonNotFound(id))?;
            person.name = name;
        }

        TripCommand::RemovePerson { id } => {
            if next.person(&id).is_none() {
                return Err(CoreError::PersonNotFound(id));
            }
            next.people.retain(|p| p.id != id);
            remove_from_expenses(&mut next.expenses, &id);
        }

        TripCommand::AddExpense { id, draft } => {
            if next.expense(&id).is_some() {
                return Err(CoreError::DuplicateId {
                    entity: "Expense".to_string(),
                    id,
                });
            }
            next.expenses.push(accept_draft(&next.people, id, draft)?);
        }

        TripCommand::UpdateExpense { id, draft } => {
            let index = next
                .expenses
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| CoreError::ExpenseNotFound(id.clone()))?;
            next.expenses[index] = accept_draft(&next.people, id, draft)?;
        }

        TripCommand::RemoveExpense { id } => {
            if next.expense(&id).is_none() {
                return Err(CoreError::ExpenseNotFound(id));
            }
            next.expenses.retain(|e| e.id != id);
        }

        TripCommand::Reset { id } => {
            next = Trip::new(id);
        }
    }

    Ok(next)
}

// =============================================================================
// Helpers
// =============================================================================

/// Validates a draft and turns it into an expense with a cent-rounded amount.
fn accept_draft(people: &[Person], id: String, draft: ExpenseDraft) -> CoreResult<Expense> {
    validate_expense_draft(&draft, people)?;

    let mut expense = draft.into_expense(id);
    expense.description = expense.description.trim().to_string();
    expense.amount = round_to_cents(expense.amount);
    Ok(expense)
}

/// Cascades a person's removal through the expense list.
fn remove_from_expenses(expenses: &mut Vec<Expense>, person_id: &str) {
    expenses.retain(|e| e.paid_by != person_id);

    for expense in expenses.iter_mut() {
        expense.split_among.retain(|id| id != person_id);
        if let Some(splits) = expense.custom_splits.as_mut() {
            splits.shift_remove(person_id);
        }
    }

    expenses.retain(|e| !e.split_among.is_empty());
}

// =============================================================================
// Unit Tests
// =============================================================================
