//! # Validation Module
//!
//! Input checks applied by the trip reducer before state changes.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI args / web forms)                              │
//! │  ├── Type parsing (amount, date, category)                              │
//! │  └── Name → id resolution                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Trip reducer                                                  │
//! │  └── THIS MODULE: names, amounts, split references                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Settlement engine                                             │
//! │  └── No checks at all; it trusts its input                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Custom split values are checked one by one but their sum is never
//! compared to the expense amount. Under- and over-allocated custom splits
//! are accepted.
//!
//! ## Usage
//! ```rust
//! use fareshare_core::validation::{validate_amount, validate_person_name};
//!
//! assert!(validate_person_name("Alice").is_ok());
//! assert!(validate_amount(0.0).is_err());
//! ```

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{ExpenseDraft, Person, SplitType};
use crate::{MAX_AMOUNT, MAX_DESCRIPTION_LEN, MAX_PERSON_NAME_LEN, MAX_TRIP_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Checks a required text field and returns it trimmed.
fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Checks an optional text field and returns it trimmed. Empty is allowed.
fn optional_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a person's display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use fareshare_core::validation::validate_person_name;
///
/// assert_eq!(validate_person_name("  Alice ").unwrap(), "Alice");
/// assert!(validate_person_name("   ").is_err());
/// ```
pub fn validate_person_name(name: &str) -> ValidationResult<String> {
    required_text("name", name, MAX_PERSON_NAME_LEN)
}

/// Validates an expense description. Same rules as a name, up to 200 characters.
pub fn validate_description(description: &str) -> ValidationResult<String> {
    required_text("description", description, MAX_DESCRIPTION_LEN)
}

/// Validates a trip name. It may be empty until the trip is set up.
pub fn validate_trip_name(name: &str) -> ValidationResult<String> {
    optional_text("name", name, MAX_TRIP_NAME_LEN)
}

/// Validates a trip description. Optional, up to 200 characters.
pub fn validate_trip_description(description: &str) -> ValidationResult<String> {
    optional_text("description", description, MAX_DESCRIPTION_LEN)
}

/// Validates a currency code: exactly three uppercase ASCII letters.
///
/// ## Example
/// ```rust
/// use fareshare_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("EUR").is_ok());
/// assert!(validate_currency_code("eur").is_err());
/// assert!(validate_currency_code("EURO").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::required("currency"));
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a three-letter code like USD".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an expense amount.
///
/// ## Rules
/// - Must be a finite number (no NaN or infinity)
/// - Must be greater than zero
/// - At most [`MAX_AMOUNT`]
pub fn validate_amount(amount: f64) -> ValidationResult<()> {
    if !amount.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if amount <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    if amount > MAX_AMOUNT {
        return Err(ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: format!("must be at most {MAX_AMOUNT}"),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a trip's date range. Either end may be open.
pub fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ValidationResult<()> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(ValidationError::InvalidRange {
            field: "trip dates".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Expense Validators
// =============================================================================

/// Validates an expense draft against the people currently on the trip.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  description   required, ≤ 200 chars                                    │
/// │  amount        finite, > 0                                              │
/// │  paid_by       a person on the trip (need not be in the split)          │
/// │  split_among   non-empty, no repeats, everyone on the trip              │
/// │  custom        map present, values finite and ≥ 0, keys on the trip     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The first failing rule is reported.
pub fn validate_expense_draft(draft: &ExpenseDraft, people: &[Person]) -> ValidationResult<()> {
    let known = |id: &str| people.iter().any(|p| p.id == id);

    validate_description(&draft.description)?;
    validate_amount(draft.amount)?;

    if draft.paid_by.trim().is_empty() {
        return Err(ValidationError::required("paid_by"));
    }
    if !known(&draft.paid_by) {
        return Err(ValidationError::unknown_reference("paid_by", &draft.paid_by));
    }

    if draft.split_among.is_empty() {
        return Err(ValidationError::required("split_among"));
    }

    let mut seen = HashSet::new();
    for id in &draft.split_among {
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "split_among".to_string(),
                value: id.clone(),
            });
        }
        if !known(id) {
            return Err(ValidationError::unknown_reference("split_among", id));
        }
    }

    if draft.split_type == SplitType::Custom {
        let splits = draft
            .custom_splits
            .as_ref()
            .ok_or_else(|| ValidationError::required("custom_splits"))?;

        for (id, owed) in splits {
            if !known(id) {
                return Err(ValidationError::unknown_reference("custom_splits", id));
            }
            if !owed.is_finite() || *owed < 0.0 {
                return Err(ValidationError::InvalidFormat {
                    field: "custom_splits".to_string(),
                    reason: format!("amount for '{id}' must be zero or more"),
                });
            }
            if *owed > MAX_AMOUNT {
                return Err(ValidationError::InvalidFormat {
                    field: "custom_splits".to_string(),
                    reason: format!("amount for '{id}' must be at most {MAX_AMOUNT}"),
                });
            }
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExpenseCategory;
    use indexmap::IndexMap;

    fn people() -> Vec<Person> {
        vec![Person::new("a", "Alice", 0), Person::new("b", "Bob", 1)]
    }

    fn draft() -> ExpenseDraft {
        ExpenseDraft {
            description: "Groceries".to_string(),
            amount: 42.5,
            paid_by: "a".to_string(),
            split_among: vec!["a".to_string(), "b".to_string()],
            split_type: SplitType::Equal,
            custom_splits: None,
            category: ExpenseCategory::Groceries,
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        }
    }

    #[test]
    fn test_validate_person_name() {
        assert_eq!(validate_person_name("Alice").unwrap(), "Alice");
        assert_eq!(validate_person_name("  Bob  ").unwrap(), "Bob");
        assert!(validate_person_name(&"é".repeat(100)).is_ok());

        assert_eq!(validate_person_name("").unwrap_err(), ValidationError::required("name"));
        assert!(validate_person_name("\t ").is_err());
        assert!(matches!(
            validate_person_name(&"x".repeat(101)),
            Err(ValidationError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Dinner at the harbour").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description(&"x".repeat(200)).is_ok());
        assert!(validate_description(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(1234.56).is_ok());

        assert!(matches!(validate_amount(0.0), Err(ValidationError::MustBePositive { .. })));
        assert!(validate_amount(-5.0).is_err());
        assert!(matches!(validate_amount(f64::NAN), Err(ValidationError::InvalidFormat { .. })));
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_amount_upper_bound() {
        assert!(validate_amount(MAX_AMOUNT).is_ok());
        assert!(matches!(validate_amount(MAX_AMOUNT * 10.0), Err(ValidationError::InvalidFormat { .. })));
        assert!(validate_amount(1e308).is_err());
    }

    #[test]
    fn test_validate_trip_name() {
        assert_eq!(validate_trip_name("  Lisbon ").unwrap(), "Lisbon");
        assert_eq!(validate_trip_name("").unwrap(), "");
        assert!(validate_trip_name(&"x".repeat(MAX_TRIP_NAME_LEN)).is_ok());
        assert!(matches!(
            validate_trip_name(&"x".repeat(MAX_TRIP_NAME_LEN + 1)),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(validate_trip_description(&"y".repeat(MAX_DESCRIPTION_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("JPY").is_ok());
        assert!(validate_currency_code("").is_err());
        assert!(validate_currency_code("usd").is_err());
        assert!(validate_currency_code("US").is_err());
        assert!(validate_currency_code("U5D").is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        assert!(validate_date_range(None, None).is_ok());
        assert!(validate_date_range(Some(d(1)), None).is_ok());
        assert!(validate_date_range(Some(d(1)), Some(d(1))).is_ok());
        assert!(validate_date_range(Some(d(1)), Some(d(5))).is_ok());
        assert!(validate_date_range(Some(d(5)), Some(d(1))).is_err());
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_expense_draft(&draft(), &people()).is_ok());
    }

    #[test]
    fn test_payer_outside_split_is_fine() {
        let mut d = draft();
        d.split_among = vec!["b".to_string()];
        assert!(validate_expense_draft(&d, &people()).is_ok());
    }

    #[test]
    fn test_unknown_payer() {
        let mut d = draft();
        d.paid_by = "ghost".to_string();
        assert_eq!(
            validate_expense_draft(&d, &people()).unwrap_err(),
            ValidationError::unknown_reference("paid_by", "ghost")
        );
    }

    #[test]
    fn test_split_rules() {
        let mut d = draft();
        d.split_among.clear();
        assert_eq!(
            validate_expense_draft(&d, &people()).unwrap_err(),
            ValidationError::required("split_among")
        );

        let mut d = draft();
        d.split_among.push("a".to_string());
        assert!(matches!(
            validate_expense_draft(&d, &people()),
            Err(ValidationError::Duplicate { .. })
        ));

        let mut d = draft();
        d.split_among.push("zed".to_string());
        assert!(matches!(
            validate_expense_draft(&d, &people()),
            Err(ValidationError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_custom_split_rules() {
        let mut d = draft();
        d.split_type = SplitType::Custom;
        assert_eq!(
            validate_expense_draft(&d, &people()).unwrap_err(),
            ValidationError::required("custom_splits")
        );

        // Under-allocated is accepted
        d.custom_splits = Some(IndexMap::from([("a".to_string(), 10.0)]));
        assert!(validate_expense_draft(&d, &people()).is_ok());

        // Over-allocated too
        d.custom_splits = Some(IndexMap::from([
            ("a".to_string(), 40.0),
            ("b".to_string(), 40.0),
        ]));
        assert!(validate_expense_draft(&d, &people()).is_ok());

        d.custom_splits = Some(IndexMap::from([("b".to_string(), -1.0)]));
        assert!(matches!(
            validate_expense_draft(&d, &people()),
            Err(ValidationError::InvalidFormat { .. })
        ));

        d.custom_splits = Some(IndexMap::from([("b".to_string(), 1e308)]));
        assert!(matches!(
            validate_expense_draft(&d, &people()),
            Err(ValidationError::InvalidFormat { .. })
        ));

        d.custom_splits = Some(IndexMap::from([("nobody".to_string(), 1.0)]));
        assert!(matches!(
            validate_expense_draft(&d, &people()),
            Err(ValidationError::UnknownReference { .. })
        ));
    }

    #[test]
    fn test_custom_map_ignored_for_equal_split() {
        let mut d = draft();
        d.custom_splits = Some(IndexMap::from([("nobody".to_string(), -3.0)]));
        assert!(validate_expense_draft(&d, &people()).is_ok());
    }
}
