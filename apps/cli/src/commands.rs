//! # Commands
//!
//! Subcommand definitions and their execution.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fareshare expense add -d Dinner -a 90 --paid-by alice                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_trip()          --trip <id>, else the latest saved trip           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build_draft()        names → ids, default split = everyone             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply()              reduce(&trip, TripCommand) → save                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  String output        printed by main                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! People can be referred to by id or by name (case-insensitive). Expenses
//! by id or any unique id prefix.

use std::fmt::Write as _;

use anyhow::{anyhow, bail, Context as _, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use fareshare_core::money::{format_currency, round_to_cents};
use fareshare_core::report::category_shares;
use fareshare_core::{
    calculate_balances, calculate_settlements, generate_id, person_summary, reduce, share_text,
    ExpenseCategory, ExpenseDraft, PersonId, SplitType, Trip, TripCommand,
};
use fareshare_db::Database;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;

// =============================================================================
// Command Definitions
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, inspect, and edit trips
    #[command(subcommand)]
    Trip(TripCmd),

    /// Manage the people sharing costs
    #[command(subcommand)]
    Person(PersonCmd),

    /// Log and manage shared expenses
    #[command(subcommand)]
    Expense(ExpenseCmd),

    /// Show everyone's net balance
    Balances,

    /// Show the payments that settle the trip
    Settle {
        /// Print the shareable plain-text summary instead
        #[arg(long)]
        share: bool,
    },

    /// Show what each person paid, owes, and nets
    Summary,

    /// Show spending by category
    Categories,
}

/// Trip fields shared by `trip new` and `trip set`. Unset fields keep their value.
#[derive(Debug, Clone, Default, Args)]
pub struct TripInfoArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// First day (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Three-letter currency code, e.g. EUR
    #[arg(long)]
    pub currency: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TripCmd {
    /// Start a new trip and make it the current one
    New(TripInfoArgs),
    /// Show the current trip
    Show,
    /// Change the current trip's details
    Set(TripInfoArgs),
    /// Clear all people and expenses from the current trip
    Reset,
    /// List saved trips, most recent first
    List,
    /// Delete a saved trip
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PersonCmd {
    /// Add someone to the trip
    Add { name: String },
    /// Rename someone
    Rename { person: String, name: String },
    /// Remove someone, along with expenses they paid for
    Remove { person: String },
    /// List everyone on the trip
    List,
}

/// Everything needed to describe one expense.
#[derive(Debug, Clone, Args)]
pub struct ExpenseArgs {
    /// What the money was spent on
    #[arg(long, short)]
    pub description: String,

    /// Total cost
    #[arg(long, short)]
    pub amount: f64,

    /// Who paid (name or id)
    #[arg(long)]
    pub paid_by: String,

    /// Who shares the cost, comma-separated (default: everyone)
    #[arg(long, value_delimiter = ',')]
    pub split: Vec<String>,

    /// Custom amounts owed as person=amount, comma-separated
    #[arg(long, value_delimiter = ',')]
    pub custom: Vec<String>,

    /// lodging, food, transport, activities, drinks, groceries, or other
    #[arg(long, default_value = "other")]
    pub category: ExpenseCategory,

    /// Date of the expense (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum ExpenseCmd {
    /// Log an expense
    Add(ExpenseArgs),
    /// Replace an expense's details
    Edit {
        expense: String,
        #[command(flatten)]
        args: ExpenseArgs,
    },
    /// Remove an expense
    Remove { expense: String },
    /// List all expenses
    List,
}

// =============================================================================
// Execution Context
// =============================================================================

/// What every command needs besides its own arguments.
pub struct Context {
    pub db: Database,
    pub config: CliConfig,
    /// `--trip`; the latest saved trip when unset.
    pub trip_id: Option<String>,
    /// `--json`
    pub json: bool,
    pub today: NaiveDate,
}

/// Runs a command and returns what should be printed.
pub async fn run(ctx: &Context, command: Command) -> Result<String> {
    match command {
        Command::Trip(cmd) => run_trip(ctx, cmd).await,
        Command::Person(cmd) => run_person(ctx, cmd).await,
        Command::Expense(cmd) => run_expense(ctx, cmd).await,

        Command::Balances => {
            let trip = load_trip(ctx).await?;
            if ctx.json {
                return to_json(&calculate_balances(&trip.people, &trip.expenses));
            }
            Ok(render_balances(&trip))
        }

        Command::Settle { share } => {
            let trip = load_trip(ctx).await?;
            if share {
                return Ok(share_text(&trip));
            }
            if ctx.json {
                let balances = calculate_balances(&trip.people, &trip.expenses);
                return to_json(&calculate_settlements(&balances));
            }
            Ok(render_settlements(&trip))
        }

        Command::Summary => {
            let trip = load_trip(ctx).await?;
            if ctx.json {
                let summaries: IndexMap<&str, _> = trip
                    .people
                    .iter()
                    .map(|p| (p.id.as_str(), person_summary(&p.id, &trip.expenses)))
                    .collect();
                return to_json(&summaries);
            }
            Ok(render_summary(&trip))
        }

        Command::Categories => {
            let trip = load_trip(ctx).await?;
            if ctx.json {
                return to_json(&category_shares(&trip.expenses));
            }
            Ok(render_categories(&trip))
        }
    }
}

async fn run_trip(ctx: &Context, cmd: TripCmd) -> Result<String> {
    match cmd {
        TripCmd::New(args) => {
            let mut trip = Trip::new(generate_id());
            trip.currency = ctx.config.defaults.currency.clone();
            let trip = apply(ctx, &trip, trip_info_command(&trip, args)).await?;
            info!(trip_id = %trip.id, "Trip created");
            Ok(format!("Created trip {} ({})", display_name(&trip), trip.id))
        }

        TripCmd::Show => {
            let trip = load_trip(ctx).await?;
            if ctx.json {
                return to_json(&trip);
            }
            Ok(render_trip(&trip))
        }

        TripCmd::Set(args) => {
            let trip = load_trip(ctx).await?;
            let trip = apply(ctx, &trip, trip_info_command(&trip, args)).await?;
            Ok(render_trip(&trip))
        }

        TripCmd::Reset => {
            let trip = load_trip(ctx).await?;
            let fresh = reduce(&trip, TripCommand::reset())?;
            ctx.db.trips().save(&fresh).await.context("Failed to save trip")?;
            ctx.db.trips().delete(&trip.id).await.context("Failed to delete old trip")?;
            info!(old = %trip.id, new = %fresh.id, "Trip reset");
            Ok(format!("Started over with an empty trip ({})", fresh.id))
        }

        TripCmd::List => {
            let rows = ctx.db.trips().list().await.context("Failed to list trips")?;
            if rows.is_empty() {
                return Ok("No trips yet. Run `fareshare trip new` to start one.".to_string());
            }
            let mut out = String::new();
            for (i, row) in rows.iter().enumerate() {
                let marker = if i == 0 { "*" } else { " " };
                let name = if row.name.is_empty() { "(unnamed)" } else { row.name.as_str() };
                let _ = writeln!(
                    out,
                    "{marker} {}  {name:<24}  updated {}",
                    row.id,
                    row.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
            Ok(out.trim_end().to_string())
        }

        TripCmd::Delete { id } => {
            if !ctx.db.trips().delete(&id).await.context("Failed to delete trip")? {
                bail!("No trip with id '{id}'");
            }
            Ok(format!("Deleted trip {id}"))
        }
    }
}

async fn run_person(ctx: &Context, cmd: PersonCmd) -> Result<String> {
    let trip = load_trip(ctx).await?;

    match cmd {
        PersonCmd::Add { name } => {
            let command = TripCommand::add_person(name);
            let trip = apply(ctx, &trip, command).await?;
            let person = trip.people.last().ok_or_else(|| anyhow!("person was not added"))?;
            Ok(format!("Added {} ({})", person.name, person.id))
        }

        PersonCmd::Rename { person, name } => {
            let id = resolve_person(&trip, &person)?;
            let old = trip.person_name(&id).to_string();
            let trip = apply(ctx, &trip, TripCommand::RenamePerson { id: id.clone(), name }).await?;
            Ok(format!("Renamed {old} to {}", trip.person_name(&id)))
        }

        PersonCmd::Remove { person } => {
            let id = resolve_person(&trip, &person)?;
            let name = trip.person_name(&id).to_string();
            let before = trip.expenses.len();
            let trip = apply(ctx, &trip, TripCommand::RemovePerson { id }).await?;
            let dropped = before - trip.expenses.len();
            Ok(format!("Removed {name} ({dropped} expense(s) removed with them)"))
        }

        PersonCmd::List => {
            if ctx.json {
                return to_json(&trip.people);
            }
            Ok(render_people(&trip))
        }
    }
}

async fn run_expense(ctx: &Context, cmd: ExpenseCmd) -> Result<String> {
    let trip = load_trip(ctx).await?;

    match cmd {
        ExpenseCmd::Add(args) => {
            let draft = build_draft(&trip, args, ctx.today)?;
            let trip = apply(ctx, &trip, TripCommand::add_expense(draft)).await?;
            let expense = trip.expenses.last().ok_or_else(|| anyhow!("expense was not added"))?;
            Ok(format!(
                "Added {} {} ({})",
                expense.description,
                format_currency(expense.amount, &trip.currency),
                short_id(&expense.id)
            ))
        }

        ExpenseCmd::Edit { expense, args } => {
            let id = resolve_expense(&trip, &expense)?;
            let draft = build_draft(&trip, args, ctx.today)?;
            apply(ctx, &trip, TripCommand::UpdateExpense { id: id.clone(), draft }).await?;
            Ok(format!("Updated expense {}", short_id(&id)))
        }

        ExpenseCmd::Remove { expense } => {
            let id = resolve_expense(&trip, &expense)?;
            apply(ctx, &trip, TripCommand::RemoveExpense { id: id.clone() }).await?;
            Ok(format!("Removed expense {}", short_id(&id)))
        }

        ExpenseCmd::List => {
            if ctx.json {
                return to_json(&trip.expenses);
            }
            Ok(render_expenses(&trip))
        }
    }
}

// =============================================================================
// Trip Loading & Saving
// =============================================================================

async fn load_trip(ctx: &Context) -> Result<Trip> {
    let trip = match &ctx.trip_id {
        Some(id) => ctx
            .db
            .trips()
            .get_by_id(id)
            .await
            .context("Failed to load trip")?
            .ok_or_else(|| anyhow!("No trip with id '{id}'"))?,
        None => ctx
            .db
            .trips()
            .latest()
            .await
            .context("Failed to load trip")?
            .ok_or_else(|| anyhow!("No trip yet. Run `fareshare trip new` to start one."))?,
    };
    Ok(trip)
}

/// Applies a command and persists the result.
async fn apply(ctx: &Context, trip: &Trip, command: TripCommand) -> Result<Trip> {
    let next = reduce(trip, command)?;
    ctx.db.trips().save(&next).await.context("Failed to save trip")?;
    Ok(next)
}

fn trip_info_command(trip: &Trip, args: TripInfoArgs) -> TripCommand {
    TripCommand::SetTripInfo {
        name: args.name.unwrap_or_else(|| trip.name.clone()),
        description: args.description.unwrap_or_else(|| trip.description.clone()),
        start_date: args.start.or(trip.start_date),
        end_date: args.end.or(trip.end_date),
        currency: args
            .currency
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_else(|| trip.currency.clone()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

// =============================================================================
// Reference Resolution
// =============================================================================

/// Finds a person by exact id, then by case-insensitive name.
pub fn resolve_person(trip: &Trip, reference: &str) -> Result<PersonId> {
    let reference = reference.trim();

    if let Some(person) = trip.person(reference) {
        return Ok(person.id.clone());
    }

    let wanted = reference.to_lowercase();
    let matches: Vec<_> = trip
        .people
        .iter()
        .filter(|p| p.name.to_lowercase() == wanted)
        .collect();

    match matches.as_slice() {
        [person] => Ok(person.id.clone()),
        [] => bail!("No one called '{reference}' on this trip"),
        _ => bail!("More than one person is called '{reference}'; use their id"),
    }
}

/// Finds an expense by exact id or unique id prefix.
pub fn resolve_expense(trip: &Trip, reference: &str) -> Result<String> {
    let reference = reference.trim();

    if let Some(expense) = trip.expense(reference) {
        return Ok(expense.id.clone());
    }

    let matches: Vec<_> = trip
        .expenses
        .iter()
        .filter(|e| !reference.is_empty() && e.id.starts_with(reference))
        .collect();

    match matches.as_slice() {
        [expense] => Ok(expense.id.clone()),
        [] => bail!("No expense with id '{reference}'"),
        _ => bail!("'{reference}' matches more than one expense"),
    }
}

/// Turns CLI arguments into an expense draft, resolving names to ids.
///
/// With `--custom` the split is custom and, unless `--split` is also given,
/// the participants are the custom entries. Otherwise the split is equal and
/// defaults to everyone on the trip.
pub fn build_draft(trip: &Trip, args: ExpenseArgs, today: NaiveDate) -> Result<ExpenseDraft> {
    let paid_by = resolve_person(trip, &args.paid_by)?;

    let mut custom_splits = IndexMap::new();
    for entry in args.custom.iter().filter(|e| !e.trim().is_empty()) {
        let (who, amount) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Custom split '{entry}' should look like name=amount"))?;
        let amount: f64 = amount
            .trim()
            .parse()
            .with_context(|| format!("Invalid amount in custom split '{entry}'"))?;
        custom_splits.insert(resolve_person(trip, who)?, amount);
    }

    let split_among: Vec<PersonId> = if !args.split.is_empty() {
        args.split
            .iter()
            .map(|who| resolve_person(trip, who))
            .collect::<Result<_>>()?
    } else if !custom_splits.is_empty() {
        custom_splits.keys().cloned().collect()
    } else {
        trip.people.iter().map(|p| p.id.clone()).collect()
    };

    let (split_type, custom_splits) = if custom_splits.is_empty() {
        (SplitType::Equal, None)
    } else {
        (SplitType::Custom, Some(custom_splits))
    };

    Ok(ExpenseDraft {
        description: args.description,
        amount: args.amount,
        paid_by,
        split_among,
        split_type,
        custom_splits,
        category: args.category,
        date: args.date.unwrap_or(today),
    })
}

// =============================================================================
// Rendering
// =============================================================================

fn display_name(trip: &Trip) -> &str {
    if trip.name.is_empty() {
        "Trip"
    } else {
        &trip.name
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn name_width(trip: &Trip) -> usize {
    trip.people
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(6)
}

pub fn render_trip(trip: &Trip) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", display_name(trip));
    if !trip.description.is_empty() {
        let _ = writeln!(out, "{}", trip.description);
    }
    match (trip.start_date, trip.end_date) {
        (Some(start), Some(end)) => {
            let _ = writeln!(out, "Dates:    {start} to {end}");
        }
        (Some(start), None) => {
            let _ = writeln!(out, "Dates:    from {start}");
        }
        (None, Some(end)) => {
            let _ = writeln!(out, "Dates:    until {end}");
        }
        (None, None) => {}
    }
    let _ = writeln!(out, "Currency: {}", trip.currency);
    let _ = writeln!(out, "People:   {}", trip.people.len());
    let _ = writeln!(out, "Expenses: {}", trip.expenses.len());
    let _ = write!(out, "Total:    {}", format_currency(trip.total_spent(), &trip.currency));
    if !trip.is_ready() {
        out.push_str("\n\nAdd a name and at least two people before logging expenses.");
    }
    out
}

pub fn render_people(trip: &Trip) -> String {
    if trip.people.is_empty() {
        return "No one on this trip yet.".to_string();
    }
    let width = name_width(trip);
    trip.people
        .iter()
        .map(|p| format!("{:<width$}  {}", p.name, p.id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_expenses(trip: &Trip) -> String {
    if trip.expenses.is_empty() {
        return "No expenses yet.".to_string();
    }

    let mut out = String::new();
    for e in &trip.expenses {
        let split: Vec<&str> = e.split_among.iter().map(|id| trip.person_name(id)).collect();
        let _ = writeln!(
            out,
            "{}  {}  {} {:<24} {:>12}  paid by {}, split {} ({})",
            short_id(&e.id),
            e.date,
            e.category.icon(),
            e.description,
            format_currency(e.amount, &trip.currency),
            trip.person_name(&e.paid_by),
            e.split_type,
            split.join(", ")
        );
    }
    let _ = write!(
        out,
        "\nTotal: {}",
        format_currency(trip.total_spent(), &trip.currency)
    );
    out
}

pub fn render_balances(trip: &Trip) -> String {
    let balances = calculate_balances(&trip.people, &trip.expenses);
    if balances.is_empty() {
        return "No one on this trip yet.".to_string();
    }

    let width = name_width(trip);
    balances
        .iter()
        .map(|(id, balance)| {
            let rounded = round_to_cents(*balance);
            let status = if rounded >= 0.01 {
                "is owed"
            } else if rounded <= -0.01 {
                "owes"
            } else {
                "settled"
            };
            format!(
                "{:<width$}  {:>12}  {status}",
                trip.person_name(id),
                format_currency(rounded, &trip.currency)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_settlements(trip: &Trip) -> String {
    let settlements = calculate_settlements(&calculate_balances(&trip.people, &trip.expenses));
    if settlements.is_empty() {
        return "✅ Everyone is settled up!".to_string();
    }

    let mut out = format!(
        "{} payment{} needed:",
        settlements.len(),
        if settlements.len() == 1 { "" } else { "s" }
    );
    for s in &settlements {
        let _ = write!(
            out,
            "\n  {} → {}: {}",
            trip.person_name(&s.from),
            trip.person_name(&s.to),
            format_currency(s.amount, &trip.currency)
        );
    }
    out
}

pub fn render_summary(trip: &Trip) -> String {
    if trip.people.is_empty() {
        return "No one on this trip yet.".to_string();
    }

    let width = name_width(trip);
    let mut out = format!("{:<width$}  {:>12}  {:>12}  {:>12}", "Name", "Paid", "Owes", "Net");
    for person in &trip.people {
        let summary = person_summary(&person.id, &trip.expenses);
        let _ = write!(
            out,
            "\n{:<width$}  {:>12}  {:>12}  {:>12}",
            person.name,
            format_currency(summary.total_paid, &trip.currency),
            format_currency(summary.total_owes, &trip.currency),
            format_currency(summary.net, &trip.currency)
        );
    }
    out
}

pub fn render_categories(trip: &Trip) -> String {
    let shares = category_shares(&trip.expenses);
    if shares.is_empty() {
        return "No expenses yet.".to_string();
    }

    shares
        .iter()
        .map(|s| {
            format!(
                "{} {:<14} {:>12}  {:>5.1}%",
                s.category.icon(),
                s.category.label(),
                format_currency(s.amount, &trip.currency),
                s.percent
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use fareshare_core::Person;
    use fareshare_db::DbConfig;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn trip() -> Trip {
        let mut trip = Trip::new("t1");
        trip.name = "Lisbon".to_string();
        trip.people = vec![
            Person::new("a", "Alice", 0),
            Person::new("b", "Bob", 1),
            Person::new("c", "Cara", 2),
        ];
        trip
    }

    fn args(amount: f64, paid_by: &str) -> ExpenseArgs {
        ExpenseArgs {
            description: "Dinner".to_string(),
            amount,
            paid_by: paid_by.to_string(),
            split: Vec::new(),
            custom: Vec::new(),
            category: ExpenseCategory::Food,
            date: None,
        }
    }

    async fn context() -> Context {
        Context {
            db: Database::new(DbConfig::in_memory()).await.unwrap(),
            config: CliConfig::default(),
            trip_id: None,
            json: false,
            today: today(),
        }
    }

    #[test]
    fn test_resolve_person() {
        let trip = trip();
        assert_eq!(resolve_person(&trip, "b").unwrap(), "b");
        assert_eq!(resolve_person(&trip, "ALICE").unwrap(), "a");
        assert_eq!(resolve_person(&trip, " cara ").unwrap(), "c");
        assert!(resolve_person(&trip, "dave").is_err());
    }

    #[test]
    fn test_resolve_person_ambiguous() {
        let mut trip = trip();
        trip.people.push(Person::new("a2", "alice", 3));
        assert!(resolve_person(&trip, "Alice").is_err());
        assert_eq!(resolve_person(&trip, "a2").unwrap(), "a2");
    }

    #[test]
    fn test_resolve_expense_by_prefix() {
        let mut trip = trip();
        let draft = build_draft(&trip, args(10.0, "a"), today()).unwrap();
        trip.expenses.push(draft.clone().into_expense("abcdef12-0000"));
        trip.expenses.push(draft.into_expense("abc99999-0000"));

        assert_eq!(resolve_expense(&trip, "abcd").unwrap(), "abcdef12-0000");
        assert!(resolve_expense(&trip, "abc").is_err());
        assert!(resolve_expense(&trip, "zzz").is_err());
        assert!(resolve_expense(&trip, "").is_err());
    }

    #[test]
    fn test_build_draft_defaults_to_everyone() {
        let draft = build_draft(&trip(), args(90.0, "alice"), today()).unwrap();
        assert_eq!(draft.paid_by, "a");
        assert_eq!(draft.split_among, vec!["a", "b", "c"]);
        assert_eq!(draft.split_type, SplitType::Equal);
        assert_eq!(draft.date, today());
    }

    #[test]
    fn test_build_draft_explicit_split() {
        let mut a = args(50.0, "a");
        a.split = vec!["Bob".to_string(), "cara".to_string()];
        let draft = build_draft(&trip(), a, today()).unwrap();
        assert_eq!(draft.split_among, vec!["b", "c"]);
    }

    #[test]
    fn test_build_draft_custom() {
        let mut a = args(100.0, "a");
        a.custom = vec!["alice=40".to_string(), "bob = 60".to_string()];
        let draft = build_draft(&trip(), a, today()).unwrap();

        assert_eq!(draft.split_type, SplitType::Custom);
        assert_eq!(draft.split_among, vec!["a", "b"]);
        let splits = draft.custom_splits.unwrap();
        assert_eq!(splits["a"], 40.0);
        assert_eq!(splits["b"], 60.0);
    }

    #[test]
    fn test_build_draft_bad_custom() {
        let mut a = args(100.0, "a");
        a.custom = vec!["alice:40".to_string()];
        assert!(build_draft(&trip(), a, today()).is_err());

        let mut a = args(100.0, "a");
        a.custom = vec!["alice=lots".to_string()];
        assert!(build_draft(&trip(), a, today()).is_err());
    }

    #[test]
    fn test_render_settlements() {
        let mut trip = trip();
        assert_eq!(render_settlements(&trip), "✅ Everyone is settled up!");

        let draft = build_draft(&trip, args(90.0, "a"), today()).unwrap();
        trip.expenses.push(draft.into_expense("e1"));
        assert_eq!(
            render_settlements(&trip),
            "2 payments needed:\n  Bob → Alice: $30.00\n  Cara → Alice: $30.00"
        );
    }

    #[test]
    fn test_render_balances_and_summary() {
        let mut trip = trip();
        let draft = build_draft(&trip, args(90.0, "a"), today()).unwrap();
        trip.expenses.push(draft.into_expense("e1"));

        let balances = render_balances(&trip);
        assert!(balances.lines().next().unwrap().contains("$60.00"));
        assert!(balances.contains("owes"));

        let summary = render_summary(&trip);
        assert_eq!(summary.lines().count(), 4);
        assert!(summary.contains("$90.00"));
    }

    #[test]
    fn test_render_categories() {
        let mut trip = trip();
        assert_eq!(render_categories(&trip), "No expenses yet.");

        let draft = build_draft(&trip, args(90.0, "a"), today()).unwrap();
        trip.expenses.push(draft.into_expense("e1"));
        assert!(render_categories(&trip).contains("Food & Dining"));
        assert!(render_categories(&trip).contains("100.0%"));
    }

    #[tokio::test]
    async fn test_commands_without_trip_fail() {
        let ctx = context().await;
        let err = run(&ctx, Command::Balances).await.unwrap_err();
        assert!(err.to_string().contains("No trip yet"));
    }

    #[tokio::test]
    async fn test_full_flow() {
        let ctx = context().await;

        run(
            &ctx,
            Command::Trip(TripCmd::New(TripInfoArgs {
                name: Some("Lisbon".to_string()),
                currency: Some("eur".to_string()),
                ..Default::default()
            })),
        )
        .await
        .unwrap();

        for name in ["Alice", "Bob", "Cara"] {
            run(&ctx, Command::Person(PersonCmd::Add { name: name.to_string() }))
                .await
                .unwrap();
        }

        run(&ctx, Command::Expense(ExpenseCmd::Add(args(90.0, "alice"))))
            .await
            .unwrap();

        let out = run(&ctx, Command::Settle { share: true }).await.unwrap();
        assert!(out.starts_with("💰 Lisbon — Settlement Summary"));
        assert!(out.contains("Bob → Alice: €30.00"));

        let out = run(&ctx, Command::Person(PersonCmd::Remove { person: "alice".to_string() }))
            .await
            .unwrap();
        assert!(out.contains("1 expense(s)"));

        let out = run(&ctx, Command::Settle { share: false }).await.unwrap();
        assert_eq!(out, "✅ Everyone is settled up!");
    }

    #[tokio::test]
    async fn test_reset_replaces_trip() {
        let ctx = context().await;
        run(&ctx, Command::Trip(TripCmd::New(TripInfoArgs::default())))
            .await
            .unwrap();
        run(&ctx, Command::Person(PersonCmd::Add { name: "Alice".to_string() }))
            .await
            .unwrap();

        run(&ctx, Command::Trip(TripCmd::Reset)).await.unwrap();

        assert_eq!(ctx.db.trips().count().await.unwrap(), 1);
        let out = run(&ctx, Command::Person(PersonCmd::List)).await.unwrap();
        assert_eq!(out, "No one on this trip yet.");
    }

    #[tokio::test]
    async fn test_invalid_expense_is_rejected_and_not_saved() {
        let ctx = context().await;
        run(&ctx, Command::Trip(TripCmd::New(TripInfoArgs::default())))
            .await
            .unwrap();
        run(&ctx, Command::Person(PersonCmd::Add { name: "Alice".to_string() }))
            .await
            .unwrap();

        assert!(run(&ctx, Command::Expense(ExpenseCmd::Add(args(-5.0, "alice"))))
            .await
            .is_err());

        let out = run(&ctx, Command::Expense(ExpenseCmd::List)).await.unwrap();
        assert_eq!(out, "No expenses yet.");
    }
}
