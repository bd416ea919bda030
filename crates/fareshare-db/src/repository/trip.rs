//! # Trip Repository
//!
//! Stores whole trips as JSON documents.
//!
//! ## Storage Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  trips                                                                  │
//! │  ┌──────────┬─────────┬──────────────────────────┬──────────┬─────────┐ │
//! │  │ id (PK)  │ name    │ payload                  │ created  │ updated │ │
//! │  ├──────────┼─────────┼──────────────────────────┼──────────┼─────────┤ │
//! │  │ 7f3a...  │ Lisbon  │ {"id":"7f3a...",         │ 2024-... │ 2024-...│ │
//! │  │          │         │  "people":[...],         │          │         │ │
//! │  │          │         │  "expenses":[...], ...}  │          │         │ │
//! │  └──────────┴─────────┴──────────────────────────┴──────────┴─────────┘ │
//! │                                                                         │
//! │  • payload is serde_json of fareshare_core::Trip                        │
//! │  • name is copied out of the payload for listings                       │
//! │  • every save rewrites the whole payload (upsert)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fareshare_core::Trip;

/// Summary row for trip listings (no payload).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TripRow {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fixed-width RFC 3339 timestamp so text ordering matches time ordering.
fn timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Repository for trip documents.
#[derive(Debug, Clone)]
pub struct TripRepository {
    pool: SqlitePool,
}

impl TripRepository {
    /// Creates a new TripRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TripRepository { pool }
    }

    /// Inserts the trip or replaces the stored copy with the same id.
    ///
    /// `created_at` is kept from the first save; `updated_at` moves forward.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let trip = reduce(&trip, command)?;
    /// db.trips().save(&trip).await?;
    /// ```
    pub async fn save(&self, trip: &Trip) -> DbResult<()> {
        let payload = serde_json::to_string(trip)?;
        let now = timestamp(Utc::now());

        debug!(
            trip_id = %trip.id,
            people = trip.people.len(),
            expenses = trip.expenses.len(),
            "Saving trip"
        );

        sqlx::query(
            r#"
            INSERT INTO trips (id, name, payload, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&trip.id)
        .bind(&trip.name)
        .bind(&payload)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Loads a trip by id.
    ///
    /// ## Returns
    /// * `Ok(Some(trip))` - Trip found
    /// * `Ok(None)` - No trip with that id
    /// * `Err(DbError::Serialization)` - Stored payload is unreadable
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Trip>> {
        let payload: Option<String> = sqlx::query_scalar("SELECT payload FROM trips WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        payload.map(|p| decode(&p)).transpose()
    }

    /// Loads the most recently saved trip, if any.
    pub async fn latest(&self) -> DbResult<Option<Trip>> {
        let payload: Option<String> = sqlx::query_scalar(
            "SELECT payload FROM trips ORDER BY updated_at DESC, rowid DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        payload.map(|p| decode(&p)).transpose()
    }

    /// Lists every stored trip, most recently updated first.
    pub async fn list(&self) -> DbResult<Vec<TripRow>> {
        let rows = sqlx::query_as::<_, TripRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM trips
            ORDER BY updated_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Deletes a trip. Returns `false` when there was nothing to delete.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(trip_id = %id, deleted = result.rows_affected(), "Deleted trip");
        Ok(result.rows_affected() > 0)
    }

    /// Number of stored trips.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM trips")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn decode(payload: &str) -> DbResult<Trip> {
    Ok(serde_json::from_str(payload)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use fareshare_core::{reduce, ExpenseCategory, ExpenseDraft, SplitType, TripCommand};

    async fn setup_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_trip(id: &str, name: &str) -> Trip {
        let mut trip = Trip::new(id);
        trip.name = name.to_string();
        let commands = vec![
            TripCommand::AddPerson {
                id: "a".to_string(),
                name: "Alice".to_string(),
            },
            TripCommand::AddPerson {
                id: "b".to_string(),
                name: "Bob".to_string(),
            },
            TripCommand::AddExpense {
                id: "e1".to_string(),
                draft: ExpenseDraft {
                    description: "Ferry".to_string(),
                    amount: 48.0,
                    paid_by: "a".to_string(),
                    split_among: vec!["a".to_string(), "b".to_string()],
                    split_type: SplitType::Equal,
                    custom_splits: None,
                    category: ExpenseCategory::Transport,
                    date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
                },
            },
        ];
        commands
            .into_iter()
            .fold(trip, |t, c| reduce(&t, c).unwrap())
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let db = setup_db().await;
        let trip = sample_trip("t1", "Crete");

        db.trips().save(&trip).await.unwrap();
        let loaded = db.trips().get_by_id("t1").await.unwrap();

        assert_eq!(loaded, Some(trip));
    }

    #[tokio::test]
    async fn test_get_missing_trip() {
        let db = setup_db().await;
        assert!(db.trips().get_by_id("nope").await.unwrap().is_none());
        assert!(db.trips().latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_twice_updates_in_place() {
        let db = setup_db().await;
        let mut trip = sample_trip("t1", "Crete");
        db.trips().save(&trip).await.unwrap();
        let first = db.trips().list().await.unwrap().remove(0);

        trip.name = "Crete & Santorini".to_string();
        db.trips().save(&trip).await.unwrap();

        let rows = db.trips().list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Crete & Santorini");
        assert_eq!(rows[0].created_at, first.created_at);
        assert!(rows[0].updated_at >= first.updated_at);
    }

    #[tokio::test]
    async fn test_latest_and_list_order() {
        let db = setup_db().await;
        db.trips().save(&sample_trip("t1", "Older")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        db.trips().save(&sample_trip("t2", "Newer")).await.unwrap();

        let latest = db.trips().latest().await.unwrap().unwrap();
        assert_eq!(latest.id, "t2");

        let ids: Vec<String> = db.trips().list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["t2", "t1"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = setup_db().await;
        db.trips().save(&sample_trip("t1", "Crete")).await.unwrap();

        assert!(db.trips().delete("t1").await.unwrap());
        assert!(!db.trips().delete("t1").await.unwrap());
        assert_eq!(db.trips().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_reported() {
        let db = setup_db().await;
        sqlx::query(
            "INSERT INTO trips (id, name, payload, created_at, updated_at) VALUES ('bad', '', 'not json', ?1, ?1)",
        )
        .bind(timestamp(Utc::now()))
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.trips().get_by_id("bad").await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }
}
