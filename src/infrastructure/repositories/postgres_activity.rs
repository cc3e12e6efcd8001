use super::{error::corrupt, map_sqlx};
use crate::domain::activity::{
    Activity, ActivityId, ActivityQuery, ActivityRepository, ActivityStatus, ActivityUpdate,
    ClientSnapshot, Condition, NewActivity, OrderField, Priority, SortDirection, Subject,
    UserSnapshot,
};
use crate::domain::client::ClientId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ACTIVITY_COLUMNS: &str = "id, activity_at, client_id, client_name, contact_person, \
     contact_method, direction, subject, details, action_taken, status, priority, follow_up_at, \
     assignee_id, assignee_name, created_at, created_by_id, created_by_name, last_modified_at, \
     modified_by_id, modified_by_name";

#[derive(Clone)]
pub struct PostgresActivityRepository {
    pool: PgPool,
}

impl PostgresActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn push_condition(builder: &mut QueryBuilder<'_, Postgres>, condition: &Condition) {
        match condition {
            Condition::ClientIs(id) => {
                builder.push("client_id = ");
                builder.push_bind(i64::from(*id));
            }
            Condition::StatusIs(status) => {
                builder.push("status = ");
                builder.push_bind(status.as_str());
            }
            Condition::ContactMethodIs(method) => {
                builder.push("contact_method = ");
                builder.push_bind(method.as_str());
            }
            Condition::AssigneeIs(user_id) => {
                builder.push("assignee_id = ");
                builder.push_bind(i64::from(*user_id));
            }
            Condition::ActivityAtFrom(bound) => {
                builder.push("activity_at >= ");
                builder.push_bind(*bound);
            }
            Condition::ActivityAtBefore(bound) => {
                builder.push("activity_at < ");
                builder.push_bind(*bound);
            }
        }
    }

    /// Sort expression for a field. Text columns use the "C" collation.
    /// `LOWER` folds by the database ctype, so client-name order can differ
    /// from the in-memory order for non-ASCII names.
    fn order_expression(field: OrderField) -> String {
        match field {
            OrderField::ActivityAt => "activity_at".to_string(),
            OrderField::ClientName => "LOWER(client_name) COLLATE \"C\"".to_string(),
            OrderField::Status => "status COLLATE \"C\"".to_string(),
            OrderField::Priority => {
                let arms: String = Priority::ALL
                    .iter()
                    .map(|p| format!(" WHEN '{}' THEN {}", p.as_str(), p.rank()))
                    .collect();
                format!("CASE priority{arms} ELSE 0 END")
            }
            OrderField::LastModifiedAt => "last_modified_at".to_string(),
            OrderField::Id => "id".to_string(),
        }
    }

    fn build_select(query: &ActivityQuery) -> QueryBuilder<'_, Postgres> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ACTIVITY_COLUMNS} FROM activities"));

        for (index, condition) in query.conditions.iter().enumerate() {
            builder.push(if index == 0 { " WHERE " } else { " AND " });
            Self::push_condition(&mut builder, condition);
        }

        for (index, clause) in query.order.iter().enumerate() {
            builder.push(if index == 0 { " ORDER BY " } else { ", " });
            builder.push(Self::order_expression(clause.field));
            builder.push(match clause.direction {
                SortDirection::Asc => " ASC",
                SortDirection::Desc => " DESC",
            });
        }

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }

        builder
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    id: i64,
    activity_at: DateTime<Utc>,
    client_id: i64,
    client_name: String,
    contact_person: Option<String>,
    contact_method: String,
    direction: String,
    subject: String,
    details: Option<String>,
    action_taken: Option<String>,
    status: String,
    priority: String,
    follow_up_at: Option<DateTime<Utc>>,
    assignee_id: Option<i64>,
    assignee_name: Option<String>,
    created_at: DateTime<Utc>,
    created_by_id: Option<i64>,
    created_by_name: Option<String>,
    last_modified_at: DateTime<Utc>,
    modified_by_id: Option<i64>,
    modified_by_name: Option<String>,
}

fn user_snapshot(id: Option<i64>, name: Option<String>) -> DomainResult<Option<UserSnapshot>> {
    match (id, name) {
        (Some(id), name) => Ok(Some(UserSnapshot {
            id: UserId::new(id)?,
            name: name.unwrap_or_default(),
        })),
        (None, _) => Ok(None),
    }
}

impl TryFrom<ActivityRow> for Activity {
    type Error = DomainError;

    fn try_from(row: ActivityRow) -> Result<Self, Self::Error> {
        Ok(Activity {
            id: ActivityId::new(row.id)?,
            activity_at: row.activity_at,
            client: ClientSnapshot {
                id: ClientId::new(row.client_id)?,
                name: row.client_name,
            },
            contact_person: row.contact_person,
            contact_method: row
                .contact_method
                .parse()
                .map_err(|err| corrupt("contact_method", err))?,
            direction: row
                .direction
                .parse()
                .map_err(|err| corrupt("direction", err))?,
            subject: Subject::new(row.subject)?,
            details: row.details,
            action_taken: row.action_taken,
            status: row.status.parse().map_err(|err| corrupt("status", err))?,
            priority: row
                .priority
                .parse()
                .map_err(|err| corrupt("priority", err))?,
            follow_up_at: row.follow_up_at,
            assignee: user_snapshot(row.assignee_id, row.assignee_name)?,
            created_at: row.created_at,
            created_by: user_snapshot(row.created_by_id, row.created_by_name)?,
            last_modified_at: row.last_modified_at,
            modified_by: user_snapshot(row.modified_by_id, row.modified_by_name)?,
        })
    }
}

#[async_trait]
impl ActivityRepository for PostgresActivityRepository {
    async fn insert(&self, activity: NewActivity) -> DomainResult<Activity> {
        let NewActivity {
            draft,
            created_at,
            created_by,
        } = activity;
        let (assignee_id, assignee_name) = match draft.assignee {
            Some(a) => (Some(i64::from(a.id)), Some(a.name)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "INSERT INTO activities (activity_at, client_id, client_name, contact_person,
                 contact_method, direction, subject, details, action_taken, status, priority,
                 follow_up_at, assignee_id, assignee_name, created_at, created_by_id,
                 created_by_name, last_modified_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $15)
             RETURNING {ACTIVITY_COLUMNS}"
        ))
        .bind(draft.activity_at)
        .bind(i64::from(draft.client.id))
        .bind(draft.client.name)
        .bind(draft.contact_person)
        .bind(draft.contact_method.as_str())
        .bind(draft.direction.as_str())
        .bind(draft.subject.as_str())
        .bind(draft.details)
        .bind(draft.action_taken)
        .bind(draft.status.as_str())
        .bind(draft.priority.as_str())
        .bind(draft.follow_up_at)
        .bind(assignee_id)
        .bind(assignee_name)
        .bind(created_at)
        .bind(i64::from(created_by.id))
        .bind(created_by.name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Activity::try_from(row)
    }

    async fn update(&self, update: ActivityUpdate) -> DomainResult<Activity> {
        let ActivityUpdate {
            id,
            draft,
            modified_at,
            modified_by,
        } = update;
        let (assignee_id, assignee_name) = match draft.assignee {
            Some(a) => (Some(i64::from(a.id)), Some(a.name)),
            None => (None, None),
        };

        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "UPDATE activities
             SET activity_at = $2, client_id = $3, client_name = $4, contact_person = $5,
                 contact_method = $6, direction = $7, subject = $8, details = $9,
                 action_taken = $10, status = $11, priority = $12, follow_up_at = $13,
                 assignee_id = $14, assignee_name = $15, last_modified_at = $16,
                 modified_by_id = $17, modified_by_name = $18
             WHERE id = $1
             RETURNING {ACTIVITY_COLUMNS}"
        ))
        .bind(i64::from(id))
        .bind(draft.activity_at)
        .bind(i64::from(draft.client.id))
        .bind(draft.client.name)
        .bind(draft.contact_person)
        .bind(draft.contact_method.as_str())
        .bind(draft.direction.as_str())
        .bind(draft.subject.as_str())
        .bind(draft.details)
        .bind(draft.action_taken)
        .bind(draft.status.as_str())
        .bind(draft.priority.as_str())
        .bind(draft.follow_up_at)
        .bind(assignee_id)
        .bind(assignee_name)
        .bind(modified_at)
        .bind(i64::from(modified_by.id))
        .bind(modified_by.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::not_found("activity not found"))?;

        Activity::try_from(row)
    }

    async fn delete(&self, id: ActivityId) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: ActivityId) -> DomainResult<Option<Activity>> {
        let row = sqlx::query_as::<_, ActivityRow>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Activity::try_from).transpose()
    }

    async fn query(&self, query: &ActivityQuery) -> DomainResult<Vec<Activity>> {
        let mut builder = Self::build_select(query);
        tracing::debug!(sql = builder.sql(), "activity query");

        let rows = builder
            .build_query_as::<ActivityRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(Activity::try_from).collect()
    }

    async fn count(&self) -> DomainResult<u64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM activities")
            .fetch_one(&self.pool)
            .await
            .map(|count| count as u64)
            .map_err(map_sqlx)
    }

    async fn count_by_status(&self) -> DomainResult<Vec<(ActivityStatus, u64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(1) FROM activities GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter()
            .map(|(status, count)| {
                let status = status.parse().map_err(|err| corrupt("status", err))?;
                Ok((status, count as u64))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::{ActivityFilter, SortField, SortSpec};
    use chrono::{FixedOffset, NaiveDate};

    #[test]
    fn select_renders_conditions_and_order() {
        let filter = ActivityFilter {
            status: Some(ActivityStatus::Open),
            date_from: NaiveDate::from_ymd_opt(2024, 5, 1),
            sort: SortSpec {
                field: SortField::Priority,
                direction: SortDirection::Asc,
            },
            ..ActivityFilter::default()
        };
        let query = filter
            .to_query(FixedOffset::east_opt(0).unwrap())
            .unwrap()
            .with_limit(10);
        let builder = PostgresActivityRepository::build_select(&query);
        let sql = builder.sql();

        assert!(sql.contains(" WHERE status = $1 AND activity_at >= $2"));
        assert!(sql.contains(
            " ORDER BY activity_at DESC, CASE priority WHEN 'High' THEN 3 WHEN 'Medium' THEN 2 WHEN 'Low' THEN 1 ELSE 0 END ASC, id DESC"
        ));
        assert!(sql.ends_with(" LIMIT $3"));
    }

    #[test]
    fn date_to_is_an_exclusive_next_day_bound() {
        let filter = ActivityFilter {
            date_to: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..ActivityFilter::default()
        };
        let query = filter.to_query(FixedOffset::east_opt(0).unwrap()).unwrap();
        let builder = PostgresActivityRepository::build_select(&query);
        assert!(builder.sql().contains(" WHERE activity_at < $1"));
    }

    #[test]
    fn unfiltered_select_has_no_where_clause() {
        let query = ActivityQuery::newest_first();
        let builder = PostgresActivityRepository::build_select(&query);
        assert!(!builder.sql().contains("WHERE"));
        assert!(builder.sql().ends_with(" ORDER BY activity_at DESC, id DESC"));
    }
}
