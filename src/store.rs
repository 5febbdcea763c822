//! Consultant persistence: schema sync and single-statement CRUD against
//! PostgreSQL.

use crate::error::AppError;
use crate::model::{json_is_empty, Consultant, NewConsultant, UpdateFields};
use crate::sql::{BindParam, Filter};
use sqlx::PgPool;

const COLUMNS: &str = "id, name, skills, assigned, created_at, updated_at";

pub struct ConsultantStore;

impl ConsultantStore {
    /// Create the consultants table and its two non-unique indexes if absent.
    /// Never alters an existing table.
    pub async fn sync_schema(pool: &PgPool) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS consultants (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                skills JSONB NOT NULL,
                assigned BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS consultants_name_idx ON consultants (name)")
            .execute(pool)
            .await?;
        sqlx::query(
            "CREATE INDEX IF NOT EXISTS consultants_assigned_idx ON consultants (assigned)",
        )
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Insert one consultant and return the stored row. Presence of `name`
    /// and `skills` is enforced here; the table constraints are NOT NULL only.
    pub async fn create(pool: &PgPool, new: &NewConsultant) -> Result<Consultant, AppError> {
        let name = match new.name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => {
                return Err(AppError::Persistence {
                    message: "name can not be empty".into(),
                })
            }
        };
        let skills = match &new.skills {
            Some(v) if !json_is_empty(v) => v,
            _ => {
                return Err(AppError::Persistence {
                    message: "skills can not be empty".into(),
                })
            }
        };
        let sql = format!(
            "INSERT INTO consultants (name, skills, assigned) VALUES ($1, $2, $3) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "insert");
        let row = sqlx::query_as::<_, Consultant>(&sql)
            .bind(name)
            .bind(skills)
            .bind(new.assigned.unwrap_or(false))
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    /// Fetch every row matching `filter`. Order is not guaranteed.
    pub async fn find(pool: &PgPool, filter: &Filter) -> Result<Vec<Consultant>, AppError> {
        let q = filter.render();
        let sql = format!("SELECT {} FROM consultants{}", COLUMNS, q.sql);
        tracing::debug!(sql = %sql, "query");
        let mut query = sqlx::query_as::<_, Consultant>(&sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(pool).await?)
    }

    /// Write the fields present in `fields` to one row; `updated_at` is
    /// refreshed on every write. Returns the number of rows affected. An
    /// empty field set affects zero rows without issuing a statement.
    pub async fn update_by_id(
        pool: &PgPool,
        id: i64,
        fields: &UpdateFields,
    ) -> Result<u64, AppError> {
        if matches!(fields.name.as_deref(), Some("")) {
            return Err(AppError::Persistence {
                message: "name can not be empty".into(),
            });
        }
        if fields.skills.as_ref().is_some_and(json_is_empty) {
            return Err(AppError::Persistence {
                message: "skills can not be empty".into(),
            });
        }

        let mut sets: Vec<String> = Vec::new();
        let mut params: Vec<BindParam> = Vec::new();
        if let Some(name) = &fields.name {
            params.push(BindParam::Text(name.clone()));
            sets.push(format!("name = ${}", params.len()));
        }
        if let Some(skills) = &fields.skills {
            params.push(BindParam::Json(skills.clone()));
            sets.push(format!("skills = ${}", params.len()));
        }
        if let Some(assigned) = fields.assigned {
            params.push(BindParam::Bool(assigned));
            sets.push(format!("assigned = ${}", params.len()));
        }
        if sets.is_empty() {
            return Ok(0);
        }
        sets.push("updated_at = NOW()".into());

        let sql = format!(
            "UPDATE consultants SET {} WHERE id = ${}",
            sets.join(", "),
            params.len() + 1
        );
        tracing::debug!(sql = %sql, "update");
        let mut query = sqlx::query(&sql);
        for p in &params {
            query = query.bind(p.clone());
        }
        let result = query.bind(id).execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Remove one row by id. Returns the number of rows affected.
    pub async fn delete_by_id(pool: &PgPool, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM consultants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Unconditionally remove every row. Returns the removed count.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM consultants").execute(pool).await?;
        Ok(result.rows_affected())
    }
}
