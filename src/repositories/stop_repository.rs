use crate::models::stop_completion::StopCompletion;
use crate::utils::errors::AppResult;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StopRepository {
    pool: PgPool,
}

impl StopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_today_by_route(&self, route_id: Uuid, company_id: Uuid) -> AppResult<Vec<StopCompletion>> {
        let completions = sqlx::query_as::<_, StopCompletion>(
            r#"
            SELECT * FROM stop_completions
            WHERE route_id = $1 AND company_id = $2 AND completion_date = $3
            ORDER BY stop_sequence
            "#,
        )
        .bind(route_id)
        .bind(company_id)
        .bind(Utc::now().date_naive())
        .fetch_all(&self.pool)
        .await?;

        Ok(completions)
    }

    pub async fn insert(&self, completion: &StopCompletion) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO stop_completions (
                id, company_id, route_id, route_stop_id, driver_id, bus_id,
                stop_sequence, completion_date, arrived_at, departed_at, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(completion.id)
        .bind(completion.company_id)
        .bind(completion.route_id)
        .bind(completion.route_stop_id)
        .bind(completion.driver_id)
        .bind(completion.bus_id)
        .bind(completion.stop_sequence)
        .bind(completion.completion_date)
        .bind(completion.arrived_at)
        .bind(completion.departed_at)
        .bind(completion.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_departed(&self, completion: &StopCompletion) -> AppResult<()> {
        sqlx::query(
            "UPDATE stop_completions SET departed_at = $3 WHERE id = $1 AND company_id = $2",
        )
        .bind(completion.id)
        .bind(completion.company_id)
        .bind(completion.departed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Borrar las completions del día para una ruta (reset diario)
    pub async fn delete_today_by_route(&self, route_id: Uuid, company_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM stop_completions WHERE route_id = $1 AND company_id = $2 AND completion_date = $3",
        )
        .bind(route_id)
        .bind(company_id)
        .bind(Utc::now().date_naive())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
