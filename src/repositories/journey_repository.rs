use crate::models::journey::Journey;
use crate::utils::errors::AppResult;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct JourneyRepository {
    pool: PgPool,
}

impl JourneyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_today_by_bus(&self, bus_id: Uuid, company_id: Uuid) -> AppResult<Option<Journey>> {
        let journey = sqlx::query_as::<_, Journey>(
            "SELECT * FROM bus_journeys WHERE bus_id = $1 AND company_id = $2 AND journey_date = $3",
        )
        .bind(bus_id)
        .bind(company_id)
        .bind(Utc::now().date_naive())
        .fetch_optional(&self.pool)
        .await?;

        Ok(journey)
    }

    pub async fn insert(&self, journey: &Journey) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bus_journeys (
                id, company_id, bus_id, driver_id, route_id, school_id,
                journey_date, homebase_address,
                depart_homebase_at, arrive_school_at, depart_school_at, arrive_homebase_at,
                total_duration_minutes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(journey.id)
        .bind(journey.company_id)
        .bind(journey.bus_id)
        .bind(journey.driver_id)
        .bind(journey.route_id)
        .bind(journey.school_id)
        .bind(journey.journey_date)
        .bind(&journey.homebase_address)
        .bind(journey.depart_homebase_at)
        .bind(journey.arrive_school_at)
        .bind(journey.depart_school_at)
        .bind(journey.arrive_homebase_at)
        .bind(journey.total_duration_minutes)
        .bind(journey.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn update_checkpoints(&self, journey: &Journey) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE bus_journeys
            SET school_id = $3,
                depart_homebase_at = $4,
                arrive_school_at = $5,
                depart_school_at = $6,
                arrive_homebase_at = $7,
                total_duration_minutes = $8
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(journey.id)
        .bind(journey.company_id)
        .bind(journey.school_id)
        .bind(journey.depart_homebase_at)
        .bind(journey.arrive_school_at)
        .bind(journey.depart_school_at)
        .bind(journey.arrive_homebase_at)
        .bind(journey.total_duration_minutes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
