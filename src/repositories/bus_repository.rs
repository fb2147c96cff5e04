use crate::models::bus::Bus;
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

pub struct BusRepository {
    pool: PgPool,
}

impl BusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>> {
        let bus = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bus)
    }

    pub async fn find_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Bus>> {
        let bus = sqlx::query_as::<_, Bus>(
            "SELECT * FROM buses WHERE driver_id = $1 AND company_id = $2",
        )
        .bind(driver_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bus)
    }

    /// Persistir los campos de asignación y estado operativo del bus.
    /// La posición GPS la escribe el flujo de tracking, no este core.
    pub async fn update_assignment_fields(&self, bus: &Bus) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE buses
            SET driver_id = $3,
                status = $4,
                current_route_id = $5,
                fuel_level = $6
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(bus.id)
        .bind(bus.company_id)
        .bind(bus.driver_id)
        .bind(bus.status)
        .bind(bus.current_route_id)
        .bind(bus.fuel_level)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
