use crate::models::route::{Route, RouteStop};
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

pub struct RouteRepository {
    pool: PgPool,
}

impl RouteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn find_by_driver(&self, driver_id: Uuid, company_id: Uuid) -> AppResult<Option<Route>> {
        let route = sqlx::query_as::<_, Route>(
            "SELECT * FROM routes WHERE driver_id = $1 AND company_id = $2",
        )
        .bind(driver_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(route)
    }

    pub async fn update_driver(&self, route: &Route) -> AppResult<()> {
        sqlx::query("UPDATE routes SET driver_id = $3 WHERE id = $1 AND company_id = $2")
            .bind(route.id)
            .bind(route.company_id)
            .bind(route.driver_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Paradas de la ruta ordenadas por stop_order
    pub async fn stops_by_route(&self, route_id: Uuid, company_id: Uuid) -> AppResult<Vec<RouteStop>> {
        let stops = sqlx::query_as::<_, RouteStop>(
            r#"
            SELECT rs.*
            FROM route_stops rs
            JOIN routes r ON r.id = rs.route_id
            WHERE rs.route_id = $1 AND r.company_id = $2
            ORDER BY rs.stop_order
            "#,
        )
        .bind(route_id)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stops)
    }
}
