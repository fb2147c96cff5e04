use crate::models::user::User;
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Persistir los campos de turno de un user. Los campos de identidad
    /// (nombre, email, rol) los administra otro flujo.
    pub async fn update_duty_fields(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_on_duty = $3,
                duty_start_time = $4,
                assigned_route_id = $5,
                fuel_level = $6,
                interior_clean = $7,
                exterior_clean = $8,
                check_in_time = $9
            WHERE id = $1 AND company_id = $2
            "#,
        )
        .bind(user.id)
        .bind(user.company_id)
        .bind(user.is_on_duty)
        .bind(user.duty_start_time)
        .bind(user.assigned_route_id)
        .bind(user.fuel_level)
        .bind(user.interior_clean)
        .bind(user.exterior_clean)
        .bind(user.check_in_time)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
