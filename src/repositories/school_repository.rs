use crate::models::school::School;
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SchoolRepository {
    pool: PgPool,
}

impl SchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<School>> {
        let school = sqlx::query_as::<_, School>(
            "SELECT * FROM schools WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(school)
    }
}
