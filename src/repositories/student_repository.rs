use crate::models::student::{AttendanceCounts, Student};
use crate::models::user::User;
use crate::utils::errors::AppResult;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid, company_id: Uuid) -> AppResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE id = $1 AND company_id = $2",
        )
        .bind(id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    pub async fn find_by_stop(&self, route_stop_id: Uuid, company_id: Uuid) -> AppResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE route_stop_id = $1 AND company_id = $2",
        )
        .bind(route_stop_id)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    /// Tutores vinculados a un student via student_guardians
    pub async fn guardians_of(&self, student_id: Uuid, company_id: Uuid) -> AppResult<Vec<User>> {
        let guardians = sqlx::query_as::<_, User>(
            r#"
            SELECT u.*
            FROM users u
            JOIN student_guardians sg ON sg.guardian_id = u.id
            WHERE sg.student_id = $1 AND u.company_id = $2
            "#,
        )
        .bind(student_id)
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(guardians)
    }

    pub async fn count_today_attendance(&self, route_id: Uuid, company_id: Uuid) -> AppResult<AttendanceCounts> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'present'),
                COUNT(*) FILTER (WHERE status = 'dropped_off')
            FROM attendance
            WHERE route_id = $1 AND company_id = $2 AND attendance_date = $3
            "#,
        )
        .bind(route_id)
        .bind(company_id)
        .bind(Utc::now().date_naive())
        .fetch_one(&self.pool)
        .await?;

        Ok(AttendanceCounts {
            present: counts.0,
            dropped_off: counts.1,
        })
    }
}
