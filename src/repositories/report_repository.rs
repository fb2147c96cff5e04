use crate::models::shift_report::ShiftReport;
use crate::utils::errors::AppResult;
use sqlx::PgPool;

pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, report: &ShiftReport) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO driver_shift_reports (
                id, company_id, driver_id, bus_id, route_id,
                duty_start, duty_end, total_duration_minutes,
                starting_fuel, ending_fuel,
                schools_visited, students_present, students_dropped_off, stops_completed,
                summary, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(report.id)
        .bind(report.company_id)
        .bind(report.driver_id)
        .bind(report.bus_id)
        .bind(report.route_id)
        .bind(report.duty_start)
        .bind(report.duty_end)
        .bind(report.total_duration_minutes)
        .bind(report.starting_fuel)
        .bind(report.ending_fuel)
        .bind(report.schools_visited)
        .bind(report.students_present)
        .bind(report.students_dropped_off)
        .bind(report.stops_completed)
        .bind(&report.summary)
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
