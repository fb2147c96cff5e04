use crate::models::notification::Notification;
use crate::utils::errors::AppResult;
use sqlx::PgPool;

pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, notification: &Notification) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, company_id, sender_id, sender_role, recipient_role,
                recipient_id, route_id, title, message, notification_type, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(notification.id)
        .bind(notification.company_id)
        .bind(notification.sender_id)
        .bind(&notification.sender_role)
        .bind(&notification.recipient_role)
        .bind(notification.recipient_id)
        .bind(notification.route_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.notification_type)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
