//! Notification Fan-out
//!
//! Colaborador delgado: persiste la fila de notificación que resuelven el
//! stop progress tracker y el duty lifecycle. El transporte (push, email)
//! vive fuera de este servicio.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::auth::UserRole;
use crate::models::notification::Notification;
use crate::repositories::store::ResourceStore;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct NotificationService {
    store: Arc<dyn ResourceStore>,
}

impl NotificationService {
    pub fn new(store: Arc<dyn ResourceStore>) -> Self {
        Self { store }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_system_notification(
        &self,
        company_id: Uuid,
        sender_id: Uuid,
        sender_role: UserRole,
        recipient_role: UserRole,
        recipient_id: Option<Uuid>,
        route_id: Option<Uuid>,
        title: &str,
        message: &str,
        notification_type: &str,
    ) -> AppResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4(),
            company_id,
            sender_id,
            sender_role: sender_role.to_string(),
            recipient_role: recipient_role.to_string(),
            recipient_id,
            route_id,
            title: title.to_string(),
            message: message.to_string(),
            notification_type: notification_type.to_string(),
            created_at: Utc::now(),
        };
        self.store.create_notification(&notification).await?;

        Ok(notification)
    }
}
