//! Visitor messages left through the public contact form.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;

use models::visitor_message;

use crate::errors::ServiceError;

/// Append a visitor message. The sender address is kept as given apart
/// from whitespace trimming; visitors are not accounts.
pub async fn leave_message(db: &DatabaseConnection, email: &str, message: &str) -> Result<visitor_message::Model, ServiceError> {
    let email = email.trim();
    let message = message.trim();
    if !email.contains('@') {
        return Err(ServiceError::Validation("email must contain '@'".into()));
    }
    if message.is_empty() {
        return Err(ServiceError::Validation("message must not be empty".into()));
    }
    let am = visitor_message::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        message: Set(message.to_string()),
        created_at: Set(chrono::Utc::now().into()),
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(message = %created.id, "visitor_message_recorded");
    Ok(created)
}

/// All messages, newest first.
pub async fn list_messages(db: &DatabaseConnection) -> Result<Vec<visitor_message::Model>, ServiceError> {
    let rows = visitor_message::Entity::find()
        .order_by_desc(visitor_message::Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}
