//! Work entry CRUD: per-day task logs tied to an account.

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::{account, work_entry};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkEntry {
    pub email: String,
    pub task: String,
    pub hours: f64,
    #[serde(rename = "workedOn")]
    pub worked_on: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkEntryPatch {
    pub task: Option<String>,
    pub hours: Option<f64>,
    #[serde(rename = "workedOn")]
    pub worked_on: Option<NaiveDate>,
}

fn validate_hours(hours: f64) -> Result<(), ServiceError> {
    if !(0.0..=24.0).contains(&hours) {
        return Err(ServiceError::Validation("hours must be between 0 and 24".into()));
    }
    Ok(())
}

/// Record a work entry against the account owning `email`.
pub async fn create_entry(db: &DatabaseConnection, input: NewWorkEntry) -> Result<work_entry::Model, ServiceError> {
    if input.task.trim().is_empty() {
        return Err(ServiceError::Validation("task must not be empty".into()));
    }
    validate_hours(input.hours)?;
    let owner = account::find_by_email(db, &input.email)
        .await?
        .ok_or_else(|| ServiceError::not_found("account"))?;

    let am = work_entry::ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(owner.id),
        email: Set(owner.email.clone()),
        username: Set(owner.username.clone()),
        task: Set(input.task),
        hours: Set(input.hours),
        worked_on: Set(input.worked_on),
        created_at: Set(chrono::Utc::now().into()),
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    info!(email = %created.email, entry = %created.id, "work_entry_created");
    Ok(created)
}

/// All entries, most recent work day first.
pub async fn list_entries(db: &DatabaseConnection) -> Result<Vec<work_entry::Model>, ServiceError> {
    let rows = work_entry::Entity::find()
        .order_by_desc(work_entry::Column::WorkedOn)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Entries logged by one account, most recent work day first.
pub async fn list_entries_for_account(db: &DatabaseConnection, account_id: Uuid) -> Result<Vec<work_entry::Model>, ServiceError> {
    let rows = work_entry::Entity::find()
        .filter(work_entry::Column::AccountId.eq(account_id))
        .order_by_desc(work_entry::Column::WorkedOn)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows)
}

/// Apply a partial update to an entry.
pub async fn update_entry(db: &DatabaseConnection, id: Uuid, patch: WorkEntryPatch) -> Result<work_entry::Model, ServiceError> {
    let found = work_entry::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("work entry"))?;

    let mut am: work_entry::ActiveModel = found.into();
    if let Some(task) = patch.task {
        if task.trim().is_empty() {
            return Err(ServiceError::Validation("task must not be empty".into()));
        }
        am.task = Set(task);
    }
    if let Some(hours) = patch.hours {
        validate_hours(hours)?;
        am.hours = Set(hours);
    }
    if let Some(worked_on) = patch.worked_on {
        am.worked_on = Set(worked_on);
    }
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(updated)
}

pub async fn delete_entry(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = work_entry::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("work entry"));
    }
    info!(entry = %id, "work_entry_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use models::account::AccountType;

    #[test]
    fn hours_bounds() {
        assert!(validate_hours(0.0).is_ok());
        assert!(validate_hours(8.5).is_ok());
        assert!(validate_hours(24.0).is_ok());
        assert!(validate_hours(-1.0).is_err());
        assert!(validate_hours(25.0).is_err());
    }

    #[tokio::test]
    async fn work_entry_crud_service() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };

        let email = format!("work_{}@example.com", Uuid::new_v4());
        let owner = account::create(&db, account::NewAccount {
            email: email.clone(),
            password_hash: None,
            username: "Work Tester".into(),
            account_type: AccountType::Employee,
            bank_account_number: String::new(),
            uploaded_photo: String::new(),
            salary: None,
        }).await?;

        let entry = create_entry(&db, NewWorkEntry {
            email: email.to_uppercase(),
            task: "quarterly report".into(),
            hours: 6.5,
            worked_on: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
        }).await?;
        assert_eq!(entry.account_id, owner.id);
        assert_eq!(entry.email, owner.email);

        let mine = list_entries_for_account(&db, owner.id).await?;
        assert_eq!(mine.len(), 1);

        let updated = update_entry(&db, entry.id, WorkEntryPatch {
            hours: Some(7.0),
            ..Default::default()
        }).await?;
        assert_eq!(updated.hours, 7.0);
        assert_eq!(updated.task, "quarterly report");

        delete_entry(&db, entry.id).await?;
        assert!(matches!(
            delete_entry(&db, entry.id).await,
            Err(ServiceError::NotFound(_))
        ));

        account::hard_delete(&db, owner.id).await?;
        Ok(())
    }
}
