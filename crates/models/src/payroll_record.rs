use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// Payment status of a payroll record.
/// `PendingApproval --mark paid--> Paid` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
pub enum PayStatus {
    #[sea_orm(string_value = "Pending Approval")]
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    #[sea_orm(string_value = "Paid")]
    Paid,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payroll_record")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Lowercase employee email; together with (month, year) the unique period key.
    pub email: String,
    pub employee_name: String,
    /// Salary snapshot at record creation, not live-linked to the account.
    pub salary: i64,
    pub month: i32,
    pub year: i32,
    pub status: PayStatus,
    pub payment_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations defined")
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_period(month: i32, year: i32) -> Result<(), ModelError> {
    if !(1..=12).contains(&month) {
        return Err(ModelError::Validation(format!("month out of range: {}", month)));
    }
    if year < 1970 {
        return Err(ModelError::Validation(format!("year out of range: {}", year)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_enforced() {
        assert!(validate_period(0, 2024).is_err());
        assert!(validate_period(13, 2024).is_err());
        assert!(validate_period(1, 2024).is_ok());
        assert!(validate_period(12, 2024).is_ok());
    }

    #[test]
    fn year_floor_enforced() {
        assert!(validate_period(6, 1969).is_err());
    }
}
