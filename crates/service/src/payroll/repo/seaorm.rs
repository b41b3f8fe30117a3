use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use models::{account, payment, payroll_record};

use crate::auth::repo::seaorm::is_unique_violation;
use crate::payroll::domain::{AccountType, PayStatus, PaymentEntry, PayrollRecord, Period, SalaryIncrease};
use crate::payroll::errors::PayrollError;
use crate::payroll::repository::{AccountSummary, NewPayrollRecord, PayrollRepository};

pub struct SeaOrmPayrollRepository {
    pub db: DatabaseConnection,
}

fn repo_err(e: sea_orm::DbErr) -> PayrollError {
    PayrollError::Repository(e.to_string())
}

#[async_trait::async_trait]
impl PayrollRepository for SeaOrmPayrollRepository {
    async fn insert_record(&self, rec: NewPayrollRecord) -> Result<PayrollRecord, PayrollError> {
        let am = payroll_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(rec.email.clone()),
            employee_name: Set(rec.employee_name),
            salary: Set(rec.salary),
            month: Set(rec.month),
            year: Set(rec.year),
            status: Set(rec.status),
            payment_date: Set(None),
            created_at: Set(Utc::now().into()),
        };
        match am.insert(&self.db).await {
            Ok(m) => Ok(PayrollRecord::from(m)),
            // uniq_payroll_email_month_year caught a concurrent duplicate
            Err(e) if is_unique_violation(&e) => Err(PayrollError::DuplicatePeriod(format!(
                "{} {}/{}", rec.email, rec.month, rec.year
            ))),
            Err(e) => Err(repo_err(e)),
        }
    }

    async fn find_record(&self, id: Uuid) -> Result<Option<PayrollRecord>, PayrollError> {
        let found = payroll_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(found.map(PayrollRecord::from))
    }

    async fn list_records(&self) -> Result<Vec<PayrollRecord>, PayrollError> {
        let rows = payroll_record::Entity::find()
            .order_by_desc(payroll_record::Column::Year)
            .order_by_desc(payroll_record::Column::Month)
            .all(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(rows.into_iter().map(PayrollRecord::from).collect())
    }

    async fn mark_paid(&self, id: Uuid, paid_on: NaiveDate)
        -> Result<Option<(PayrollRecord, PayStatus)>, PayrollError>
    {
        let found = payroll_record::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        let Some(model) = found else { return Ok(None) };
        let previous = model.status;

        let mut am: payroll_record::ActiveModel = model.into();
        am.status = Set(PayStatus::Paid);
        am.payment_date = Set(Some(paid_on));
        let updated = am.update(&self.db).await.map_err(repo_err)?;
        Ok(Some((PayrollRecord::from(updated), previous)))
    }

    async fn increase_salary_across_periods(&self, email: &str, increment: i64)
        -> Result<SalaryIncrease, PayrollError>
    {
        let email = models::account::normalize_email(email);
        let txn = self.db.begin().await.map_err(repo_err)?;

        let latest = payroll_record::Entity::find()
            .filter(payroll_record::Column::Email.eq(email.clone()))
            .order_by_desc(payroll_record::Column::Year)
            .order_by_desc(payroll_record::Column::Month)
            .one(&txn)
            .await
            .map_err(repo_err)?
            .ok_or(PayrollError::RecordNotFound)?;

        let new_salary = latest.salary + increment;
        if new_salary < 0 {
            txn.rollback().await.map_err(repo_err)?;
            return Err(PayrollError::Validation(format!(
                "resulting salary is negative: {}", new_salary
            )));
        }
        let from = Period::new(latest.year, latest.month);

        // Every record at or after the latest period gets the new salary
        let at_or_after = Condition::any()
            .add(payroll_record::Column::Year.gt(from.year))
            .add(
                Condition::all()
                    .add(payroll_record::Column::Year.eq(from.year))
                    .add(payroll_record::Column::Month.gte(from.month)),
            );
        let updated = payroll_record::Entity::update_many()
            .col_expr(payroll_record::Column::Salary, Expr::value(new_salary))
            .filter(payroll_record::Column::Email.eq(email.clone()))
            .filter(at_or_after)
            .exec(&txn)
            .await
            .map_err(repo_err)?;

        let account_rows = account::Entity::update_many()
            .col_expr(account::Column::Salary, Expr::value(new_salary))
            .col_expr(account::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(account::Column::Email.eq(email.clone()))
            .exec(&txn)
            .await
            .map_err(repo_err)?;
        if account_rows.rows_affected == 0 {
            // Payroll history without an owning account; roll back and surface
            txn.rollback().await.map_err(repo_err)?;
            return Err(PayrollError::Consistency(email));
        }

        txn.commit().await.map_err(repo_err)?;
        Ok(SalaryIncrease {
            email,
            new_salary,
            records_updated: updated.rows_affected,
            effective_from: from,
        })
    }

    async fn find_account(&self, email: &str) -> Result<Option<AccountSummary>, PayrollError> {
        let found = models::account::find_by_email(&self.db, email)
            .await
            .map_err(|e| PayrollError::Repository(e.to_string()))?;
        Ok(found.map(|a| AccountSummary { id: a.id, email: a.email, salary: a.salary }))
    }

    async fn append_payment(
        &self,
        account_id: Uuid,
        period: Period,
        paid_on: NaiveDate,
        salary_at_payment: i64,
    ) -> Result<PaymentEntry, PayrollError> {
        let am = payment::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_id: Set(account_id),
            month: Set(period.month),
            year: Set(period.year),
            paid_on: Set(paid_on),
            salary_at_payment: Set(salary_at_payment),
            created_at: Set(Utc::now().into()),
        };
        match am.insert(&self.db).await {
            Ok(m) => Ok(PaymentEntry::from(m)),
            Err(e) if is_unique_violation(&e) => Err(PayrollError::DuplicatePeriod(format!(
                "{} {}/{}", account_id, period.month, period.year
            ))),
            Err(e) => Err(repo_err(e)),
        }
    }

    async fn set_account_type(&self, id: Uuid, account_type: AccountType) -> Result<u64, PayrollError> {
        let res = account::Entity::update_many()
            .col_expr(account::Column::AccountType, Expr::value(account_type))
            .col_expr(account::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(account::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(res.rows_affected)
    }

    async fn mark_fired(&self, id: Uuid) -> Result<u64, PayrollError> {
        let res = account::Entity::update_many()
            .col_expr(account::Column::IsFired, Expr::value(true))
            .col_expr(account::Column::AccountType, Expr::value(AccountType::Fired))
            .col_expr(account::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(account::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(res.rows_affected)
    }

    async fn account_exists(&self, id: Uuid) -> Result<bool, PayrollError> {
        let found = account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?;
        Ok(found.is_some())
    }
}
