use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{MonthlyRecord, OperationalCategory, OperationalExpense};

use super::{ServiceError, ServiceResult};

/// Typed per-field update for an operational expense.
#[derive(Debug, Clone)]
pub enum OperationalField {
    Date(NaiveDate),
    Description(String),
    Amount(f64),
    Category(OperationalCategory),
}

pub struct OperationalService;

impl OperationalService {
    pub fn add(
        record: &mut MonthlyRecord,
        date: NaiveDate,
        description: &str,
        amount: f64,
        category: OperationalCategory,
    ) -> ServiceResult<Uuid> {
        validate_description(description)?;
        validate_amount(amount)?;
        Ok(record.add_operational_expense(OperationalExpense::new(
            date,
            description.trim(),
            amount,
            category,
        )))
    }

    pub fn update(
        record: &mut MonthlyRecord,
        id: Uuid,
        field: OperationalField,
    ) -> ServiceResult<()> {
        match &field {
            OperationalField::Description(description) => validate_description(description)?,
            OperationalField::Amount(amount) => validate_amount(*amount)?,
            _ => {}
        }
        let expense = record
            .operational_expense_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Operational expense not found".into()))?;
        match field {
            OperationalField::Date(date) => expense.date = date,
            OperationalField::Description(description) => {
                expense.description = description.trim().to_string()
            }
            OperationalField::Amount(amount) => expense.amount = amount,
            OperationalField::Category(category) => expense.category = category,
        }
        Ok(())
    }

    pub fn remove(record: &mut MonthlyRecord, id: Uuid) -> ServiceResult<()> {
        let before = record.operational_expenses.len();
        record.operational_expenses.retain(|expense| expense.id != id);
        if record.operational_expenses.len() == before {
            return Err(ServiceError::Invalid("Operational expense not found".into()));
        }
        Ok(())
    }

    pub fn list(record: &MonthlyRecord) -> Vec<&OperationalExpense> {
        record.operational_expenses.iter().collect()
    }
}

fn validate_description(description: &str) -> ServiceResult<()> {
    if description.trim().is_empty() {
        Err(ServiceError::Invalid("Description cannot be empty".into()))
    } else {
        Ok(())
    }
}

fn validate_amount(amount: f64) -> ServiceResult<()> {
    if !amount.is_finite() {
        Err(ServiceError::Invalid("Amount must be a number".into()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonthKey;

    #[test]
    fn operational_expense_lifecycle() {
        let mut record = MonthlyRecord::new(MonthKey::new(2024, 7));
        let date = NaiveDate::from_ymd_opt(2024, 7, 12).expect("date");
        let id = OperationalService::add(
            &mut record,
            date,
            "Toner cartridges",
            45_000.0,
            OperationalCategory::Equipment,
        )
        .expect("add");

        OperationalService::update(
            &mut record,
            id,
            OperationalField::Category(OperationalCategory::Maintenance),
        )
        .expect("category");
        OperationalService::update(&mut record, id, OperationalField::Amount(52_000.0))
            .expect("amount");
        let expense = &record.operational_expenses[0];
        assert_eq!(expense.category, OperationalCategory::Maintenance);
        assert_eq!(expense.amount, 52_000.0);

        OperationalService::remove(&mut record, id).expect("remove");
        assert!(record.operational_expenses.is_empty());
    }

    #[test]
    fn blank_description_is_invalid() {
        let mut record = MonthlyRecord::new(MonthKey::new(2024, 7));
        let date = NaiveDate::from_ymd_opt(2024, 7, 12).expect("date");
        let err = OperationalService::add(&mut record, date, "  ", 1_000.0, OperationalCategory::Other)
            .expect_err("blank");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }
}
