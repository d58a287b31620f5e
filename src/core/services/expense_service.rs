use uuid::Uuid;

use crate::domain::{normalize_payment_date, FixedExpense, MonthlyRecord, VariableExpense};

use super::{ServiceError, ServiceResult};

/// Typed per-field update shared by fixed and variable expenses.
#[derive(Debug, Clone)]
pub enum ExpenseField {
    Name(String),
    Amount(f64),
    PaymentDate(String),
    Paid(bool),
}

pub struct ExpenseService;

impl ExpenseService {
    pub fn add_fixed(
        record: &mut MonthlyRecord,
        name: &str,
        amount: f64,
        payment_date: &str,
    ) -> ServiceResult<Uuid> {
        validate_name(name)?;
        validate_amount(amount)?;
        let date = normalize_payment_date(payment_date)
            .ok_or_else(|| ServiceError::Invalid("Payment date must be a day 1-31".into()))?;
        Ok(record.add_fixed_expense(FixedExpense::new(name.trim(), amount, date)))
    }

    pub fn add_variable(
        record: &mut MonthlyRecord,
        name: &str,
        amount: f64,
    ) -> ServiceResult<Uuid> {
        validate_name(name)?;
        validate_amount(amount)?;
        Ok(record.add_variable_expense(VariableExpense::new(name.trim(), amount)))
    }

    pub fn update_fixed(
        record: &mut MonthlyRecord,
        id: Uuid,
        field: ExpenseField,
    ) -> ServiceResult<()> {
        let field = normalize_field(field)?;
        let expense = record
            .fixed_expense_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Fixed expense not found".into()))?;
        match field {
            ExpenseField::Name(name) => expense.name = name,
            ExpenseField::Amount(amount) => expense.amount = amount,
            ExpenseField::PaymentDate(date) => expense.payment_date = date,
            ExpenseField::Paid(paid) => expense.paid = paid,
        }
        Ok(())
    }

    pub fn update_variable(
        record: &mut MonthlyRecord,
        id: Uuid,
        field: ExpenseField,
    ) -> ServiceResult<()> {
        let field = normalize_field(field)?;
        let expense = record
            .variable_expense_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Variable expense not found".into()))?;
        match field {
            ExpenseField::Name(name) => expense.name = name,
            ExpenseField::Amount(amount) => expense.amount = amount,
            ExpenseField::PaymentDate(date) => expense.payment_date = date,
            ExpenseField::Paid(paid) => expense.paid = paid,
        }
        Ok(())
    }

    pub fn remove_fixed(record: &mut MonthlyRecord, id: Uuid) -> ServiceResult<()> {
        let before = record.fixed_expenses.len();
        record.fixed_expenses.retain(|expense| expense.id != id);
        if record.fixed_expenses.len() == before {
            return Err(ServiceError::Invalid("Fixed expense not found".into()));
        }
        Ok(())
    }

    pub fn remove_variable(record: &mut MonthlyRecord, id: Uuid) -> ServiceResult<()> {
        let before = record.variable_expenses.len();
        record.variable_expenses.retain(|expense| expense.id != id);
        if record.variable_expenses.len() == before {
            return Err(ServiceError::Invalid("Variable expense not found".into()));
        }
        Ok(())
    }

    pub fn list_fixed(record: &MonthlyRecord) -> Vec<&FixedExpense> {
        record.fixed_expenses.iter().collect()
    }

    pub fn list_variable(record: &MonthlyRecord) -> Vec<&VariableExpense> {
        record.variable_expenses.iter().collect()
    }
}

fn normalize_field(field: ExpenseField) -> ServiceResult<ExpenseField> {
    match field {
        ExpenseField::Name(name) => {
            validate_name(&name)?;
            Ok(ExpenseField::Name(name.trim().to_string()))
        }
        ExpenseField::Amount(amount) => {
            validate_amount(amount)?;
            Ok(ExpenseField::Amount(amount))
        }
        ExpenseField::PaymentDate(date) => {
            let date = normalize_payment_date(&date)
                .ok_or_else(|| ServiceError::Invalid("Payment date must be a day 1-31".into()))?;
            Ok(ExpenseField::PaymentDate(date))
        }
        other => Ok(other),
    }
}

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        Err(ServiceError::Invalid("Name cannot be empty".into()))
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

    fn empty_record() -> MonthlyRecord {
        MonthlyRecord::new(MonthKey::new(2024, 7))
    }

    #[test]
    fn fixed_expense_lifecycle() {
        let mut record = empty_record();
        let id = ExpenseService::add_fixed(&mut record, "Office rent", 500_000.0, "25")
            .expect("add");
        assert_eq!(record.fixed_expenses[0].payment_date, "25");

        ExpenseService::update_fixed(&mut record, id, ExpenseField::Amount(550_000.0))
            .expect("amount");
        ExpenseService::update_fixed(&mut record, id, ExpenseField::Paid(true)).expect("paid");
        ExpenseService::update_fixed(&mut record, id, ExpenseField::PaymentDate("3".into()))
            .expect("date");
        let expense = &record.fixed_expenses[0];
        assert_eq!(expense.amount, 550_000.0);
        assert!(expense.paid);
        assert_eq!(expense.payment_date, "03");

        ExpenseService::remove_fixed(&mut record, id).expect("remove");
        assert!(record.fixed_expenses.is_empty());
    }

    #[test]
    fn variable_expense_lifecycle() {
        let mut record = empty_record();
        let id = ExpenseService::add_variable(&mut record, "Withholding tax", 33_000.0)
            .expect("add");
        ExpenseService::update_variable(&mut record, id, ExpenseField::Name("Local tax".into()))
            .expect("rename");
        assert_eq!(record.variable_expenses[0].name, "Local tax");
        ExpenseService::remove_variable(&mut record, id).expect("remove");
        assert!(record.variable_expenses.is_empty());
    }

    #[test]
    fn invalid_payment_dates_are_rejected() {
        let mut record = empty_record();
        let err = ExpenseService::add_fixed(&mut record, "Internet", 33_000.0, "32")
            .expect_err("day 32");
        assert!(matches!(err, ServiceError::Invalid(_)));

        let id = ExpenseService::add_fixed(&mut record, "Internet", 33_000.0, "15").expect("add");
        let err =
            ExpenseService::update_fixed(&mut record, id, ExpenseField::PaymentDate("0".into()))
                .expect_err("day 0");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn removing_unknown_ids_is_invalid() {
        let mut record = empty_record();
        assert!(ExpenseService::remove_fixed(&mut record, Uuid::new_v4()).is_err());
        assert!(ExpenseService::remove_variable(&mut record, Uuid::new_v4()).is_err());
    }
}
