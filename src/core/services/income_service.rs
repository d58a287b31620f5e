use uuid::Uuid;

use crate::domain::{CommissionIncome, MonthlyRecord, TransactionSide};

use super::{ServiceError, ServiceResult};

/// Typed per-field update for a commission income. Every mutation goes
/// through one of these variants; there is no stringly field name.
#[derive(Debug, Clone)]
pub enum CommissionField {
    Name(String),
    Property(String),
    Room(String),
    Deposit(f64),
    MonthlyRent(f64),
    OtherFees(f64),
    ActualAmount(Option<f64>),
    Side(TransactionSide),
    Received(bool),
    Memo(String),
}

pub struct IncomeService;

impl IncomeService {
    pub fn add(record: &mut MonthlyRecord, mut income: CommissionIncome) -> ServiceResult<Uuid> {
        validate_name(&income.name)?;
        validate_amounts(&income)?;
        income.recompute();
        Ok(record.add_commission_income(income))
    }

    /// Applies one field update, then refreshes the computed fee so the
    /// `commission`/`amount` invariant holds after every mutation.
    pub fn update(record: &mut MonthlyRecord, id: Uuid, field: CommissionField) -> ServiceResult<()> {
        if let CommissionField::Name(name) = &field {
            validate_name(name)?;
        }
        let income = record
            .commission_income_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Commission income not found".into()))?;
        match field {
            CommissionField::Name(name) => income.name = name,
            CommissionField::Property(property) => income.property = property,
            CommissionField::Room(room) => income.room = room,
            CommissionField::Deposit(deposit) => income.deposit = deposit,
            CommissionField::MonthlyRent(rent) => income.monthly_rent = rent,
            CommissionField::OtherFees(fees) => income.other_fees = fees,
            CommissionField::ActualAmount(actual) => income.actual_amount = actual,
            CommissionField::Side(side) => income.side = side,
            CommissionField::Received(received) => income.received = received,
            CommissionField::Memo(memo) => income.memo = memo,
        }
        income.recompute();
        Ok(())
    }

    pub fn remove(record: &mut MonthlyRecord, id: Uuid) -> ServiceResult<()> {
        let before = record.commission_incomes.len();
        record.commission_incomes.retain(|income| income.id != id);
        if record.commission_incomes.len() == before {
            return Err(ServiceError::Invalid("Commission income not found".into()));
        }
        Ok(())
    }

    pub fn list(record: &MonthlyRecord) -> Vec<&CommissionIncome> {
        record.commission_incomes.iter().collect()
    }

    /// Base income besides commissions.
    pub fn set_base_income(record: &mut MonthlyRecord, amount: f64) -> ServiceResult<()> {
        if !amount.is_finite() {
            return Err(ServiceError::Invalid("Income must be a number".into()));
        }
        record.income = amount;
        Ok(())
    }
}

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        Err(ServiceError::Invalid("Name cannot be empty".into()))
    } else {
        Ok(())
    }
}

fn validate_amounts(income: &CommissionIncome) -> ServiceResult<()> {
    for value in [income.deposit, income.monthly_rent, income.other_fees] {
        if !value.is_finite() {
            return Err(ServiceError::Invalid("Amounts must be numbers".into()));
        }
    }
    Ok(())
}
