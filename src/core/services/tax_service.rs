use uuid::Uuid;

use crate::domain::{MonthlyRecord, Tax};

use super::{ServiceError, ServiceResult};

/// Typed per-field update for a tax entry.
#[derive(Debug, Clone)]
pub enum TaxField {
    Name(String),
    Amount(f64),
    Year(i32),
    Quarter(Option<u8>),
    Paid(bool),
}

pub struct TaxService;

impl TaxService {
    pub fn add(
        record: &mut MonthlyRecord,
        name: &str,
        amount: f64,
        year: i32,
        quarter: Option<u8>,
    ) -> ServiceResult<Uuid> {
        validate_name(name)?;
        validate_amount(amount)?;
        validate_quarter(quarter)?;
        Ok(record.add_tax(Tax::new(name.trim(), amount, year, quarter)))
    }

    pub fn update(record: &mut MonthlyRecord, id: Uuid, field: TaxField) -> ServiceResult<()> {
        match &field {
            TaxField::Name(name) => validate_name(name)?,
            TaxField::Amount(amount) => validate_amount(*amount)?,
            TaxField::Quarter(quarter) => validate_quarter(*quarter)?,
            _ => {}
        }
        let tax = record
            .tax_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Tax not found".into()))?;
        match field {
            TaxField::Name(name) => tax.name = name.trim().to_string(),
            TaxField::Amount(amount) => tax.amount = amount,
            TaxField::Year(year) => tax.year = year,
            TaxField::Quarter(quarter) => tax.quarter = quarter,
            TaxField::Paid(paid) => tax.paid = paid,
        }
        Ok(())
    }

    pub fn remove(record: &mut MonthlyRecord, id: Uuid) -> ServiceResult<()> {
        let before = record.taxes.len();
        record.taxes.retain(|tax| tax.id != id);
        if record.taxes.len() == before {
            return Err(ServiceError::Invalid("Tax not found".into()));
        }
        Ok(())
    }

    pub fn list(record: &MonthlyRecord) -> Vec<&Tax> {
        record.taxes.iter().collect()
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

fn validate_quarter(quarter: Option<u8>) -> ServiceResult<()> {
    match quarter {
        Some(q) if !(1..=4).contains(&q) => {
            Err(ServiceError::Invalid("Quarter must be 1-4".into()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonthKey;

    #[test]
    fn tax_lifecycle_with_quarter() {
        let mut record = MonthlyRecord::new(MonthKey::new(2024, 7));
        let id = TaxService::add(&mut record, "VAT", 1_200_000.0, 2024, Some(2)).expect("add");
        TaxService::update(&mut record, id, TaxField::Paid(true)).expect("paid");
        TaxService::update(&mut record, id, TaxField::Quarter(None)).expect("clear quarter");
        let tax = &record.taxes[0];
        assert!(tax.paid);
        assert_eq!(tax.quarter, None);

        TaxService::remove(&mut record, id).expect("remove");
        assert!(record.taxes.is_empty());
    }

    #[test]
    fn out_of_range_quarter_is_invalid() {
        let mut record = MonthlyRecord::new(MonthKey::new(2024, 7));
        let err = TaxService::add(&mut record, "VAT", 100.0, 2024, Some(5)).expect_err("q5");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }
}
