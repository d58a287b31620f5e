use tracing::warn;

use crate::domain::{MonthKey, MonthlyRecord, RECORD_KEY_PREFIX};
use crate::storage::KeyValueStore;

use super::ServiceResult;

/// Income, expense and profit totals for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordTotals {
    pub base_income: f64,
    pub commission_income: f64,
    pub total_income: f64,
    pub fixed_expenses: f64,
    pub variable_expenses: f64,
    pub taxes: f64,
    pub operational_expenses: f64,
    pub total_expenses: f64,
    pub profit: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn totals(record: &MonthlyRecord) -> RecordTotals {
        let commission_income: f64 = record
            .commission_incomes
            .iter()
            .map(|income| income.display_total())
            .sum();
        let fixed_expenses: f64 = record.fixed_expenses.iter().map(|e| e.amount).sum();
        let variable_expenses: f64 = record.variable_expenses.iter().map(|e| e.amount).sum();
        let taxes: f64 = record.taxes.iter().map(|t| t.amount).sum();
        let operational_expenses: f64 =
            record.operational_expenses.iter().map(|e| e.amount).sum();

        let total_income = record.income + commission_income;
        let total_expenses = fixed_expenses + variable_expenses + taxes + operational_expenses;

        RecordTotals {
            base_income: record.income,
            commission_income,
            total_income,
            fixed_expenses,
            variable_expenses,
            taxes,
            operational_expenses,
            total_expenses,
            profit: total_income - total_expenses,
        }
    }

    pub fn profit(record: &MonthlyRecord) -> f64 {
        Self::totals(record).profit
    }

    /// Every month with a saved record, newest first. Keys that do not
    /// parse as month keys are skipped with a warning.
    pub fn list_saved_months(store: &dyn KeyValueStore) -> ServiceResult<Vec<MonthKey>> {
        let mut months = Vec::new();
        for key in store.list_keys(RECORD_KEY_PREFIX)? {
            match MonthKey::parse_storage_key(&key) {
                Some(month) => months.push(month),
                None => warn!(key, "ignoring record with unrecognized key"),
            }
        }
        months.sort_unstable_by(|a, b| b.cmp(a));
        Ok(months)
    }

    /// Groups an already-sorted month list by year, preserving order
    /// within each group.
    pub fn group_by_year(months: &[MonthKey]) -> Vec<(i32, Vec<MonthKey>)> {
        let mut groups: Vec<(i32, Vec<MonthKey>)> = Vec::new();
        for month in months {
            match groups.last_mut() {
                Some((year, group)) if *year == month.year => group.push(*month),
                _ => groups.push((month.year, vec![*month])),
            }
        }
        groups
    }

    /// Totals for a stored month, straight from the store. Unsaved
    /// edits to the open month are not reflected here.
    pub fn summarize(
        store: &dyn KeyValueStore,
        month: MonthKey,
    ) -> ServiceResult<Option<RecordTotals>> {
        let Some(data) = store.get(&month.storage_key())? else {
            return Ok(None);
        };
        match serde_json::from_str::<MonthlyRecord>(&data) {
            Ok(record) => Ok(Some(Self::totals(&record))),
            Err(err) => {
                warn!(month = %month, error = %err, "stored record unreadable; skipping summary");
                Ok(None)
            }
        }
    }
}
