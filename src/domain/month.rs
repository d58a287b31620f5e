use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    commission::CommissionIncome,
    expense::{FixedExpense, VariableExpense},
    operational::OperationalExpense,
    tax::Tax,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Storage key prefix shared by every persisted month record.
pub const RECORD_KEY_PREFIX: &str = "monthlyData-";

const SEED_COMMISSION_INCOMES: [&str; 2] = ["Sale brokerage fee", "Rental brokerage fee"];

const SEED_FIXED_EXPENSES: [&str; 6] = [
    "Office rent",
    "Internet",
    "Internet phone",
    "Water purifier",
    "Association dues",
    "Listing network fee",
];

const SEED_VARIABLE_EXPENSES: [&str; 4] = [
    "Withholding tax",
    "Local tax",
    "Health insurance",
    "National pension",
];

/// Composite (year, month) key identifying one record.
///
/// Ordering is numeric on year then month, so sorting a key list never
/// falls into the lexicographic "11" before "2" trap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Key for the current calendar month.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Storage key, month unpadded: `monthlyData-2024-7`.
    pub fn storage_key(&self) -> String {
        format!("{}{}-{}", RECORD_KEY_PREFIX, self.year, self.month)
    }

    /// Display label, month zero-padded: `2024-07`.
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    pub fn parse_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(RECORD_KEY_PREFIX)
            .and_then(Self::parse_label)
    }

    /// Parses `2024-7` or `2024-07` into a key; months outside 1..=12 are rejected.
    pub fn parse_label(raw: &str) -> Option<Self> {
        let (year, month) = raw.split_once('-')?;
        let year = year.trim().parse::<i32>().ok()?;
        let month = month.trim().parse::<u32>().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One month of office finances: base income plus the commission and
/// expense collections. Exactly one record exists per (year, month) key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyRecord {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub income: f64,
    #[serde(default)]
    pub commission_incomes: Vec<CommissionIncome>,
    #[serde(default)]
    pub fixed_expenses: Vec<FixedExpense>,
    #[serde(default)]
    pub variable_expenses: Vec<VariableExpense>,
    #[serde(default)]
    pub taxes: Vec<Tax>,
    #[serde(default)]
    pub operational_expenses: Vec<OperationalExpense>,
    #[serde(default = "MonthlyRecord::schema_version_default")]
    pub schema_version: u8,
}

impl MonthlyRecord {
    /// Empty record for the key, no seeded line items.
    pub fn new(key: MonthKey) -> Self {
        Self {
            year: key.year,
            month: key.month,
            income: 0.0,
            commission_incomes: Vec::new(),
            fixed_expenses: Vec::new(),
            variable_expenses: Vec::new(),
            taxes: Vec::new(),
            operational_expenses: Vec::new(),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Default record created on first access to a month: two commission
    /// placeholders, six fixed and four variable expense entries, all
    /// amounts zero.
    pub fn seeded(key: MonthKey) -> Self {
        let mut record = Self::new(key);
        for name in SEED_COMMISSION_INCOMES {
            record.commission_incomes.push(CommissionIncome::new(name));
        }
        for name in SEED_FIXED_EXPENSES {
            record
                .fixed_expenses
                .push(FixedExpense::new(name, 0.0, "01"));
        }
        for name in SEED_VARIABLE_EXPENSES {
            record.variable_expenses.push(VariableExpense::new(name, 0.0));
        }
        record
    }

    pub fn key(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }

    pub fn add_commission_income(&mut self, income: CommissionIncome) -> Uuid {
        let id = income.id;
        self.commission_incomes.push(income);
        id
    }

    pub fn add_fixed_expense(&mut self, expense: FixedExpense) -> Uuid {
        let id = expense.id;
        self.fixed_expenses.push(expense);
        id
    }

    pub fn add_variable_expense(&mut self, expense: VariableExpense) -> Uuid {
        let id = expense.id;
        self.variable_expenses.push(expense);
        id
    }

    pub fn add_tax(&mut self, tax: Tax) -> Uuid {
        let id = tax.id;
        self.taxes.push(tax);
        id
    }

    pub fn add_operational_expense(&mut self, expense: OperationalExpense) -> Uuid {
        let id = expense.id;
        self.operational_expenses.push(expense);
        id
    }

    pub fn commission_income_mut(&mut self, id: Uuid) -> Option<&mut CommissionIncome> {
        self.commission_incomes.iter_mut().find(|item| item.id == id)
    }

    pub fn fixed_expense_mut(&mut self, id: Uuid) -> Option<&mut FixedExpense> {
        self.fixed_expenses.iter_mut().find(|item| item.id == id)
    }

    pub fn variable_expense_mut(&mut self, id: Uuid) -> Option<&mut VariableExpense> {
        self.variable_expenses.iter_mut().find(|item| item.id == id)
    }

    pub fn tax_mut(&mut self, id: Uuid) -> Option<&mut Tax> {
        self.taxes.iter_mut().find(|item| item.id == id)
    }

    pub fn operational_expense_mut(&mut self, id: Uuid) -> Option<&mut OperationalExpense> {
        self.operational_expenses.iter_mut().find(|item| item.id == id)
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_key_keeps_month_unpadded() {
        let key = MonthKey::new(2024, 7);
        assert_eq!(key.storage_key(), "monthlyData-2024-7");
        assert_eq!(key.label(), "2024-07");
    }

    #[test]
    fn parse_storage_key_round_trips() {
        let key = MonthKey::new(2024, 11);
        assert_eq!(MonthKey::parse_storage_key(&key.storage_key()), Some(key));
        assert_eq!(MonthKey::parse_storage_key("monthlyData-2024-0"), None);
        assert_eq!(MonthKey::parse_storage_key("monthlyData-2024-13"), None);
        assert_eq!(MonthKey::parse_storage_key("fixedExpenseTemplates"), None);
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        let mut keys = vec![
            MonthKey::new(2024, 1),
            MonthKey::new(2023, 5),
            MonthKey::new(2024, 11),
        ];
        keys.sort_by(|a, b| b.cmp(a));
        assert_eq!(
            keys,
            vec![
                MonthKey::new(2024, 11),
                MonthKey::new(2024, 1),
                MonthKey::new(2023, 5),
            ]
        );
    }

    #[test]
    fn navigation_wraps_across_years() {
        assert_eq!(MonthKey::new(2024, 12).next(), MonthKey::new(2025, 1));
        assert_eq!(MonthKey::new(2024, 1).prev(), MonthKey::new(2023, 12));
        assert_eq!(MonthKey::new(2024, 6).next(), MonthKey::new(2024, 7));
        assert_eq!(MonthKey::new(2024, 6).prev(), MonthKey::new(2024, 5));
    }

    #[test]
    fn seeded_record_matches_default_shape() {
        let record = MonthlyRecord::seeded(MonthKey::new(2024, 7));
        assert_eq!(record.commission_incomes.len(), 2);
        assert_eq!(record.fixed_expenses.len(), 6);
        assert_eq!(record.variable_expenses.len(), 4);
        assert!(record.taxes.is_empty());
        assert!(record.operational_expenses.is_empty());
        assert_eq!(record.income, 0.0);
        assert!(record.fixed_expenses.iter().all(|e| e.amount == 0.0 && !e.paid));
        assert!(record.commission_incomes.iter().all(|c| !c.received));
    }
}
