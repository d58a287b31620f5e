use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expense::FixedExpense;

/// Storage key holding the template list as a JSON array.
pub const TEMPLATES_KEY: &str = "fixedExpenseTemplates";

/// Month-independent blueprint for a recurring fixed expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedExpenseTemplate {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_date: String,
    #[serde(default)]
    pub active: bool,
}

impl FixedExpenseTemplate {
    pub fn new(name: impl Into<String>, amount: f64, payment_date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            payment_date: payment_date.into(),
            active: true,
        }
    }

    /// Materializes the blueprint as a fresh unpaid expense. Every call
    /// produces a new id, so applying a template twice duplicates the
    /// entry rather than replacing it.
    pub fn to_expense(&self) -> FixedExpense {
        FixedExpense::new(self.name.clone(), self.amount, self.payment_date.clone())
    }
}
