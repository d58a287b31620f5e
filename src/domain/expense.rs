use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Recurring obligation billed on a fixed day of the month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixedExpense {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_date: String,
    #[serde(default)]
    pub paid: bool,
}

impl FixedExpense {
    pub fn new(name: impl Into<String>, amount: f64, payment_date: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            payment_date: payment_date.into(),
            paid: false,
        }
    }
}

/// Recurring obligation whose amount moves month to month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableExpense {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_date: String,
    #[serde(default)]
    pub paid: bool,
}

impl VariableExpense {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            payment_date: String::new(),
            paid: false,
        }
    }
}

/// Normalizes a day-of-month label to the stored `"01".."31"` form.
/// Returns `None` for anything outside that range.
pub fn normalize_payment_date(raw: &str) -> Option<String> {
    let day = raw.trim().parse::<u8>().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    Some(format!("{day:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_date_is_zero_padded() {
        assert_eq!(normalize_payment_date("1"), Some("01".to_string()));
        assert_eq!(normalize_payment_date("09"), Some("09".to_string()));
        assert_eq!(normalize_payment_date("31"), Some("31".to_string()));
    }

    #[test]
    fn payment_date_rejects_out_of_range() {
        assert_eq!(normalize_payment_date("0"), None);
        assert_eq!(normalize_payment_date("32"), None);
        assert_eq!(normalize_payment_date("first"), None);
    }
}
