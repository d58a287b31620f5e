use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether the agent brokered one or both sides of the deal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TransactionSide {
    /// Both parties represented; the fee multiplier doubles.
    Double,
    #[default]
    Single,
}

impl TransactionSide {
    pub fn multiplier(self) -> f64 {
        match self {
            TransactionSide::Double => 2.0,
            TransactionSide::Single => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionSide::Double => "double-side",
            TransactionSide::Single => "single-side",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "double" | "double-side" => Some(TransactionSide::Double),
            "single" | "single-side" => Some(TransactionSide::Single),
            _ => None,
        }
    }
}

/// Brokerage fee from the deposit/rent formula. Pure; all-zero inputs
/// yield zero.
pub fn commission_fee(deposit: f64, monthly_rent: f64, other_fees: f64, side: TransactionSide) -> f64 {
    ((monthly_rent * 100.0 + deposit) * 0.004) * side.multiplier() + other_fees
}

/// One brokered deal and the fee it earned the office.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommissionIncome {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub deposit: f64,
    #[serde(default)]
    pub monthly_rent: f64,
    #[serde(default)]
    pub other_fees: f64,
    #[serde(default)]
    pub commission: Option<f64>,
    #[serde(default)]
    pub actual_amount: Option<f64>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub side: TransactionSide,
    #[serde(default)]
    pub received: bool,
    #[serde(default)]
    pub memo: String,
}

impl CommissionIncome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            property: String::new(),
            room: String::new(),
            deposit: 0.0,
            monthly_rent: 0.0,
            other_fees: 0.0,
            commission: None,
            actual_amount: None,
            amount: 0.0,
            side: TransactionSide::default(),
            received: false,
            memo: String::new(),
        }
    }

    /// Refreshes the computed fee and re-mirrors the legacy `amount`
    /// field (`actual_amount` wins when set).
    pub fn recompute(&mut self) {
        let fee = commission_fee(self.deposit, self.monthly_rent, self.other_fees, self.side);
        self.commission = Some(fee);
        self.amount = self.actual_amount.unwrap_or(fee);
    }

    /// Value used in displays and summaries: negotiated actual amount,
    /// else the computed fee, else the legacy amount field.
    pub fn display_total(&self) -> f64 {
        self.actual_amount
            .or(self.commission)
            .unwrap_or(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_side_reference_fee() {
        let fee = commission_fee(10_000_000.0, 500_000.0, 0.0, TransactionSide::Single);
        assert_eq!(fee, 240_000.0);
    }

    #[test]
    fn double_side_reference_fee() {
        let fee = commission_fee(10_000_000.0, 500_000.0, 0.0, TransactionSide::Double);
        assert_eq!(fee, 480_000.0);
    }

    #[test]
    fn zero_inputs_yield_zero_fee() {
        assert_eq!(commission_fee(0.0, 0.0, 0.0, TransactionSide::Single), 0.0);
        assert_eq!(commission_fee(0.0, 0.0, 0.0, TransactionSide::Double), 0.0);
    }

    #[test]
    fn other_fees_shift_the_result() {
        let base = commission_fee(1_000_000.0, 0.0, 0.0, TransactionSide::Single);
        let bumped = commission_fee(1_000_000.0, 0.0, 30_000.0, TransactionSide::Single);
        let reduced = commission_fee(1_000_000.0, 0.0, -1_000.0, TransactionSide::Single);
        assert_eq!(bumped, base + 30_000.0);
        assert_eq!(reduced, base - 1_000.0);
    }

    #[test]
    fn recompute_mirrors_amount_through_actual() {
        let mut income = CommissionIncome::new("Rental brokerage fee");
        income.deposit = 10_000_000.0;
        income.monthly_rent = 500_000.0;
        income.recompute();
        assert_eq!(income.commission, Some(240_000.0));
        assert_eq!(income.amount, 240_000.0);

        income.actual_amount = Some(200_000.0);
        income.recompute();
        assert_eq!(income.commission, Some(240_000.0));
        assert_eq!(income.amount, 200_000.0);
        assert_eq!(income.display_total(), 200_000.0);
    }

    #[test]
    fn display_total_falls_back_to_legacy_amount() {
        let mut income = CommissionIncome::new("Sale brokerage fee");
        income.amount = 123_000.0;
        assert_eq!(income.display_total(), 123_000.0);

        income.commission = Some(240_000.0);
        assert_eq!(income.display_total(), 240_000.0);

        income.actual_amount = Some(250_000.0);
        assert_eq!(income.display_total(), 250_000.0);
    }

    #[test]
    fn side_parsing_accepts_both_spellings() {
        assert_eq!(TransactionSide::parse("double"), Some(TransactionSide::Double));
        assert_eq!(
            TransactionSide::parse("Single-Side"),
            Some(TransactionSide::Single)
        );
        assert_eq!(TransactionSide::parse("triple"), None);
    }
}
