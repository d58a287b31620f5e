use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Buckets for one-off office expenditures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum OperationalCategory {
    Equipment,
    Advertising,
    Maintenance,
    #[default]
    Other,
}

impl OperationalCategory {
    pub fn label(self) -> &'static str {
        match self {
            OperationalCategory::Equipment => "equipment",
            OperationalCategory::Advertising => "advertising",
            OperationalCategory::Maintenance => "maintenance",
            OperationalCategory::Other => "other",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "equipment" => Some(OperationalCategory::Equipment),
            "advertising" => Some(OperationalCategory::Advertising),
            "maintenance" => Some(OperationalCategory::Maintenance),
            "other" => Some(OperationalCategory::Other),
            _ => None,
        }
    }

    pub fn all() -> [OperationalCategory; 4] {
        [
            OperationalCategory::Equipment,
            OperationalCategory::Advertising,
            OperationalCategory::Maintenance,
            OperationalCategory::Other,
        ]
    }
}

/// Ad-hoc expenditure recorded on the day it happened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationalExpense {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub category: OperationalCategory,
}

impl OperationalExpense {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: OperationalCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            description: description.into(),
            amount,
            category,
        }
    }
}
