use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tax obligation, optionally tied to a quarter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tax {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    pub year: i32,
    #[serde(default)]
    pub quarter: Option<u8>,
    #[serde(default)]
    pub paid: bool,
}

impl Tax {
    pub fn new(name: impl Into<String>, amount: f64, year: i32, quarter: Option<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            year,
            quarter,
            paid: false,
        }
    }
}
