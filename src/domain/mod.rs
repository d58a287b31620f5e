//! Office-ledger domain models, persistence-friendly types, and helpers.

pub mod commission;
pub mod expense;
pub mod month;
pub mod operational;
pub mod tax;
pub mod template;

pub use commission::{commission_fee, CommissionIncome, TransactionSide};
pub use expense::{normalize_payment_date, FixedExpense, VariableExpense};
pub use month::{MonthKey, MonthlyRecord, CURRENT_SCHEMA_VERSION, RECORD_KEY_PREFIX};
pub use operational::{OperationalCategory, OperationalExpense};
pub use tax::Tax;
pub use template::{FixedExpenseTemplate, TEMPLATES_KEY};
