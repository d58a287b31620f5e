pub mod expense_service;
pub mod income_service;
pub mod operational_service;
pub mod summary_service;
pub mod tax_service;
pub mod template_service;

pub use expense_service::{ExpenseField, ExpenseService};
pub use income_service::{CommissionField, IncomeService};
pub use operational_service::{OperationalField, OperationalService};
pub use summary_service::{RecordTotals, SummaryService};
pub use tax_service::{TaxField, TaxService};
pub use template_service::{TemplateField, TemplateService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
