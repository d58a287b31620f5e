use tracing::warn;
use uuid::Uuid;

use crate::domain::{normalize_payment_date, FixedExpenseTemplate, MonthlyRecord, TEMPLATES_KEY};
use crate::storage::KeyValueStore;

use super::{ServiceError, ServiceResult};

/// Typed per-field update for a fixed-expense template.
#[derive(Debug, Clone)]
pub enum TemplateField {
    Name(String),
    Amount(f64),
    PaymentDate(String),
    Active(bool),
}

/// Template CRUD persists straight to the store; templates are
/// month-independent and have no dirty state of their own.
pub struct TemplateService;

impl TemplateService {
    /// Stored template list; absent or unreadable data yields an empty
    /// list (the latter with a warning).
    pub fn load(store: &dyn KeyValueStore) -> ServiceResult<Vec<FixedExpenseTemplate>> {
        match store.get(TEMPLATES_KEY)? {
            None => Ok(Vec::new()),
            Some(data) => match serde_json::from_str(&data) {
                Ok(templates) => Ok(templates),
                Err(err) => {
                    warn!(error = %err, "stored templates unreadable; starting from an empty list");
                    Ok(Vec::new())
                }
            },
        }
    }

    pub fn save(
        store: &dyn KeyValueStore,
        templates: &[FixedExpenseTemplate],
    ) -> ServiceResult<()> {
        let json = serde_json::to_string_pretty(templates)
            .map_err(crate::errors::LedgerError::from)?;
        store.set(TEMPLATES_KEY, &json)?;
        Ok(())
    }

    pub fn add(
        store: &dyn KeyValueStore,
        name: &str,
        amount: f64,
        payment_date: &str,
    ) -> ServiceResult<Uuid> {
        if name.trim().is_empty() {
            return Err(ServiceError::Invalid("Name cannot be empty".into()));
        }
        if !amount.is_finite() {
            return Err(ServiceError::Invalid("Amount must be a number".into()));
        }
        let date = normalize_payment_date(payment_date)
            .ok_or_else(|| ServiceError::Invalid("Payment date must be a day 1-31".into()))?;
        let mut templates = Self::load(store)?;
        let template = FixedExpenseTemplate::new(name.trim(), amount, date);
        let id = template.id;
        templates.push(template);
        Self::save(store, &templates)?;
        Ok(id)
    }

    pub fn update(store: &dyn KeyValueStore, id: Uuid, field: TemplateField) -> ServiceResult<()> {
        let mut templates = Self::load(store)?;
        let template = templates
            .iter_mut()
            .find(|template| template.id == id)
            .ok_or_else(|| ServiceError::Invalid("Template not found".into()))?;
        match field {
            TemplateField::Name(name) => {
                if name.trim().is_empty() {
                    return Err(ServiceError::Invalid("Name cannot be empty".into()));
                }
                template.name = name.trim().to_string();
            }
            TemplateField::Amount(amount) => {
                if !amount.is_finite() {
                    return Err(ServiceError::Invalid("Amount must be a number".into()));
                }
                template.amount = amount;
            }
            TemplateField::PaymentDate(date) => {
                template.payment_date = normalize_payment_date(&date).ok_or_else(|| {
                    ServiceError::Invalid("Payment date must be a day 1-31".into())
                })?;
            }
            TemplateField::Active(active) => template.active = active,
        }
        Self::save(store, &templates)?;
        Ok(())
    }

    pub fn remove(store: &dyn KeyValueStore, id: Uuid) -> ServiceResult<()> {
        let mut templates = Self::load(store)?;
        let before = templates.len();
        templates.retain(|template| template.id != id);
        if templates.len() == before {
            return Err(ServiceError::Invalid("Template not found".into()));
        }
        Self::save(store, &templates)?;
        Ok(())
    }

    /// Appends one fresh unpaid expense per active template. Applying
    /// the same templates again appends again; duplicates are expected.
    pub fn apply_to_month(record: &mut MonthlyRecord, templates: &[FixedExpenseTemplate]) -> usize {
        let mut applied = 0;
        for template in templates.iter().filter(|template| template.active) {
            record.add_fixed_expense(template.to_expense());
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MonthKey;
    use crate::storage::MemoryStore;

    #[test]
    fn templates_persist_immediately() {
        let store = MemoryStore::new();
        let id = TemplateService::add(&store, "Office rent", 500_000.0, "25").expect("add");
        TemplateService::add(&store, "Internet", 33_000.0, "5").expect("add second");

        let templates = TemplateService::load(&store).expect("load");
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[1].payment_date, "05");

        TemplateService::update(&store, id, TemplateField::Active(false)).expect("deactivate");
        let templates = TemplateService::load(&store).expect("reload");
        assert!(!templates[0].active);

        TemplateService::remove(&store, id).expect("remove");
        assert_eq!(TemplateService::load(&store).expect("final").len(), 1);
    }

    #[test]
    fn apply_adds_one_expense_per_active_template() {
        let store = MemoryStore::new();
        TemplateService::add(&store, "Office rent", 500_000.0, "25").expect("add");
        TemplateService::add(&store, "Internet", 33_000.0, "5").expect("add");
        let inactive = TemplateService::add(&store, "Old dues", 10_000.0, "1").expect("add");
        TemplateService::update(&store, inactive, TemplateField::Active(false))
            .expect("deactivate");

        let templates = TemplateService::load(&store).expect("load");
        let mut record = MonthlyRecord::seeded(MonthKey::new(2024, 7));
        let existing = record.fixed_expenses.len();

        let applied = TemplateService::apply_to_month(&mut record, &templates);
        assert_eq!(applied, 2);
        assert_eq!(record.fixed_expenses.len(), existing + 2);
        assert!(record.fixed_expenses[existing..].iter().all(|e| !e.paid));

        // A second application duplicates; nothing de-duplicates by template.
        let applied = TemplateService::apply_to_month(&mut record, &templates);
        assert_eq!(applied, 2);
        assert_eq!(record.fixed_expenses.len(), existing + 4);

        let first = &record.fixed_expenses[existing];
        let second = &record.fixed_expenses[existing + 2];
        assert_eq!(first.name, second.name);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn unreadable_template_list_falls_back_to_empty() {
        let store = MemoryStore::new();
        store.set(TEMPLATES_KEY, "{broken").expect("seed garbage");
        let templates = TemplateService::load(&store).expect("load");
        assert!(templates.is_empty());
    }

    #[test]
    fn unknown_template_ids_are_invalid() {
        let store = MemoryStore::new();
        assert!(TemplateService::remove(&store, Uuid::new_v4()).is_err());
        assert!(
            TemplateService::update(&store, Uuid::new_v4(), TemplateField::Active(true)).is_err()
        );
    }
}
