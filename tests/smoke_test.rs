use office_ledger::{
    core::services::{IncomeService, SummaryService},
    core::RecordManager,
    domain::{CommissionIncome, MonthKey},
    init,
    storage::{JsonStore, KeyValueStore},
};
use tempfile::tempdir;

#[test]
fn monthly_ledger_smoke() {
    init();

    let temp = tempdir().unwrap();
    let store = JsonStore::new(Some(temp.path().to_path_buf()), Some(3)).unwrap();
    let mut manager = RecordManager::new(Box::new(store.clone()));

    let month = MonthKey::new(2025, 1);
    let outcome = manager.open(month).unwrap();
    assert!(!outcome.existed);
    assert_eq!(manager.current().commission_incomes.len(), 2);
    assert_eq!(manager.current().fixed_expenses.len(), 6);

    let mut deal = CommissionIncome::new("Kim Minsu");
    deal.deposit = 10_000_000.0;
    deal.monthly_rent = 500_000.0;
    manager
        .try_with_record_mut(|record| {
            IncomeService::add(record, deal)?;
            IncomeService::set_base_income(record, 1_000_000.0)
        })
        .unwrap();

    let totals = SummaryService::totals(manager.current());
    assert_eq!(totals.commission_income, 240_000.0);
    assert_eq!(totals.total_income, 1_240_000.0);
    assert_eq!(totals.profit, 1_240_000.0);

    let key = manager.save().unwrap();
    assert_eq!(key.label(), "2025-01");
    assert!(!manager.is_dirty());

    let mut reopened = RecordManager::new(Box::new(store.clone()));
    let outcome = reopened.open(month).unwrap();
    assert!(outcome.existed);
    assert_eq!(reopened.current().commission_incomes.len(), 3);
    assert_eq!(reopened.current().income, 1_000_000.0);

    reopened.delete(month).unwrap();
    assert!(store.get(&month.storage_key()).unwrap().is_none());
}
