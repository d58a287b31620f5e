mod common;

use common::setup_test_env;
use office_ledger::{
    config::Config,
    core::services::{
        CommissionField, ExpenseField, ExpenseService, IncomeService, SummaryService, TaxService,
        TemplateService,
    },
    domain::{CommissionIncome, MonthKey},
};

#[test]
fn commission_flow_survives_a_reload() {
    let (mut manager, _config) = setup_test_env();
    manager.open(MonthKey::new(2024, 7)).expect("open");

    let mut income = CommissionIncome::new("Kim Minsu jeonse deal");
    income.deposit = 10_000_000.0;
    income.monthly_rent = 500_000.0;
    let id = manager
        .try_with_record_mut(|record| IncomeService::add(record, income))
        .expect("add income");
    manager
        .try_with_record_mut(|record| {
            IncomeService::update(record, id, CommissionField::Received(true))
        })
        .expect("mark received");
    manager
        .try_with_record_mut(|record| IncomeService::set_base_income(record, 1_500_000.0))
        .expect("base income");
    manager.save().expect("save");

    manager.open(MonthKey::new(2025, 1)).expect("open other month");
    manager.open(MonthKey::new(2024, 7)).expect("reopen");

    let record = manager.current();
    assert_eq!(record.income, 1_500_000.0);
    // Two seeded placeholders plus the deal added above.
    assert_eq!(record.commission_incomes.len(), 3);
    let stored = record
        .commission_incomes
        .iter()
        .find(|income| income.id == id)
        .expect("stored income");
    assert!(stored.received);
    assert_eq!(stored.commission, Some(240_000.0));
}

#[test]
fn templates_apply_into_the_open_month() {
    let (mut manager, _config) = setup_test_env();
    manager.open(MonthKey::new(2024, 7)).expect("open");
    let seeded = manager.current().fixed_expenses.len();

    TemplateService::add(manager.storage(), "Office rent", 500_000.0, "25").expect("template");
    TemplateService::add(manager.storage(), "Internet", 33_000.0, "5").expect("template");

    let templates = TemplateService::load(manager.storage()).expect("load templates");
    let applied =
        manager.with_record_mut(|record| TemplateService::apply_to_month(record, &templates));
    assert_eq!(applied, 2);
    assert_eq!(manager.current().fixed_expenses.len(), seeded + 2);
    assert!(manager.is_dirty());

    // Applying again appends fresh copies rather than replacing.
    let applied =
        manager.with_record_mut(|record| TemplateService::apply_to_month(record, &templates));
    assert_eq!(applied, 2);
    assert_eq!(manager.current().fixed_expenses.len(), seeded + 4);
}

#[test]
fn saved_months_report_profit_per_year() {
    let (mut manager, _config) = setup_test_env();
    for (month, rent_paid) in [
        (MonthKey::new(2023, 12), 400_000.0),
        (MonthKey::new(2024, 1), 500_000.0),
        (MonthKey::new(2024, 2), 500_000.0),
    ] {
        manager.open(month).expect("open");
        manager
            .try_with_record_mut(|record| {
                IncomeService::set_base_income(record, 2_000_000.0)?;
                let rent_id = record.fixed_expenses[0].id;
                ExpenseService::update_fixed(record, rent_id, ExpenseField::Amount(rent_paid))
            })
            .expect("edit");
        manager.save().expect("save");
    }

    let months = SummaryService::list_saved_months(manager.storage()).expect("list");
    assert_eq!(
        months,
        vec![
            MonthKey::new(2024, 2),
            MonthKey::new(2024, 1),
            MonthKey::new(2023, 12),
        ]
    );

    let groups = SummaryService::group_by_year(&months);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, 2024);
    assert_eq!(groups[0].1.len(), 2);

    let totals = SummaryService::summarize(manager.storage(), MonthKey::new(2023, 12))
        .expect("summarize")
        .expect("stored");
    assert_eq!(totals.total_income, 2_000_000.0);
    assert_eq!(totals.total_expenses, 400_000.0);
    assert_eq!(totals.profit, 1_600_000.0);
}

#[test]
fn tax_entries_count_into_expenses() {
    let (mut manager, _config) = setup_test_env();
    manager.open(MonthKey::new(2024, 7)).expect("open");
    manager
        .try_with_record_mut(|record| {
            TaxService::add(record, "VAT prepayment", 1_200_000.0, 2024, Some(2)).map(|_| ())
        })
        .expect("add tax");
    manager.save().expect("save");

    let totals = SummaryService::summarize(manager.storage(), MonthKey::new(2024, 7))
        .expect("summarize")
        .expect("stored");
    assert_eq!(totals.taxes, 1_200_000.0);
    assert_eq!(totals.profit, -1_200_000.0);
}

#[test]
fn config_lives_beside_the_records() {
    let (_manager, config_manager) = setup_test_env();
    let mut config = config_manager.load().expect("defaults");
    assert_eq!(config.currency, "KRW");

    config.currency = "USD".into();
    config.last_opened_month = Some("2024-07".into());
    config_manager.save(&config).expect("save");

    let reloaded: Config = config_manager.load().expect("reload");
    assert_eq!(reloaded.currency, "USD");
    assert_eq!(reloaded.last_opened_month.as_deref(), Some("2024-07"));
}
