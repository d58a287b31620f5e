use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use office_ledger::{
    core::services::{SummaryService, TemplateService},
    core::RecordManager,
    domain::{
        commission_fee, CommissionIncome, FixedExpenseTemplate, MonthKey, MonthlyRecord,
        TransactionSide,
    },
    storage::JsonStore,
};
use tempfile::tempdir;

fn build_sample_record(deal_count: usize) -> MonthlyRecord {
    let mut record = MonthlyRecord::seeded(MonthKey::new(2024, 7));
    record.income = 2_000_000.0;

    for idx in 0..deal_count {
        let mut deal = CommissionIncome::new(format!("Client {idx}"));
        deal.deposit = 5_000_000.0 + (idx % 20) as f64 * 1_000_000.0;
        deal.monthly_rent = 300_000.0 + (idx % 10) as f64 * 50_000.0;
        if idx % 2 == 0 {
            deal.side = TransactionSide::Double;
        }
        if idx % 3 == 0 {
            deal.actual_amount = Some(200_000.0);
        }
        deal.recompute();
        record.add_commission_income(deal);
    }

    record
}

fn bench_record_io(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(Some(dir.path().to_path_buf()), Some(2)).expect("store");
    let mut manager = RecordManager::new(Box::new(store));
    let month = MonthKey::new(2024, 7);
    manager.open(month).expect("open");
    manager.with_record_mut(|record| *record = build_sample_record(black_box(5_000)));

    c.bench_function("record_save_5k_deals", |b| {
        b.iter(|| {
            manager.save().expect("save record");
        })
    });

    c.bench_function("record_load_5k_deals", |b| {
        b.iter(|| {
            let outcome = manager.open(month).expect("load record");
            black_box(outcome);
        })
    });
}

fn bench_summaries(c: &mut Criterion) {
    let record = build_sample_record(black_box(5_000));

    c.bench_function("commission_fee", |b| {
        b.iter(|| {
            let fee = commission_fee(
                black_box(10_000_000.0),
                black_box(500_000.0),
                black_box(0.0),
                TransactionSide::Double,
            );
            black_box(fee);
        })
    });

    c.bench_function("month_totals_5k_deals", |b| {
        b.iter(|| {
            let totals = SummaryService::totals(black_box(&record));
            black_box(totals);
        })
    });

    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(Some(dir.path().to_path_buf()), Some(2)).expect("store");
    let mut manager = RecordManager::new(Box::new(store));
    for year in 2015..2025 {
        for month in 1..=12 {
            manager.open(MonthKey::new(year, month)).expect("open");
            manager.with_record_mut(|record| record.income = f64::from(month) * 100_000.0);
            manager.save().expect("save");
        }
    }

    c.bench_function("year_overview_120_months", |b| {
        b.iter(|| {
            let months = SummaryService::list_saved_months(manager.storage()).expect("list");
            let groups = SummaryService::group_by_year(&months);
            let mut profit = 0.0;
            for (_, keys) in &groups {
                for key in keys {
                    if let Some(totals) =
                        SummaryService::summarize(manager.storage(), *key).expect("summarize")
                    {
                        profit += totals.profit;
                    }
                }
            }
            black_box(profit);
        })
    });
}

fn bench_template_apply(c: &mut Criterion) {
    let templates: Vec<FixedExpenseTemplate> = (0..50)
        .map(|idx| FixedExpenseTemplate::new(format!("Template {idx}"), 10_000.0, "01"))
        .collect();
    let record = build_sample_record(100);

    c.bench_function("apply_50_templates", |b| {
        b.iter_batched(
            || record.clone(),
            |mut record| {
                let applied = TemplateService::apply_to_month(&mut record, &templates);
                black_box(applied);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_record_io, bench_summaries, bench_template_apply);
criterion_main!(benches);
