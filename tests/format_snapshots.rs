use insta::assert_snapshot;
use office_ledger::cli::output::{set_preferences, OutputPreferences};
use office_ledger::cli::ui::formatting::Formatter;
use office_ledger::cli::ui::{Alignment, Table, TableColumn};
use office_ledger::cli::ui::table_renderer::{horizontal_rule, render_cell};
use office_ledger::currency::{format_signed, CurrencyCode, LocaleConfig};

/// Every test here reads the rendered text, so colors and unicode
/// decoration are switched off for the whole binary.
fn plain() {
    set_preferences(OutputPreferences {
        plain_mode: true,
        quiet_mode: false,
    });
}

fn column(header: &str, alignment: Alignment) -> TableColumn {
    TableColumn {
        header: header.to_string(),
        min_width: 0,
        max_width: None,
        alignment,
    }
}

#[test]
fn plain_header_reads_as_a_section() {
    plain();
    let formatter = Formatter::new();
    assert_snapshot!(formatter.header_text("Summary for 2024-07"), @"=== Summary for 2024-07 ===");
}

#[test]
fn profit_lines_keep_explicit_signs() {
    let krw = CurrencyCode::new("KRW");
    let locale = LocaleConfig::default();
    assert_snapshot!(format_signed(240_000.0, &krw, &locale), @"+240,000원");
    assert_snapshot!(format_signed(-35_000.0, &krw, &locale), @"-35,000원");
}

#[test]
fn month_profit_table_lines_up_amounts() {
    plain();
    let table = Table {
        columns: vec![
            column("Month", Alignment::Left),
            column("Profit", Alignment::Right),
        ],
        rows: vec![
            vec!["2024-07".to_string(), "+240,000원".to_string()],
            vec!["2024-06".to_string(), "-35,000원".to_string()],
        ],
        show_headers: true,
        padding: 1,
    };

    let rendered = table.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], " Month        Profit");
    assert_eq!(lines[1], "-".repeat(21));
    assert_eq!(lines[2], " 2024-07   +240,000원");
    assert_eq!(lines[3], " 2024-06    -35,000원");
}

#[test]
fn rule_spans_the_full_table_width() {
    plain();
    assert_eq!(horizontal_rule(&[7, 9], 1), "-".repeat(21));
}

#[test]
fn cells_truncate_with_an_ellipsis() {
    assert_eq!(
        render_cell("A very long client name", 10, &Alignment::Left, 1),
        " A very lo… "
    );
    assert_eq!(
        render_cell("240,000원", 10, &Alignment::Right, 1),
        "   240,000원 "
    );
}
