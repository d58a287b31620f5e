use chrono::NaiveDate;
use office_ledger::currency::{
    format_currency_value, format_date, format_signed, locale_preset, CurrencyCode,
    CurrencyDisplay, DateFormatStyle, FormatOptions, LocaleConfig, NegativeStyle,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn formats_currency_with_locale() {
    let mut locale = LocaleConfig::default();
    locale.decimal_separator = ',';
    locale.grouping_separator = ' ';
    let options = FormatOptions {
        currency_display: CurrencyDisplay::Symbol,
        negative_style: NegativeStyle::Parentheses,
    };
    let code = CurrencyCode::new("EUR");
    let formatted = format_currency_value(-1234.5, &code, &locale, &options);
    assert_eq!(formatted, "€(1 234,50)");
}

#[test]
fn won_amounts_trail_the_symbol() {
    let locale = LocaleConfig::default();
    let options = FormatOptions::default();
    let krw = CurrencyCode::new("KRW");

    assert_eq!(
        format_currency_value(1_234_567.0, &krw, &locale, &options),
        "1,234,567원"
    );
    assert_eq!(
        format_currency_value(-35_000.0, &krw, &locale, &options),
        "-35,000원"
    );
    assert_eq!(format_currency_value(0.0, &krw, &locale, &options), "0원");
}

#[test]
fn minor_units_follow_the_currency() {
    let locale = LocaleConfig::default();
    let options = FormatOptions::default();

    assert_eq!(
        format_currency_value(1_234.5, &CurrencyCode::new("USD"), &locale, &options),
        "$1,234.50"
    );
    assert_eq!(
        format_currency_value(1_234.0, &CurrencyCode::new("JPY"), &locale, &options),
        "¥1,234"
    );
    assert_eq!(
        format_currency_value(12.5, &CurrencyCode::new("KWD"), &locale, &options),
        "KWD12.500"
    );
}

#[test]
fn currency_display_variants() {
    let locale = LocaleConfig::default();
    let usd = CurrencyCode::new("USD");

    let code_only = FormatOptions {
        currency_display: CurrencyDisplay::Code,
        negative_style: NegativeStyle::Sign,
    };
    assert_eq!(
        format_currency_value(1_234.5, &usd, &locale, &code_only),
        "USD 1,234.50"
    );

    let both = FormatOptions {
        currency_display: CurrencyDisplay::SymbolAndCode,
        negative_style: NegativeStyle::Sign,
    };
    assert_eq!(
        format_currency_value(1_234.5, &usd, &locale, &both),
        "$1,234.50 (USD)"
    );
}

#[test]
fn signed_profit_labels_gains_and_losses() {
    let locale = LocaleConfig::default();
    let krw = CurrencyCode::new("KRW");

    assert_eq!(format_signed(240_000.0, &krw, &locale), "+240,000원");
    assert_eq!(format_signed(-35_000.0, &krw, &locale), "-35,000원");
    assert_eq!(format_signed(0.0, &krw, &locale), "+0원");
}

#[test]
fn date_styles_cover_the_presets() {
    let korean = locale_preset("ko-KR").expect("ko-KR preset");
    assert_eq!(format_date(&korean, date(2024, 7, 5)), "2024-07-05");

    let english = locale_preset("en-US").expect("en-US preset");
    assert_eq!(format_date(&english, date(2024, 7, 5)), "05 Jul 2024");

    let mut long_form = LocaleConfig::default();
    long_form.date_format = DateFormatStyle::Long;
    assert_eq!(format_date(&long_form, date(2024, 7, 5)), "Fri Jul, 2024");
}

#[test]
fn locale_presets_cover_known_tags() {
    let german = locale_preset("de-DE").expect("de-DE preset");
    assert_eq!(german.decimal_separator, ',');
    assert_eq!(german.grouping_separator, '.');

    let krw = CurrencyCode::new("KRW");
    assert_eq!(
        format_currency_value(1_234_567.0, &krw, &german, &FormatOptions::default()),
        "1.234.567원"
    );

    assert!(locale_preset("xx-XX").is_none());
}
