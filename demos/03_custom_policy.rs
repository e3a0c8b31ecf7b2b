/// custom policy - severity driven by days overdue, loaded from json
use chrono::NaiveDate;
use microcredit_collections::{
    CalculatorConfig, Frequency, InstallmentCalculator, LoanTerms, Money,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CalculatorConfig::from_json(
        r#"{
            "payment_epsilon": "0.05",
            "sunday_collections": false,
            "severity": { "basis": "days_overdue", "light_max": 3, "moderate_max": 15 }
        }"#,
    )?;
    let calculator = InstallmentCalculator::new(config)?;

    let terms = LoanTerms::builder()
        .total_amount(Money::from_major(1_000))
        .total_installments(26)
        .frequency(Frequency::Daily)
        .start_date(NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?)
        .build()?;

    for day in [1, 3, 6, 10, 20, 31] {
        let as_of = NaiveDate::from_ymd_opt(2025, 1, day).ok_or("bad date")?;
        let summary = calculator.compute_overdue_summary(&terms, &[], as_of)?;
        println!(
            "{}: {:>2} overdue, {:>2} days, {:?}",
            as_of, summary.overdue_installments, summary.days_overdue, summary.severity
        );
    }

    Ok(())
}
