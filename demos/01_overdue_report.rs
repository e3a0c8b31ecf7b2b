/// overdue report - portfolio roll-up for a collector's route
use chrono::NaiveDate;
use microcredit_collections::{
    summarize_portfolio, CreditPosition, CreditStatus, Frequency, LoanTerms, Money, PaymentRecord,
};

fn credit(
    frequency: Frequency,
    start: NaiveDate,
    installments_paid: u32,
    status: CreditStatus,
) -> Result<CreditPosition, Box<dyn std::error::Error>> {
    let terms = LoanTerms::builder()
        .installment_amount(Money::from_major(40))
        .total_installments(30)
        .frequency(frequency)
        .start_date(start)
        .status(status)
        .build()?;
    let payments = (1..=installments_paid)
        .map(|n| PaymentRecord::completed(n, Money::from_major(40), start))
        .collect();
    Ok(CreditPosition { terms, payments })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== overdue report ===\n");

    let start = NaiveDate::from_ymd_opt(2025, 1, 6).ok_or("bad date")?;
    let as_of = NaiveDate::from_ymd_opt(2025, 3, 3).ok_or("bad date")?;

    let credits = vec![
        credit(Frequency::Daily, start, 30, CreditStatus::Active)?,
        credit(Frequency::Daily, start, 20, CreditStatus::Active)?,
        credit(Frequency::Weekly, start, 6, CreditStatus::Active)?,
        credit(Frequency::Biweekly, start, 0, CreditStatus::Active)?,
        credit(Frequency::Monthly, start, 0, CreditStatus::WaitingDelivery)?,
    ];

    let portfolio = summarize_portfolio(&credits, as_of)?;

    println!("as of {}", portfolio.as_of);
    println!("credits evaluated: {}", portfolio.credits_evaluated);
    println!("active: {}", portfolio.active_credits);
    println!("severity: {:?}", portfolio.by_severity);
    println!(
        "overdue: {} installments, {} total\n",
        portfolio.total_overdue_installments, portfolio.total_overdue_amount
    );

    println!("visit first:");
    for item in &portfolio.requiring_attention {
        println!(
            "  credit {} - {:?}, {} installments ({}) overdue for {} days",
            item.index, item.severity, item.overdue_installments, item.overdue_amount, item.days_overdue
        );
    }

    Ok(())
}
