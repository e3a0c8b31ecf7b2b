/// quick start - schedule and overdue position of a daily microloan
use chrono::NaiveDate;
use microcredit_collections::{
    compute_overdue_summary, compute_schedule, Frequency, LoanTerms, Money, PaymentRecord,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?;

    // 1,000 lent, 1,200 repaid in 24 daily installments of 50
    let terms = LoanTerms::builder()
        .principal(Money::from_major(1_000))
        .installment_amount(Money::from_major(50))
        .total_installments(24)
        .frequency(Frequency::Daily)
        .start_date(start)
        .build()?;

    let payments = vec![
        PaymentRecord::completed(1, Money::from_major(50), start),
        PaymentRecord::completed(2, Money::from_major(30), start.succ_opt().ok_or("bad date")?),
        PaymentRecord::completed(2, Money::from_major(20), start.succ_opt().ok_or("bad date")?),
        PaymentRecord::partial(3, Money::from_major(25), start),
    ];

    for installment in compute_schedule(&terms, &payments)?.iter().take(8) {
        println!(
            "#{:<2} {} due {:>6} paid {:>6} {:?}",
            installment.installment_number,
            installment.due_date,
            installment.amount_due,
            installment.amount_paid,
            installment.status
        );
    }

    let as_of = NaiveDate::from_ymd_opt(2025, 1, 8).ok_or("bad date")?;
    let summary = compute_overdue_summary(&terms, &payments, as_of)?;
    println!("\n{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
