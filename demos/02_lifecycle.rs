/// lifecycle - credit status transitions driven by the ledger
use chrono::{Duration, TimeZone, Utc};
use microcredit_collections::{
    CreditStatus, Frequency, InstallmentCalculator, LoanTerms, Money, PaymentRecord,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== credit lifecycle ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();
    let calculator = InstallmentCalculator::default();

    let mut terms = LoanTerms::builder()
        .principal(Money::from_major(500))
        .total_amount(Money::from_major(600))
        .total_installments(4)
        .frequency(Frequency::Weekly)
        .start_date(time.now().date_naive())
        .status(CreditStatus::PendingApproval)
        .build()?;

    // approval and delivery
    terms.status = terms.status.transition(CreditStatus::WaitingDelivery)?;
    println!("1. approved: {}", terms.status);
    terms.status = terms.status.transition(CreditStatus::Active)?;
    println!("2. delivered: {}", terms.status);

    let mut payments = Vec::new();
    for week in 1..=4 {
        let today = time.now().date_naive();
        payments.push(PaymentRecord::completed(week, terms.installment_amount, today));

        let summary = calculator.compute_overdue_summary_now(&terms, &payments, &time)?;
        let balance = calculator.recalculate_balance(&terms, &payments)?;
        println!(
            "   week {}: paid {} of {}, remaining {}, overdue {}",
            week,
            balance.total_paid,
            terms.total_amount,
            balance.remaining_balance,
            summary.overdue_installments
        );

        controller.advance(Duration::days(7));
    }

    let next = calculator.suggested_status(&terms, &payments)?;
    terms.status = terms.status.transition(next)?;
    println!("3. after final payment: {}", terms.status);

    // a rejected request never becomes active
    let rejected = CreditStatus::PendingApproval.transition(CreditStatus::Rejected)?;
    if let Err(e) = rejected.transition(CreditStatus::Active) {
        println!("4. {}", e);
    }

    Ok(())
}
