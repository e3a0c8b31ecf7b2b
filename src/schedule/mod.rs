pub mod calendar;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::config::CalculatorConfig;
use crate::credit::{LoanTerms, PaymentRecord};
use crate::decimal::Money;
use crate::errors::Result;
use crate::types::InstallmentStatus;

pub use calendar::CollectionCalendar;

/// one installment of a credit, with what has been paid toward it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentView {
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub amount_due: Money,
    pub amount_paid: Money,
    pub status: InstallmentStatus,
}

impl InstallmentView {
    pub fn is_paid(&self) -> bool {
        self.status == InstallmentStatus::Paid
    }

    /// what is still owed on this installment
    pub fn amount_outstanding(&self) -> Money {
        (self.amount_due - self.amount_paid).max(Money::ZERO)
    }
}

/// collection calendar for the given terms
pub fn calendar_for(terms: &LoanTerms, config: &CalculatorConfig) -> CollectionCalendar {
    CollectionCalendar::new(terms.frequency, terms.start_date, config.sunday_collections)
}

/// build the installment schedule, ordered by installment number
///
/// Payments are validated before anything is summed; a negative amount or an
/// installment number of zero fails the whole call. Payments pointing past the
/// last installment are ignored.
pub fn build_schedule(
    terms: &LoanTerms,
    payments: &[PaymentRecord],
    config: &CalculatorConfig,
) -> Result<Vec<InstallmentView>> {
    let count = terms.total_installments;
    let mut paid = vec![Money::ZERO; count as usize];

    for payment in payments {
        payment.validate()?;
        if !payment.counts_toward_balance() {
            continue;
        }
        match paid.get_mut((payment.installment_number - 1) as usize) {
            Some(slot) => *slot += payment.amount,
            None => warn!(
                installment_number = payment.installment_number,
                total_installments = count,
                "payment references an installment beyond the schedule"
            ),
        }
    }

    let due_dates = calendar_for(terms, config).due_dates(count)?;
    let schedule: Vec<InstallmentView> = due_dates
        .into_iter()
        .zip(paid)
        .enumerate()
        .map(|(i, (due_date, amount_paid))| InstallmentView {
            installment_number: i as u32 + 1,
            due_date,
            amount_due: terms.installment_amount,
            amount_paid,
            status: classify(terms.installment_amount, amount_paid, config.payment_epsilon),
        })
        .collect();

    trace!(
        installments = schedule.len(),
        payments = payments.len(),
        frequency = %terms.frequency,
        "built installment schedule"
    );

    Ok(schedule)
}

fn classify(amount_due: Money, amount_paid: Money, epsilon: Money) -> InstallmentStatus {
    if !amount_paid.is_positive() {
        InstallmentStatus::Pending
    } else if amount_paid.covers(amount_due, epsilon) {
        InstallmentStatus::Paid
    } else {
        InstallmentStatus::Partial
    }
}

/// first installment not yet fully paid
pub fn next_due_installment(schedule: &[InstallmentView]) -> Option<&InstallmentView> {
    schedule.iter().find(|i| !i.is_paid())
}

/// due date of the last installment
pub fn maturity_date(terms: &LoanTerms, config: &CalculatorConfig) -> Result<Option<NaiveDate>> {
    if terms.total_installments == 0 {
        return Ok(None);
    }
    calendar_for(terms, config)
        .due_date(terms.total_installments)
        .map(Some)
}
