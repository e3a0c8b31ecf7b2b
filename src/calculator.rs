use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::config::CalculatorConfig;
use crate::credit::{suggested_status, BalanceSnapshot, LoanTerms, PaymentRecord};
use crate::errors::Result;
use crate::overdue::{summarize, OverdueSummary};
use crate::schedule::{build_schedule, InstallmentView};
use crate::types::CreditStatus;

/// installment and overdue calculator
///
/// Stateless apart from its configuration. Every operation is a pure
/// function of the terms, the payment ledger and, for overdue metrics, the
/// as-of date.
#[derive(Debug, Clone, Default)]
pub struct InstallmentCalculator {
    config: CalculatorConfig,
}

impl InstallmentCalculator {
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// installment schedule 1..=total_installments
    pub fn compute_schedule(
        &self,
        terms: &LoanTerms,
        payments: &[PaymentRecord],
    ) -> Result<Vec<InstallmentView>> {
        build_schedule(terms, payments, &self.config)
    }

    /// overdue metrics as of `as_of`, built on top of the schedule
    pub fn compute_overdue_summary(
        &self,
        terms: &LoanTerms,
        payments: &[PaymentRecord],
        as_of: NaiveDate,
    ) -> Result<OverdueSummary> {
        let schedule = self.compute_schedule(terms, payments)?;
        Ok(summarize(terms, &schedule, as_of, &self.config.severity))
    }

    /// overdue metrics as of the time provider's current date
    pub fn compute_overdue_summary_now(
        &self,
        terms: &LoanTerms,
        payments: &[PaymentRecord],
        time: &SafeTimeProvider,
    ) -> Result<OverdueSummary> {
        self.compute_overdue_summary(terms, payments, time.now().date_naive())
    }

    /// schedule and summary from a single pass over the ledger
    pub fn compute_position(
        &self,
        terms: &LoanTerms,
        payments: &[PaymentRecord],
        as_of: NaiveDate,
    ) -> Result<(Vec<InstallmentView>, OverdueSummary)> {
        let schedule = self.compute_schedule(terms, payments)?;
        let summary = summarize(terms, &schedule, as_of, &self.config.severity);
        Ok((schedule, summary))
    }

    /// balance recomputed from the ledger
    pub fn recalculate_balance(
        &self,
        terms: &LoanTerms,
        payments: &[PaymentRecord],
    ) -> Result<BalanceSnapshot> {
        BalanceSnapshot::compute(terms, payments, self.config.payment_epsilon)
    }

    /// status the credit should be in given its ledger
    pub fn suggested_status(
        &self,
        terms: &LoanTerms,
        payments: &[PaymentRecord],
    ) -> Result<CreditStatus> {
        let balance = self.recalculate_balance(terms, payments)?;
        Ok(suggested_status(terms, &balance))
    }
}

/// schedule with the default configuration
pub fn compute_schedule(terms: &LoanTerms, payments: &[PaymentRecord]) -> Result<Vec<InstallmentView>> {
    InstallmentCalculator::default().compute_schedule(terms, payments)
}

/// overdue summary with the default configuration
pub fn compute_overdue_summary(
    terms: &LoanTerms,
    payments: &[PaymentRecord],
    as_of: NaiveDate,
) -> Result<OverdueSummary> {
    InstallmentCalculator::default().compute_overdue_summary(terms, payments, as_of)
}

/// overdue summary as of the time provider's current date
pub fn compute_overdue_summary_now(
    terms: &LoanTerms,
    payments: &[PaymentRecord],
    time: &SafeTimeProvider,
) -> Result<OverdueSummary> {
    InstallmentCalculator::default().compute_overdue_summary_now(terms, payments, time)
}

/// balance with the default configuration
pub fn recalculate_balance(terms: &LoanTerms, payments: &[PaymentRecord]) -> Result<BalanceSnapshot> {
    InstallmentCalculator::default().recalculate_balance(terms, payments)
}
