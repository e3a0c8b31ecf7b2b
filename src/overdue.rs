use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SeverityPolicy;
use crate::credit::LoanTerms;
use crate::decimal::Money;
use crate::schedule::InstallmentView;
use crate::types::OverdueSeverity;

/// overdue position of a credit as of a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueSummary {
    pub as_of: NaiveDate,
    /// installments due on or before `as_of`
    pub expected_installments: u32,
    pub completed_installments: u32,
    pub pending_installments: u32,
    pub overdue_installments: u32,
    pub overdue_amount: Money,
    /// age of the oldest unpaid installment that is already due
    pub days_overdue: u32,
    pub severity: OverdueSeverity,
    pub requires_attention: bool,
}

impl OverdueSummary {
    /// all metrics zero, used for malformed legacy terms
    pub fn zeroed(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            expected_installments: 0,
            completed_installments: 0,
            pending_installments: 0,
            overdue_installments: 0,
            overdue_amount: Money::ZERO,
            days_overdue: 0,
            severity: OverdueSeverity::None,
            requires_attention: false,
        }
    }

    pub fn is_overdue(&self) -> bool {
        self.overdue_installments > 0
    }
}

/// derive the overdue summary from an already built schedule
///
/// `schedule` must come from `build_schedule` for the same `terms`.
/// Non-active credits report their counts but never anything overdue.
pub fn summarize(
    terms: &LoanTerms,
    schedule: &[InstallmentView],
    as_of: NaiveDate,
    policy: &SeverityPolicy,
) -> OverdueSummary {
    if !terms.is_well_formed() {
        debug!(
            total_installments = terms.total_installments,
            installment_amount = %terms.installment_amount,
            "malformed credit terms, reporting zeroed overdue summary"
        );
        return OverdueSummary::zeroed(as_of);
    }

    let expected_installments = schedule.iter().filter(|i| i.due_date <= as_of).count() as u32;
    let completed_installments = schedule.iter().filter(|i| i.is_paid()).count() as u32;
    let pending_installments = terms.total_installments.saturating_sub(completed_installments);

    let overdue_installments = if terms.status.is_overdue_evaluated() {
        expected_installments.saturating_sub(completed_installments)
    } else {
        debug!(status = %terms.status, "overdue not evaluated for credit status");
        0
    };

    let days_overdue = if overdue_installments == 0 {
        0
    } else {
        schedule
            .iter()
            .find(|i| !i.is_paid() && i.due_date <= as_of)
            .map(|i| (as_of - i.due_date).num_days().max(0) as u32)
            .unwrap_or(0)
    };

    let severity = policy.classify(overdue_installments, days_overdue);

    OverdueSummary {
        as_of,
        expected_installments,
        completed_installments,
        pending_installments,
        overdue_installments,
        overdue_amount: terms.installment_amount * overdue_installments,
        days_overdue,
        severity,
        requires_attention: severity.requires_attention(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalculatorConfig;
    use crate::credit::PaymentRecord;
    use crate::schedule::build_schedule;
    use crate::types::{CreditStatus, Frequency, SeverityBasis};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly_terms(count: u32) -> LoanTerms {
        LoanTerms {
            principal: Money::from_major(1_000),
            total_amount: Money::from_major(50) * count,
            installment_amount: Money::from_major(50),
            total_installments: count,
            frequency: Frequency::Weekly,
            start_date: date(2025, 1, 6),
            status: CreditStatus::Active,
        }
    }

    fn summary_for(terms: &LoanTerms, payments: &[PaymentRecord], as_of: NaiveDate) -> OverdueSummary {
        let config = CalculatorConfig::default();
        let schedule = build_schedule(terms, payments, &config).unwrap();
        summarize(terms, &schedule, as_of, &config.severity)
    }

    #[test]
    fn test_days_overdue_tracks_oldest_unpaid() {
        let terms = weekly_terms(20);
        let payments = vec![PaymentRecord::completed(1, Money::from_major(50), date(2025, 1, 6))];

        // due: 01-06 (paid), 01-13, 01-20, 01-27
        let summary = summary_for(&terms, &payments, date(2025, 1, 29));
        assert_eq!(summary.expected_installments, 4);
        assert_eq!(summary.completed_installments, 1);
        assert_eq!(summary.pending_installments, 19);
        assert_eq!(summary.overdue_installments, 3);
        assert_eq!(summary.overdue_amount, Money::from_major(150));
        assert_eq!(summary.days_overdue, 16);
        assert_eq!(summary.severity, OverdueSeverity::Light);
        assert!(summary.requires_attention);
    }

    #[test]
    fn test_severity_escalates() {
        let terms = weekly_terms(30);

        let summary = summary_for(&terms, &[], date(2025, 2, 3));
        assert_eq!(summary.overdue_installments, 5);
        assert_eq!(summary.severity, OverdueSeverity::Moderate);

        let summary = summary_for(&terms, &[], date(2025, 3, 24));
        assert_eq!(summary.overdue_installments, 12);
        assert_eq!(summary.severity, OverdueSeverity::Critical);
    }

    #[test]
    fn test_days_based_policy() {
        let terms = weekly_terms(30);
        let config = CalculatorConfig::days_based();
        let schedule = build_schedule(&terms, &[], &config).unwrap();

        let summary = summarize(&terms, &schedule, date(2025, 1, 6), &config.severity);
        assert_eq!(config.severity.basis, SeverityBasis::DaysOverdue);
        assert_eq!(summary.overdue_installments, 1);
        assert_eq!(summary.days_overdue, 0);
        assert_eq!(summary.severity, OverdueSeverity::Light);

        let summary = summarize(&terms, &schedule, date(2025, 1, 20), &config.severity);
        assert_eq!(summary.days_overdue, 14);
        assert_eq!(summary.severity, OverdueSeverity::Moderate);
    }

    #[test]
    fn test_before_start_nothing_expected() {
        let summary = summary_for(&weekly_terms(10), &[], date(2025, 1, 1));
        assert_eq!(summary.expected_installments, 0);
        assert_eq!(summary.overdue_installments, 0);
        assert_eq!(summary.severity, OverdueSeverity::None);
    }

    #[test]
    fn test_paid_ahead_does_not_offset_older_arrears() {
        let terms = weekly_terms(10);
        let day = date(2025, 1, 6);
        let payments = vec![
            PaymentRecord::completed(5, Money::from_major(50), day),
            PaymentRecord::completed(6, Money::from_major(50), day),
        ];

        // two installments expected, two completed (ahead of schedule)
        let summary = summary_for(&terms, &payments, date(2025, 1, 13));
        assert_eq!(summary.expected_installments, 2);
        assert_eq!(summary.completed_installments, 2);
        assert_eq!(summary.overdue_installments, 0);
        assert_eq!(summary.days_overdue, 0);
    }

    #[test]
    fn test_non_active_credit_not_overdue() {
        for status in [
            CreditStatus::PendingApproval,
            CreditStatus::WaitingDelivery,
            CreditStatus::Defaulted,
            CreditStatus::Cancelled,
        ] {
            let mut terms = weekly_terms(10);
            terms.status = status;
            let summary = summary_for(&terms, &[], date(2025, 6, 1));
            assert_eq!(summary.expected_installments, 10);
            assert_eq!(summary.overdue_installments, 0);
            assert_eq!(summary.overdue_amount, Money::ZERO);
            assert_eq!(summary.severity, OverdueSeverity::None);
            assert!(!summary.requires_attention);
        }
    }

    #[test]
    fn test_malformed_terms_zeroed() {
        let mut terms = weekly_terms(10);
        terms.installment_amount = Money::ZERO;
        let summary = summary_for(&terms, &[], date(2025, 6, 1));
        assert_eq!(summary, OverdueSummary::zeroed(date(2025, 6, 1)));

        let terms = weekly_terms(0);
        let summary = summary_for(&terms, &[], date(2025, 6, 1));
        assert_eq!(summary, OverdueSummary::zeroed(date(2025, 6, 1)));
    }
}
