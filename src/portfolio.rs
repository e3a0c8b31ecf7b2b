use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::InstallmentCalculator;
use crate::credit::{LoanTerms, PaymentRecord};
use crate::decimal::Money;
use crate::errors::Result;
use crate::overdue::OverdueSummary;
use crate::types::OverdueSeverity;

/// one credit with its payment ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditPosition {
    pub terms: LoanTerms,
    pub payments: Vec<PaymentRecord>,
}

/// credits per severity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub none: u32,
    pub light: u32,
    pub moderate: u32,
    pub critical: u32,
}

impl SeverityCounts {
    fn record(&mut self, severity: OverdueSeverity) {
        match severity {
            OverdueSeverity::None => self.none += 1,
            OverdueSeverity::Light => self.light += 1,
            OverdueSeverity::Moderate => self.moderate += 1,
            OverdueSeverity::Critical => self.critical += 1,
        }
    }
}

/// credit that needs a collector's attention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionItem {
    /// position of the credit in the input slice
    pub index: usize,
    pub severity: OverdueSeverity,
    pub overdue_installments: u32,
    pub overdue_amount: Money,
    pub days_overdue: u32,
}

/// overdue roll-up across credits: severity tiers, totals, and which credits to visit first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioOverdue {
    pub as_of: NaiveDate,
    pub credits_evaluated: u32,
    pub active_credits: u32,
    pub by_severity: SeverityCounts,
    pub total_overdue_installments: u32,
    pub total_overdue_amount: Money,
    /// worst first: severity, then days overdue, then overdue amount
    pub requiring_attention: Vec<AttentionItem>,
    /// per-credit summaries, same order as the input
    pub summaries: Vec<OverdueSummary>,
}

impl InstallmentCalculator {
    /// roll up overdue summaries for many credits
    pub fn summarize_portfolio(
        &self,
        credits: &[CreditPosition],
        as_of: NaiveDate,
    ) -> Result<PortfolioOverdue> {
        let mut by_severity = SeverityCounts::default();
        let mut total_overdue_installments = 0u32;
        let mut total_overdue_amount = Money::ZERO;
        let mut active_credits = 0u32;
        let mut requiring_attention = Vec::new();
        let mut summaries = Vec::with_capacity(credits.len());

        for (index, credit) in credits.iter().enumerate() {
            let summary = self.compute_overdue_summary(&credit.terms, &credit.payments, as_of)?;

            if credit.terms.status.is_overdue_evaluated() {
                active_credits += 1;
            }
            by_severity.record(summary.severity);
            total_overdue_installments += summary.overdue_installments;
            total_overdue_amount += summary.overdue_amount;

            if summary.requires_attention {
                requiring_attention.push(AttentionItem {
                    index,
                    severity: summary.severity,
                    overdue_installments: summary.overdue_installments,
                    overdue_amount: summary.overdue_amount,
                    days_overdue: summary.days_overdue,
                });
            }
            summaries.push(summary);
        }

        requiring_attention.sort_by(|a, b| {
            b.severity
                .cmp(&a.severity)
                .then(b.days_overdue.cmp(&a.days_overdue))
                .then(b.overdue_amount.cmp(&a.overdue_amount))
                .then(a.index.cmp(&b.index))
        });

        debug!(
            credits = credits.len(),
            attention = requiring_attention.len(),
            total_overdue = %total_overdue_amount,
            "summarized portfolio"
        );

        Ok(PortfolioOverdue {
            as_of,
            credits_evaluated: credits.len() as u32,
            active_credits,
            by_severity,
            total_overdue_installments,
            total_overdue_amount,
            requiring_attention,
            summaries,
        })
    }
}

/// portfolio roll-up with the default configuration
pub fn summarize_portfolio(credits: &[CreditPosition], as_of: NaiveDate) -> Result<PortfolioOverdue> {
    InstallmentCalculator::default().summarize_portfolio(credits, as_of)
}
