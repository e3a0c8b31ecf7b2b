use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CollectionsError, Result};
use crate::types::{CreditStatus, Frequency, PaymentStatus};

/// loan terms as agreed at approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// amount handed to the client
    pub principal: Money,
    /// principal plus interest
    pub total_amount: Money,
    pub installment_amount: Money,
    pub total_installments: u32,
    pub frequency: Frequency,
    /// due date of the first installment
    pub start_date: NaiveDate,
    pub status: CreditStatus,
}

impl LoanTerms {
    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// amount the schedule adds up to
    pub fn scheduled_total(&self) -> Money {
        self.installment_amount * self.total_installments
    }

    /// true for terms the calculator can schedule meaningfully
    pub fn is_well_formed(&self) -> bool {
        self.total_installments > 0 && self.installment_amount.is_positive()
    }

    /// installment_amount * total_installments must match total_amount within `tolerance`
    pub fn check_consistency(&self, tolerance: Money) -> Result<()> {
        let actual = self.scheduled_total();
        if !actual.approx_eq(self.total_amount, tolerance) {
            return Err(CollectionsError::InconsistentTerms {
                expected: self.total_amount,
                actual,
            });
        }
        Ok(())
    }
}

/// number of installments needed to cover `total_amount`, rounding up
pub fn derive_total_installments(total_amount: Money, installment_amount: Money) -> Result<u32> {
    if !installment_amount.is_positive() {
        return Err(CollectionsError::InvalidInstallmentAmount {
            amount: installment_amount,
        });
    }
    if !total_amount.is_positive() {
        return Ok(0);
    }

    (total_amount.as_decimal() / installment_amount.as_decimal())
        .ceil()
        .to_u32()
        .ok_or_else(|| CollectionsError::InvalidConfiguration {
            message: format!(
                "installment count for {} / {} does not fit in u32",
                total_amount, installment_amount
            ),
        })
}

/// one recorded payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub amount: Money,
    /// installment this payment applies toward, 1-based
    pub installment_number: u32,
    pub status: PaymentStatus,
    pub payment_date: NaiveDate,
}

impl PaymentRecord {
    pub fn new(
        installment_number: u32,
        amount: Money,
        status: PaymentStatus,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            installment_number,
            status,
            payment_date,
        }
    }

    /// completed payment
    pub fn completed(installment_number: u32, amount: Money, payment_date: NaiveDate) -> Self {
        Self::new(installment_number, amount, PaymentStatus::Completed, payment_date)
    }

    /// partial payment
    pub fn partial(installment_number: u32, amount: Money, payment_date: NaiveDate) -> Self {
        Self::new(installment_number, amount, PaymentStatus::Partial, payment_date)
    }

    pub fn counts_toward_balance(&self) -> bool {
        self.status.counts_toward_balance()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(CollectionsError::InvalidPaymentAmount { amount: self.amount });
        }
        if self.installment_number == 0 {
            return Err(CollectionsError::InvalidInstallmentNumber {
                number: self.installment_number,
            });
        }
        Ok(())
    }
}

impl CreditStatus {
    /// overdue math only applies to disbursed credits being collected
    pub fn is_overdue_evaluated(&self) -> bool {
        matches!(self, CreditStatus::Active)
    }

    /// no transitions out
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CreditStatus::Completed
                | CreditStatus::Defaulted
                | CreditStatus::Cancelled
                | CreditStatus::Rejected
        )
    }

    /// check if the lifecycle allows moving to `next`
    pub fn can_transition_to(&self, next: CreditStatus) -> bool {
        use CreditStatus::*;

        matches!(
            (self, next),
            (PendingApproval, WaitingDelivery)
                | (PendingApproval, Rejected)
                | (WaitingDelivery, Active)
                | (Active, Completed)
                | (Active, Defaulted)
                | (Active, Cancelled)
        )
    }

    /// move to `next` or fail with the offending pair
    pub fn transition(self, next: CreditStatus) -> Result<CreditStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CollectionsError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

/// balance recomputed from the payment ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub total_paid: Money,
    pub remaining_balance: Money,
    /// share of total_amount already paid, capped at 100%
    pub progress: Rate,
    pub is_fully_paid: bool,
}

impl BalanceSnapshot {
    /// sum counted payments against the credit's total amount
    pub fn compute(terms: &LoanTerms, payments: &[PaymentRecord], epsilon: Money) -> Result<Self> {
        let mut total_paid = Money::ZERO;
        for payment in payments {
            payment.validate()?;
            if payment.counts_toward_balance() {
                total_paid += payment.amount;
            }
        }

        let remaining_balance = (terms.total_amount - total_paid).max(Money::ZERO);

        Ok(Self {
            total_paid,
            remaining_balance,
            progress: Rate::from_ratio(total_paid, terms.total_amount).clamp_unit(),
            is_fully_paid: remaining_balance <= epsilon,
        })
    }
}

/// status the credit should move to given its balance
pub fn suggested_status(terms: &LoanTerms, balance: &BalanceSnapshot) -> CreditStatus {
    if terms.status == CreditStatus::Active && balance.is_fully_paid {
        CreditStatus::Completed
    } else {
        terms.status
    }
}

/// builder for loan terms
///
/// Any two of `total_amount`, `installment_amount` and `total_installments`
/// determine the third. The result is checked so that the installments add
/// up to the total within one cent per installment.
#[derive(Debug, Default)]
pub struct LoanTermsBuilder {
    principal: Option<Money>,
    total_amount: Option<Money>,
    installment_amount: Option<Money>,
    total_installments: Option<u32>,
    frequency: Option<Frequency>,
    start_date: Option<NaiveDate>,
    status: Option<CreditStatus>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn total_amount(mut self, total: Money) -> Self {
        self.total_amount = Some(total);
        self
    }

    pub fn installment_amount(mut self, amount: Money) -> Self {
        self.installment_amount = Some(amount);
        self
    }

    pub fn total_installments(mut self, count: u32) -> Self {
        self.total_installments = Some(count);
        self
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn status(mut self, status: CreditStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let frequency = self.frequency.ok_or_else(|| missing("frequency"))?;
        let start_date = self.start_date.ok_or_else(|| missing("start_date"))?;

        let count_derived = self.total_installments.is_none();
        let (installment_amount, total_installments, total_amount) =
            match (self.installment_amount, self.total_installments, self.total_amount) {
                (Some(amount), Some(count), total) => {
                    (amount, count, total.unwrap_or(amount * count))
                }
                (None, Some(count), Some(total)) => {
                    if count == 0 {
                        return Err(CollectionsError::InvalidConfiguration {
                            message: "total_installments must be at least 1".to_string(),
                        });
                    }
                    (total / Decimal::from(count), count, total)
                }
                (Some(amount), None, Some(total)) => {
                    (amount, derive_total_installments(total, amount)?, total)
                }
                _ => {
                    return Err(CollectionsError::InvalidConfiguration {
                        message: "two of total_amount, installment_amount, total_installments are required"
                            .to_string(),
                    })
                }
            };

        if total_installments == 0 {
            return Err(CollectionsError::InvalidConfiguration {
                message: "total_installments must be at least 1".to_string(),
            });
        }
        if !installment_amount.is_positive() {
            return Err(CollectionsError::InvalidInstallmentAmount {
                amount: installment_amount,
            });
        }

        let terms = LoanTerms {
            principal: self.principal.unwrap_or(total_amount),
            total_amount,
            installment_amount,
            total_installments,
            frequency,
            start_date,
            status: self.status.unwrap_or(CreditStatus::Active),
        };
        if count_derived {
            // last installment may come up short of installment_amount
            let overshoot = terms.scheduled_total() - terms.total_amount;
            if overshoot.is_negative() || overshoot >= terms.installment_amount {
                return Err(CollectionsError::InconsistentTerms {
                    expected: terms.total_amount,
                    actual: terms.scheduled_total(),
                });
            }
        } else {
            terms.check_consistency(Money::CENT * total_installments)?;
        }

        Ok(terms)
    }
}

fn missing(field: &str) -> CollectionsError {
    CollectionsError::InvalidConfiguration {
        message: format!("{} is required", field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builder_derives_total_amount() {
        let terms = LoanTerms::builder()
            .principal(Money::from_major(1_000))
            .installment_amount(Money::from_major(60))
            .total_installments(20)
            .frequency(Frequency::Daily)
            .start_date(date(2025, 1, 1))
            .build()
            .unwrap();

        assert_eq!(terms.total_amount, Money::from_major(1_200));
        assert_eq!(terms.principal, Money::from_major(1_000));
        assert_eq!(terms.status, CreditStatus::Active);
    }

    #[test]
    fn test_builder_derives_installment_amount() {
        let terms = LoanTerms::builder()
            .total_amount(Money::from_major(1_000))
            .total_installments(3)
            .frequency(Frequency::Weekly)
            .start_date(date(2025, 1, 1))
            .build()
            .unwrap();

        // 333.33 * 3 = 999.99, within one cent per installment
        assert_eq!(terms.installment_amount, Money::from_decimal(dec!(333.33)));
    }

    #[test]
    fn test_builder_derives_installment_count() {
        let terms = LoanTerms::builder()
            .total_amount(Money::from_major(1_200))
            .installment_amount(Money::from_major(100))
            .frequency(Frequency::Monthly)
            .start_date(date(2025, 1, 31))
            .build()
            .unwrap();
        assert_eq!(terms.total_installments, 12);
    }

    #[test]
    fn test_builder_derives_count_with_short_final_installment() {
        let terms = LoanTerms::builder()
            .total_amount(Money::from_major(1_050))
            .installment_amount(Money::from_major(100))
            .frequency(Frequency::Weekly)
            .start_date(date(2025, 1, 6))
            .build()
            .unwrap();

        assert_eq!(terms.total_installments, 11);
        assert_eq!(terms.total_amount, Money::from_major(1_050));
        assert_eq!(terms.scheduled_total(), Money::from_major(1_100));
        // cent tolerance still applies when the count is given explicitly
        assert!(terms.check_consistency(Money::CENT * 11u32).is_err());
    }

    #[test]
    fn test_builder_rejects_inconsistent_terms() {
        let err = LoanTerms::builder()
            .total_amount(Money::from_major(1_000))
            .installment_amount(Money::from_major(100))
            .total_installments(12)
            .frequency(Frequency::Monthly)
            .start_date(date(2025, 1, 1))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CollectionsError::InconsistentTerms {
                expected: Money::from_major(1_000),
                actual: Money::from_major(1_200),
            }
        );
    }

    #[test]
    fn test_builder_requires_fields() {
        let err = LoanTerms::builder()
            .installment_amount(Money::from_major(100))
            .total_installments(10)
            .start_date(date(2025, 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, CollectionsError::InvalidConfiguration { .. }));

        let err = LoanTerms::builder()
            .installment_amount(Money::from_major(100))
            .frequency(Frequency::Daily)
            .start_date(date(2025, 1, 1))
            .build()
            .unwrap_err();
        assert!(matches!(err, CollectionsError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_derive_total_installments() {
        assert_eq!(
            derive_total_installments(Money::from_major(1_000), Money::from_major(100)).unwrap(),
            10
        );
        assert_eq!(
            derive_total_installments(Money::from_major(1_050), Money::from_major(100)).unwrap(),
            11
        );
        assert_eq!(derive_total_installments(Money::ZERO, Money::from_major(100)).unwrap(), 0);
        assert!(derive_total_installments(Money::from_major(1_000), Money::ZERO).is_err());
    }

    #[test]
    fn test_payment_validation() {
        let day = date(2025, 1, 1);
        assert!(PaymentRecord::completed(1, Money::from_major(50), day).validate().is_ok());

        let negative = PaymentRecord::completed(1, Money::from_major(-50), day);
        assert_eq!(
            negative.validate(),
            Err(CollectionsError::InvalidPaymentAmount {
                amount: Money::from_major(-50)
            })
        );

        let zero_number = PaymentRecord::partial(0, Money::from_major(50), day);
        assert!(matches!(
            zero_number.validate(),
            Err(CollectionsError::InvalidInstallmentNumber { number: 0 })
        ));
    }

    #[test]
    fn test_status_lifecycle() {
        let status = CreditStatus::PendingApproval
            .transition(CreditStatus::WaitingDelivery)
            .and_then(|s| s.transition(CreditStatus::Active))
            .and_then(|s| s.transition(CreditStatus::Completed))
            .unwrap();
        assert_eq!(status, CreditStatus::Completed);
        assert!(status.is_terminal());

        assert!(CreditStatus::PendingApproval.can_transition_to(CreditStatus::Rejected));
        assert!(!CreditStatus::PendingApproval.can_transition_to(CreditStatus::Active));
        assert!(!CreditStatus::Completed.can_transition_to(CreditStatus::Active));
        assert_eq!(
            CreditStatus::Rejected.transition(CreditStatus::Active),
            Err(CollectionsError::InvalidTransition {
                from: CreditStatus::Rejected,
                to: CreditStatus::Active,
            })
        );
        assert!(CreditStatus::Active.is_overdue_evaluated());
        assert!(!CreditStatus::WaitingDelivery.is_overdue_evaluated());
    }

    #[test]
    fn test_balance_snapshot() {
        let terms = LoanTerms::builder()
            .installment_amount(Money::from_major(100))
            .total_installments(4)
            .frequency(Frequency::Weekly)
            .start_date(date(2025, 1, 1))
            .build()
            .unwrap();
        let day = date(2025, 1, 1);
        let payments = vec![
            PaymentRecord::completed(1, Money::from_major(100), day),
            PaymentRecord::partial(2, Money::from_major(50), day),
            PaymentRecord::new(2, Money::from_major(50), PaymentStatus::Failed, day),
            PaymentRecord::new(3, Money::from_major(100), PaymentStatus::Cancelled, day),
        ];

        let balance = BalanceSnapshot::compute(&terms, &payments, Money::CENT).unwrap();
        assert_eq!(balance.total_paid, Money::from_major(150));
        assert_eq!(balance.remaining_balance, Money::from_major(250));
        assert_eq!(balance.progress.as_decimal(), dec!(0.375));
        assert!(!balance.is_fully_paid);
        assert_eq!(suggested_status(&terms, &balance), CreditStatus::Active);
    }

    #[test]
    fn test_overpaid_balance_suggests_completion() {
        let terms = LoanTerms::builder()
            .installment_amount(Money::from_major(100))
            .total_installments(2)
            .frequency(Frequency::Weekly)
            .start_date(date(2025, 1, 1))
            .build()
            .unwrap();
        let day = date(2025, 1, 8);
        let payments = vec![
            PaymentRecord::completed(1, Money::from_major(100), day),
            PaymentRecord::completed(2, Money::from_major(120), day),
        ];

        let balance = BalanceSnapshot::compute(&terms, &payments, Money::CENT).unwrap();
        assert_eq!(balance.remaining_balance, Money::ZERO);
        assert_eq!(balance.progress, Rate::ONE);
        assert!(balance.is_fully_paid);
        assert_eq!(suggested_status(&terms, &balance), CreditStatus::Completed);
    }
}
