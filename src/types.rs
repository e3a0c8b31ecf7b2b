use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{CollectionsError, Result};

/// installment cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// fixed length of one period in days, none for calendar months
    pub fn period_days(&self) -> Option<i64> {
        match self {
            Frequency::Daily => Some(1),
            Frequency::Weekly => Some(7),
            Frequency::Biweekly => Some(14),
            Frequency::Monthly => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl FromStr for Frequency {
    type Err = CollectionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(CollectionsError::UnknownFrequency {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// credit (loan) status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    /// requested, waiting for a manager
    PendingApproval,
    /// approved, cash not yet handed to the client
    WaitingDelivery,
    /// disbursed and being collected
    Active,
    /// fully repaid
    Completed,
    /// written off as unrecoverable
    Defaulted,
    Cancelled,
    /// turned down at approval
    Rejected,
}

impl CreditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditStatus::PendingApproval => "pending_approval",
            CreditStatus::WaitingDelivery => "waiting_delivery",
            CreditStatus::Active => "active",
            CreditStatus::Completed => "completed",
            CreditStatus::Defaulted => "defaulted",
            CreditStatus::Cancelled => "cancelled",
            CreditStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for CreditStatus {
    type Err = CollectionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending_approval" => Ok(CreditStatus::PendingApproval),
            "waiting_delivery" => Ok(CreditStatus::WaitingDelivery),
            "active" => Ok(CreditStatus::Active),
            "completed" => Ok(CreditStatus::Completed),
            "defaulted" => Ok(CreditStatus::Defaulted),
            "cancelled" => Ok(CreditStatus::Cancelled),
            "rejected" => Ok(CreditStatus::Rejected),
            _ => Err(CollectionsError::UnknownStatus {
                kind: "credit",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// status of a recorded payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    /// only partial and completed payments count toward paid totals
    pub fn counts_toward_balance(&self) -> bool {
        matches!(self, PaymentStatus::Partial | PaymentStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = CollectionsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "partial" => Ok(PaymentStatus::Partial),
            "completed" => Ok(PaymentStatus::Completed),
            "failed" => Ok(PaymentStatus::Failed),
            "cancelled" => Ok(PaymentStatus::Cancelled),
            _ => Err(CollectionsError::UnknownStatus {
                kind: "payment",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// computed status of a single installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    Paid,
    Partial,
    Pending,
}

/// how far behind a credit is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverdueSeverity {
    None,
    Light,
    Moderate,
    Critical,
}

impl OverdueSeverity {
    pub fn requires_attention(&self) -> bool {
        *self != OverdueSeverity::None
    }
}

/// metric that drives severity tiering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBasis {
    OverdueInstallments,
    DaysOverdue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!(" Biweekly ".parse::<Frequency>().unwrap(), Frequency::Biweekly);
        assert_eq!(
            "fortnightly".parse::<Frequency>(),
            Err(CollectionsError::UnknownFrequency {
                value: "fortnightly".to_string()
            })
        );
    }

    #[test]
    fn test_status_round_trip_through_serde() {
        let json = serde_json::to_string(&CreditStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"pending_approval\"");

        let status: PaymentStatus = serde_json::from_str("\"partial\"").unwrap();
        assert_eq!(status, PaymentStatus::Partial);
        assert!(serde_json::from_str::<PaymentStatus>("\"refunded\"").is_err());
    }

    #[test]
    fn test_unknown_status_names_its_kind() {
        let err = "approved".parse::<CreditStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown credit status: approved");
    }

    #[test]
    fn test_counted_payment_statuses() {
        assert!(PaymentStatus::Partial.counts_toward_balance());
        assert!(PaymentStatus::Completed.counts_toward_balance());
        assert!(!PaymentStatus::Pending.counts_toward_balance());
        assert!(!PaymentStatus::Failed.counts_toward_balance());
        assert!(!PaymentStatus::Cancelled.counts_toward_balance());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(OverdueSeverity::Critical > OverdueSeverity::Moderate);
        assert!(OverdueSeverity::Light > OverdueSeverity::None);
        assert!(!OverdueSeverity::None.requires_attention());
    }
}
