use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CollectionsError, Result};
use crate::types::{OverdueSeverity, SeverityBasis};

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// rounding slack when deciding whether an installment is fully paid
    pub payment_epsilon: Money,
    /// severity tiering policy
    pub severity: SeverityPolicy,
    /// when false, daily installments never fall due on a sunday
    pub sunday_collections: bool,
}

/// severity policy table
///
/// `light_max` and `moderate_max` are inclusive upper bounds on the basis
/// metric. Anything above `moderate_max` is critical. A credit with no
/// overdue installments is always `None` whatever the basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityPolicy {
    pub basis: SeverityBasis,
    pub light_max: u32,
    pub moderate_max: u32,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self::by_overdue_installments()
    }
}

impl SeverityPolicy {
    /// 1-3 overdue installments light, 4-10 moderate, more critical
    pub fn by_overdue_installments() -> Self {
        Self {
            basis: SeverityBasis::OverdueInstallments,
            light_max: 3,
            moderate_max: 10,
        }
    }

    /// up to a week late light, up to a month moderate, beyond critical
    pub fn by_days_overdue() -> Self {
        Self {
            basis: SeverityBasis::DaysOverdue,
            light_max: 7,
            moderate_max: 30,
        }
    }

    /// classify a credit given its overdue count and age
    pub fn classify(&self, overdue_installments: u32, days_overdue: u32) -> OverdueSeverity {
        if overdue_installments == 0 {
            return OverdueSeverity::None;
        }

        let metric = match self.basis {
            SeverityBasis::OverdueInstallments => overdue_installments,
            SeverityBasis::DaysOverdue => days_overdue,
        };

        if metric <= self.light_max {
            OverdueSeverity::Light
        } else if metric <= self.moderate_max {
            OverdueSeverity::Moderate
        } else {
            OverdueSeverity::Critical
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.light_max > self.moderate_max {
            return Err(CollectionsError::InvalidConfiguration {
                message: format!(
                    "light_max ({}) must not exceed moderate_max ({})",
                    self.light_max, self.moderate_max
                ),
            });
        }
        Ok(())
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            payment_epsilon: Money::from_decimal(dec!(0.01)),
            severity: SeverityPolicy::default(),
            sunday_collections: false,
        }
    }
}

impl CalculatorConfig {
    /// default config with severity driven by days overdue
    pub fn days_based() -> Self {
        Self {
            severity: SeverityPolicy::by_days_overdue(),
            ..Self::default()
        }
    }

    /// load from json, missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig =
            serde_json::from_str(json).map_err(|e| CollectionsError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.payment_epsilon.is_negative() {
            return Err(CollectionsError::InvalidConfiguration {
                message: format!("payment_epsilon must not be negative: {}", self.payment_epsilon),
            });
        }
        self.severity.validate()
    }
}
