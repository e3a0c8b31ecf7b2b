pub mod calculator;
pub mod config;
pub mod credit;
pub mod decimal;
pub mod errors;
pub mod overdue;
pub mod portfolio;
pub mod schedule;
pub mod types;

// re-export key types
pub use calculator::{
    compute_overdue_summary, compute_overdue_summary_now, compute_schedule, recalculate_balance,
    InstallmentCalculator,
};
pub use config::{CalculatorConfig, SeverityPolicy};
pub use credit::{
    derive_total_installments, suggested_status, BalanceSnapshot, LoanTerms, LoanTermsBuilder,
    PaymentRecord,
};
pub use decimal::{Money, Rate};
pub use errors::{CollectionsError, Result};
pub use overdue::OverdueSummary;
pub use portfolio::{summarize_portfolio, CreditPosition, PortfolioOverdue};
pub use schedule::{next_due_installment, CollectionCalendar, InstallmentView};
pub use types::{
    CreditStatus, Frequency, InstallmentStatus, OverdueSeverity, PaymentStatus, SeverityBasis,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
