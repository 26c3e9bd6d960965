use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::types::Money;
use crate::PlannerResult;

/// An investor's financial profile. Immutable once constructed; every
/// planning call validates it before doing any arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub monthly_income: Money,
    /// Recurring monthly investment (SIP).
    pub monthly_investment: Money,
    /// One-time investable amount.
    #[serde(default)]
    pub lump_sum_investment: Money,
    /// Six months of expenses in liquid savings.
    #[serde(default)]
    pub has_emergency_fund: bool,
    /// Term life plus health cover in place.
    #[serde(default)]
    pub has_adequate_insurance: bool,
}

/// Totals derived from a profile's investable amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSummary {
    pub monthly_sip: Money,
    pub annual_sip: Money,
    pub lumpsum: Money,
    pub first_year_total: Money,
}

impl UserProfile {
    pub fn validate(&self) -> PlannerResult<()> {
        if self.age == 0 || self.age > 120 {
            return Err(PlannerError::InvalidProfile {
                field: "age".into(),
                reason: format!("age must be between 1 and 120, got {}", self.age),
            });
        }
        if self.monthly_income < Decimal::ZERO {
            return Err(PlannerError::InvalidProfile {
                field: "monthly_income".into(),
                reason: "monthly income cannot be negative".into(),
            });
        }
        if self.monthly_investment < Decimal::ZERO {
            return Err(PlannerError::InvalidProfile {
                field: "monthly_investment".into(),
                reason: "monthly investment cannot be negative".into(),
            });
        }
        if self.lump_sum_investment < Decimal::ZERO {
            return Err(PlannerError::InvalidProfile {
                field: "lump_sum_investment".into(),
                reason: "lumpsum investment cannot be negative".into(),
            });
        }
        Ok(())
    }

    /// First-year view of the investable amounts.
    pub fn investment_summary(&self) -> InvestmentSummary {
        let annual_sip = self.monthly_investment * dec!(12);
        InvestmentSummary {
            monthly_sip: self.monthly_investment,
            annual_sip,
            lumpsum: self.lump_sum_investment,
            first_year_total: annual_sip + self.lump_sum_investment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_profile() -> UserProfile {
        UserProfile {
            age: 30,
            monthly_income: dec!(100_000),
            monthly_investment: dec!(30_000),
            lump_sum_investment: dec!(500_000),
            has_emergency_fund: true,
            has_adequate_insurance: true,
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(make_profile().validate().is_ok());
    }

    #[test]
    fn test_reject_zero_age() {
        let mut p = make_profile();
        p.age = 0;
        assert!(matches!(
            p.validate(),
            Err(PlannerError::InvalidProfile { ref field, .. }) if field == "age"
        ));
    }

    #[test]
    fn test_reject_unrealistic_age() {
        let mut p = make_profile();
        p.age = 121;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_age_bounds_inclusive() {
        let mut p = make_profile();
        p.age = 1;
        assert!(p.validate().is_ok());
        p.age = 120;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_reject_negative_income() {
        let mut p = make_profile();
        p.monthly_income = dec!(-1);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_reject_negative_sip() {
        let mut p = make_profile();
        p.monthly_investment = dec!(-100);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_reject_negative_lumpsum() {
        let mut p = make_profile();
        p.lump_sum_investment = dec!(-0.01);
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_zero_amounts_are_valid() {
        let p = UserProfile {
            age: 25,
            monthly_income: Decimal::ZERO,
            monthly_investment: Decimal::ZERO,
            lump_sum_investment: Decimal::ZERO,
            has_emergency_fund: false,
            has_adequate_insurance: false,
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_investment_summary() {
        let summary = make_profile().investment_summary();
        assert_eq!(summary.annual_sip, dec!(360_000));
        assert_eq!(summary.first_year_total, dec!(860_000));
    }
}
