//! Retirement corpus projection for a recurring SIP.
//!
//! Future value of an annuity-due with monthly compounding at a constant
//! rate. Deterministic: no volatility, no withdrawals before retirement.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::types::{Money, Percent};
use crate::PlannerResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusProjectionInput {
    pub monthly_sip: Money,
    pub current_age: u32,
    pub retirement_age: u32,
    /// Expected annual return, percent (12 = 12% a year).
    pub expected_annual_return: Percent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusProjection {
    pub months: u32,
    pub total_contributions: Money,
    pub projected_corpus: Money,
    pub investment_gains: Money,
}

/// Compute (1 + r)^n via iterative multiplication (avoids powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

pub fn estimate_corpus_at_retirement(
    input: &CorpusProjectionInput,
) -> PlannerResult<CorpusProjection> {
    if input.retirement_age <= input.current_age {
        return Err(PlannerError::InvalidAllocationInput {
            field: "retirement_age".into(),
            reason: format!(
                "retirement age {} must be greater than current age {}",
                input.retirement_age, input.current_age
            ),
        });
    }
    if input.monthly_sip < Decimal::ZERO {
        return Err(PlannerError::InvalidAllocationInput {
            field: "monthly_sip".into(),
            reason: "monthly SIP cannot be negative".into(),
        });
    }
    if input.expected_annual_return < Decimal::ZERO {
        return Err(PlannerError::InvalidAllocationInput {
            field: "expected_annual_return".into(),
            reason: "expected return cannot be negative".into(),
        });
    }

    let months = (input.retirement_age - input.current_age) * 12;
    let total_contributions = input.monthly_sip * Decimal::from(months);

    let monthly_rate = input.expected_annual_return / dec!(12) / Decimal::ONE_HUNDRED;
    let corpus = if monthly_rate.is_zero() {
        total_contributions
    } else {
        // Annuity-due: contributions land at the start of each month.
        let growth = (compound(monthly_rate, months) - Decimal::ONE) / monthly_rate;
        input.monthly_sip * growth * (Decimal::ONE + monthly_rate)
    };
    let projected_corpus = corpus.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(CorpusProjection {
        months,
        total_contributions,
        investment_gains: projected_corpus - total_contributions,
        projected_corpus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn make_input() -> CorpusProjectionInput {
        CorpusProjectionInput {
            monthly_sip: dec!(1000),
            current_age: 30,
            retirement_age: 60,
            expected_annual_return: dec!(12),
        }
    }

    #[test]
    fn test_one_year_at_twelve_percent() {
        let mut input = make_input();
        input.retirement_age = 31;
        let projection = estimate_corpus_at_retirement(&input).unwrap();
        assert_eq!(projection.months, 12);
        assert_eq!(projection.total_contributions, dec!(12_000));
        // 1000 * ((1.01^12 - 1) / 0.01) * 1.01
        assert_eq!(projection.projected_corpus, dec!(12_809.33));
        assert_eq!(projection.investment_gains, dec!(809.33));
    }

    #[test]
    fn test_zero_return_degenerates_to_contributions() {
        let mut input = make_input();
        input.expected_annual_return = Decimal::ZERO;
        let projection = estimate_corpus_at_retirement(&input).unwrap();
        assert_eq!(projection.projected_corpus, dec!(360_000));
        assert_eq!(projection.investment_gains, Decimal::ZERO);
    }

    #[test]
    fn test_long_horizon_compounds() {
        let projection = estimate_corpus_at_retirement(&make_input()).unwrap();
        assert_eq!(projection.months, 360);
        // Thirty years at 12% grows well past the 360k contributed.
        assert!(projection.projected_corpus > dec!(3_000_000));
        assert_eq!(
            projection.investment_gains,
            projection.projected_corpus - projection.total_contributions
        );
    }

    #[test]
    fn test_reject_retirement_not_after_current_age() {
        let mut input = make_input();
        input.retirement_age = 30;
        assert!(estimate_corpus_at_retirement(&input).is_err());
    }

    #[test]
    fn test_reject_negative_sip() {
        let mut input = make_input();
        input.monthly_sip = dec!(-1);
        assert!(estimate_corpus_at_retirement(&input).is_err());
    }

    #[test]
    fn test_reject_negative_return() {
        let mut input = make_input();
        input.expected_annual_return = dec!(-5);
        assert!(estimate_corpus_at_retirement(&input).is_err());
    }

    #[test]
    fn test_zero_sip_is_valid() {
        let mut input = make_input();
        input.monthly_sip = Decimal::ZERO;
        let projection = estimate_corpus_at_retirement(&input).unwrap();
        assert_eq!(projection.projected_corpus, Decimal::ZERO);
    }
}
