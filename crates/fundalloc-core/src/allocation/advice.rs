//! Advisory warnings and recommendations attached to a plan.
//!
//! These never change the arithmetic; they surface the profile flags and
//! allocation shape to the caller as plain strings.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::profile::UserProfile;
use crate::types::Percent;

pub fn profile_warnings(profile: &UserProfile, equity_pct: Percent) -> Vec<String> {
    let mut warnings = Vec::new();

    if !profile.has_emergency_fund && equity_pct > dec!(50) {
        warnings.push(
            "Build a six-month emergency fund before investing heavily in equity; \
             keep it in liquid or savings instruments for immediate access."
                .to_string(),
        );
    }

    if !profile.has_adequate_insurance {
        warnings.push(
            "Ensure adequate term life cover (10-15x annual income) and health \
             insurance before an aggressive equity allocation."
                .to_string(),
        );
    }

    if equity_pct > dec!(80) {
        warnings.push(
            "Equity allocation above 80% carries significant volatility; only \
             suitable with a horizon of ten years or more."
                .to_string(),
        );
    }

    if profile.age > 60 && equity_pct > dec!(50) {
        warnings.push(
            "Past age 60, equity above 50% is aggressive for typical retirement \
             needs; consider reducing exposure for capital preservation."
                .to_string(),
        );
    }

    if profile.monthly_investment < dec!(5000) {
        warnings.push(
            "A monthly investment below 5000 limits compounding; increase the SIP \
             gradually as income grows."
                .to_string(),
        );
    }

    if profile.monthly_income > Decimal::ZERO {
        let ratio = profile.monthly_investment * Decimal::ONE_HUNDRED / profile.monthly_income;
        if ratio > dec!(50) {
            warnings.push(
                "Investing more than 50% of monthly income is aggressive; keep \
                 adequate funds for living expenses and emergencies."
                    .to_string(),
            );
        }
    }

    warnings
}

pub fn plan_recommendations(profile: &UserProfile, equity_pct: Percent) -> Vec<String> {
    let mut recs = vec![
        "Keep the portfolio simple: five to seven funds in total.".to_string(),
        "Review annually and rebalance when any category drifts 5-10% from its \
         target; sell outperformers and buy underperformers."
            .to_string(),
        "Do not try to time the market; hold diversified portions matched to age, \
         goals and risk appetite."
            .to_string(),
    ];

    if equity_pct > dec!(30) {
        recs.push(
            "Use low-cost index funds as the core equity holding; they deliver \
             market returns with minimal expense ratios."
                .to_string(),
        );
    }

    if profile.monthly_investment > Decimal::ZERO {
        recs.push(
            "Continue SIP contributions regardless of market conditions and step \
             them up with salary growth."
                .to_string(),
        );
    }

    recs.push(
        "Match instruments to horizon: debt funds for goals under three years, \
         equity funds for ten years and beyond."
            .to_string(),
    );

    if equity_pct > dec!(40) {
        recs.push(
            "Hold equity funds beyond a year where favourable long-term \
             capital-gains treatment applies."
                .to_string(),
        );
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_profile() -> UserProfile {
        UserProfile {
            age: 30,
            monthly_income: dec!(100_000),
            monthly_investment: dec!(30_000),
            lump_sum_investment: Decimal::ZERO,
            has_emergency_fund: true,
            has_adequate_insurance: true,
        }
    }

    #[test]
    fn test_no_warnings_for_covered_profile() {
        let warnings = profile_warnings(&make_profile(), dec!(70));
        assert!(warnings.is_empty(), "unexpected: {warnings:?}");
    }

    #[test]
    fn test_emergency_fund_warning_gated_on_equity() {
        let mut p = make_profile();
        p.has_emergency_fund = false;
        assert_eq!(profile_warnings(&p, dec!(70)).len(), 1);
        // Low equity allocation does not trigger it.
        assert!(profile_warnings(&p, dec!(40)).is_empty());
    }

    #[test]
    fn test_high_equity_warning() {
        let warnings = profile_warnings(&make_profile(), dec!(85));
        assert!(warnings.iter().any(|w| w.contains("above 80%")));
    }

    #[test]
    fn test_age_warning() {
        let mut p = make_profile();
        p.age = 65;
        let warnings = profile_warnings(&p, dec!(60));
        assert!(warnings.iter().any(|w| w.contains("age 60")));
    }

    #[test]
    fn test_investment_ratio_warning() {
        let mut p = make_profile();
        p.monthly_investment = dec!(60_000);
        let warnings = profile_warnings(&p, dec!(50));
        assert!(warnings.iter().any(|w| w.contains("50% of monthly income")));
    }

    #[test]
    fn test_zero_income_skips_ratio() {
        let mut p = make_profile();
        p.monthly_income = Decimal::ZERO;
        p.monthly_investment = Decimal::ZERO;
        let warnings = profile_warnings(&p, dec!(40));
        // Only the small-SIP nudge fires; no division by zero.
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_recommendations_scale_with_equity() {
        let low = plan_recommendations(&make_profile(), dec!(20));
        let high = plan_recommendations(&make_profile(), dec!(70));
        assert!(high.len() > low.len());
    }
}
