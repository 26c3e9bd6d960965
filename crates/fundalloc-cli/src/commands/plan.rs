use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use fundalloc_core::allocation::{
    recommended_strategy_for_age, AssetAllocationEngine, PlanRequest, RiskProfile, SplitMethod,
};
use fundalloc_core::profile::UserProfile;

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum RiskProfileArg {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<RiskProfileArg> for RiskProfile {
    fn from(arg: RiskProfileArg) -> Self {
        match arg {
            RiskProfileArg::Conservative => RiskProfile::Conservative,
            RiskProfileArg::Moderate => RiskProfile::Moderate,
            RiskProfileArg::Aggressive => RiskProfile::Aggressive,
        }
    }
}

/// Arguments for plan creation
#[derive(Args)]
pub struct PlanArgs {
    /// Path to a JSON/YAML file with the investor profile
    #[arg(long)]
    pub input: Option<String>,

    /// Investor age in years
    #[arg(long)]
    pub age: Option<u32>,

    /// Monthly take-home income
    #[arg(long)]
    pub monthly_income: Option<Decimal>,

    /// Monthly SIP amount
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// One-time investable amount
    #[arg(long, default_value = "0")]
    pub lumpsum: Decimal,

    /// Six months of expenses already set aside
    #[arg(long)]
    pub has_emergency_fund: bool,

    /// Term life and health cover in place
    #[arg(long)]
    pub has_adequate_insurance: bool,

    /// Risk tier driving the age-to-equity curve
    #[arg(long)]
    pub risk_profile: Option<RiskProfileArg>,

    /// Custom equity percentage (overrides --risk-profile)
    #[arg(long, allow_hyphen_values = true)]
    pub equity_pct: Option<Decimal>,

    /// Equity strategy; defaults to the recommendation for the age
    #[arg(long)]
    pub equity_strategy: Option<String>,

    /// Debt strategy
    #[arg(long, default_value = "long_term")]
    pub debt_strategy: String,

    /// Carve an international slice out of the equity allocation
    #[arg(long)]
    pub add_international: bool,

    /// Advisory rebalance band width in percentage points
    #[arg(long, default_value = "5")]
    pub drift_threshold: Decimal,
}

fn get_profile(args: &PlanArgs) -> Result<UserProfile, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_typed(path);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    match (args.age, args.monthly_income, args.monthly_investment) {
        (Some(age), Some(monthly_income), Some(monthly_investment)) => Ok(UserProfile {
            age,
            monthly_income,
            monthly_investment,
            lump_sum_investment: args.lumpsum,
            has_emergency_fund: args.has_emergency_fund,
            has_adequate_insurance: args.has_adequate_insurance,
        }),
        _ => Err("Provide --age, --monthly-income and --monthly-investment, \
                  or a profile via --input file or piped stdin"
            .into()),
    }
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile = get_profile(&args)?;

    let split = if let Some(pct) = args.equity_pct {
        SplitMethod::Custom(pct)
    } else if let Some(ref risk_profile) = args.risk_profile {
        SplitMethod::RiskProfile(risk_profile.clone().into())
    } else {
        SplitMethod::AgeBased
    };

    let equity_strategy = args
        .equity_strategy
        .clone()
        .unwrap_or_else(|| recommended_strategy_for_age(profile.age).to_string());

    let request = PlanRequest {
        profile,
        equity_strategy,
        debt_strategy: args.debt_strategy.clone(),
        split,
        add_international: args.add_international,
        drift_threshold: args.drift_threshold,
    };

    let plan = AssetAllocationEngine::with_presets().create_plan(&request)?;
    Ok(plan.export()?)
}
