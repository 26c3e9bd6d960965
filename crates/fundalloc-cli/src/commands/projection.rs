use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fundalloc_core::projection::{estimate_corpus_at_retirement, CorpusProjectionInput};

/// Arguments for the retirement corpus projection
#[derive(Args)]
pub struct ProjectionArgs {
    /// Monthly SIP amount
    #[arg(long)]
    pub monthly_sip: Decimal,

    /// Investor's current age
    #[arg(long)]
    pub current_age: u32,

    /// Target retirement age
    #[arg(long, default_value = "60")]
    pub retirement_age: u32,

    /// Expected annual return in percent
    #[arg(long, default_value = "12")]
    pub expected_return: Decimal,
}

pub fn run_projection(args: ProjectionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = CorpusProjectionInput {
        monthly_sip: args.monthly_sip,
        current_age: args.current_age,
        retirement_age: args.retirement_age,
        expected_annual_return: args.expected_return,
    };
    let projection = estimate_corpus_at_retirement(&input)?;
    Ok(serde_json::to_value(projection)?)
}
