use rust_decimal::Decimal;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages on the 0-100 scale (70 = 70%). Never as fractions.
pub type Percent = Decimal;
