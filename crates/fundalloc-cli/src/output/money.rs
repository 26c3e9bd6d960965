use rust_decimal::Decimal;

/// Format an amount with Indian-rupee digit grouping: the last three
/// digits form one group, every group before that takes two
/// (1234567.89 renders as 12,34,567.89).
pub fn format_inr(value: &Decimal) -> String {
    let magnitude = value.abs().to_string();
    let (int_part, frac_part) = match magnitude.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (magnitude.as_str(), None),
    };

    let mut grouped = group_indian(int_part);
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    format!("₹ {sign}{grouped}")
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (rest, last3) = digits.split_at(digits.len() - 3);

    let chars: Vec<char> = rest.chars().collect();
    let mut parts: Vec<String> = Vec::new();
    let mut end = chars.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        parts.push(chars[start..end].iter().collect());
        end = start;
    }
    parts.reverse();

    format!("{},{}", parts.join(","), last3)
}
