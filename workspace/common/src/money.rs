use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use rusty_money::{Money, iso};

/// Formats an amount as Brazilian reais with the report's layout, e.g.
/// `R$ 1,234.56` and `R$ -80.00`.
pub fn format_brl(amount: Decimal) -> String {
    let amount = amount.round_dp(2);
    let digits = Money::from_decimal(amount.abs(), iso::BRL).to_string();
    let digits = digits.trim_start_matches(iso::BRL.symbol);
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("R$ {sign}{digits}")
}

/// Same as [`format_brl`] for values that already left decimal arithmetic
/// (chart series). Non-finite values format as zero.
pub fn format_brl_f64(amount: f64) -> String {
    let amount = Decimal::from_f64(amount).unwrap_or(Decimal::ZERO);
    format_brl(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl_layout() {
        assert_eq!(format_brl(Decimal::new(123456, 2)), "R$ 1,234.56");
        assert_eq!(format_brl(Decimal::new(-8000, 2)), "R$ -80.00");
        assert_eq!(format_brl(Decimal::new(5, 1)), "R$ 0.50");
        assert_eq!(format_brl(Decimal::new(-1, 3)), "R$ 0.00");
    }

    #[test]
    fn test_format_brl_f64_handles_nan() {
        assert_eq!(format_brl_f64(f64::NAN), format_brl(Decimal::ZERO));
    }
}
