//! Stated annual premium from the illustration summary page.

use rust_decimal::Decimal;
use tracing::debug;

use super::numbers::{normalize_amount, round_cents};
use super::patterns::{CONTRACT_PREMIUM, MADPUA_PREMIUM, MADPUA_RIDER, TOTAL_ANNUAL_PREMIUM};

/// Months per year for monthly modal premiums.
const MONTHS: i64 = 12;

/// Find the annual premium printed on the summary page.
///
/// Whole life illustrations carrying the Modal Additional Deposit PUA Rider
/// state monthly base and rider premiums separately; those are annualized
/// and summed. Everything else prints a single annual figure.
pub fn extract_stated_premium(text: &str) -> Option<Decimal> {
    if MADPUA_RIDER.is_match(text) {
        let base = capture_amount(&CONTRACT_PREMIUM, text)?;
        let rider = capture_amount(&MADPUA_PREMIUM, text)?;
        let annual = round_cents(base.checked_add(rider)?.checked_mul(Decimal::from(MONTHS))?);
        debug!("Stated premium from monthly base {} + rider {}: {}", base, rider, annual);
        return Some(annual);
    }

    let annual = capture_amount(&TOTAL_ANNUAL_PREMIUM, text)?;
    debug!("Stated annual premium: {}", annual);
    Some(annual)
}

fn capture_amount(re: &regex::Regex, text: &str) -> Option<Decimal> {
    let caps = re.captures(text)?;
    normalize_amount(caps.get(1)?.as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_total_premium_annually() {
        let text = "Premium Summary\nTotal Premium - Annually     $1,234.56\n";
        assert_eq!(
            extract_stated_premium(text),
            Some(Decimal::from_str("1234.56").unwrap())
        );
    }

    #[test]
    fn test_annualized_contract_premium() {
        let text = "Annualized  Contract Premium\n   $4,800.00";
        assert_eq!(
            extract_stated_premium(text),
            Some(Decimal::from_str("4800.00").unwrap())
        );
    }

    #[test]
    fn test_madpua_rider_annualizes_monthly_premiums() {
        let text = "Riders: Modal Additional Deposit PUA Rider\n\
                    Contract Premium   monthly  $200.00\n\
                    MADPUA Premium     monthly  $50.50\n";
        assert_eq!(
            extract_stated_premium(text),
            Some(Decimal::from_str("3006.00").unwrap())
        );
    }

    #[test]
    fn test_madpua_rider_needs_both_amounts() {
        let text = "Modal Additional Deposit PUA Rider\nContract Premium $200.00";
        assert_eq!(extract_stated_premium(text), None);
    }

    #[test]
    fn test_madpua_overflow_gives_no_premium() {
        let text = "Modal Additional Deposit PUA Rider\n\
                    Contract Premium $9,000,000,000,000,000,000,000,000,000.00\n\
                    MADPUA Premium $9,000,000,000,000,000,000,000,000,000.00\n";
        assert_eq!(extract_stated_premium(text), None);
    }

    #[test]
    fn test_no_summary() {
        assert_eq!(extract_stated_premium("1 45 100.00 100,000"), None);
    }
}
