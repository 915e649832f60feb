//! Common regex patterns for illustration extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Term table row: year, age, premium, death benefit, anything after
    pub static ref TERM_ROW: Regex = Regex::new(
        r"^\s*\d{1,3}\s+(\d{2,3})\s+([\d,.]+)\s+([\d,]+)"
    ).unwrap();

    // Whole life table row: year, age, premium or "Paid Up", any number of
    // guaranteed columns, then net cash value and net death benefit at EOL
    pub static ref WHOLE_LIFE_ROW: Regex = Regex::new(
        r"^\s*\d{1,3}\s+(\d{2,3})\s+([\d,.]+|(?i:paid\s+up))\s+.*?\s+([\d,]+)\s+([\d,]+)\s*$"
    ).unwrap();

    // Premium status token
    pub static ref PAID_UP: Regex = Regex::new(
        r"(?i)^paid\s+up$"
    ).unwrap();

    // Plain decimal numeral after separator stripping
    pub static ref DECIMAL_NUMERAL: Regex = Regex::new(
        r"^(?:\d+(?:\.\d*)?|\.\d+)$"
    ).unwrap();

    // Summary page premiums
    pub static ref TOTAL_ANNUAL_PREMIUM: Regex = Regex::new(
        r"(?s)(?:Total Premium - Annually|Annualized\s+Contract Premium)\s+.*?\$?([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref MADPUA_RIDER: Regex = Regex::new(
        r"(?i)Modal Additional Deposit PUA Rider"
    ).unwrap();

    pub static ref CONTRACT_PREMIUM: Regex = Regex::new(
        r"(?s)Contract Premium\s+.*?\$([\d,]+\.\d{2})"
    ).unwrap();

    pub static ref MADPUA_PREMIUM: Regex = Regex::new(
        r"(?s)MADPUA Premium\s+.*?\$([\d,]+\.\d{2})"
    ).unwrap();
}

/// Compile a literal marker phrase into a case-insensitive matcher.
pub fn marker_regex(marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?i){}", regex::escape(marker)))
}
