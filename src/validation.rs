//! Form checks shared by the store and checkout layers.

use crate::error::{PosError, PosResult};
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn required(field: &str, value: &str) -> PosResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PosError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Accepts `local@domain.tld`; anything stricter is left to the backend.
pub fn email(value: &str) -> PosResult<String> {
    let value = required("Email", value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty())
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(PosError::validation(format!("Invalid email: {}", value)));
    }
    Ok(value.to_lowercase())
}

pub fn date(field: &str, value: &str) -> PosResult<NaiveDate> {
    let value = required(field, value)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| PosError::validation(format!("Invalid {}: {}", field.to_lowercase(), value)))
}

pub fn price(value: f64) -> PosResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(PosError::validation("Price must be zero or positive"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rules() {
        assert_eq!(email(" Ana@Shop.com ").unwrap(), "ana@shop.com");
        assert!(email("ana.shop.com").is_err());
        assert!(email("ana@shop").is_err());
        assert!(email("@shop.com").is_err());
        assert!(email("a b@shop.com").is_err());
    }

    #[test]
    fn date_must_be_iso() {
        assert!(date("Date", "2024-02-29").is_ok());
        assert!(date("Date", "29/02/2024").is_err());
        assert!(date("Date", "").is_err());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(price(-0.01).is_err());
        assert!(price(f64::NAN).is_err());
        assert_eq!(price(0.0).unwrap(), 0.0);
    }
}
