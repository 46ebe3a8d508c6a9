//! Input validation module
//!
//! Centralized validation for user input (emails, passwords), financial
//! data (prices, quantities), and list parameters. Every helper rejects
//! with `AppError::InvalidInput` so callers fail before touching storage.

use crate::errors::AppError;

pub type ValidationResult = Result<(), AppError>;

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::InvalidInput(msg.into())
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(invalid("email must not be empty"));
    }

    if trimmed.len() > 254 {
        return Err(invalid("email too long (max 254 characters)"));
    }

    let parts: Vec<&str> = trimmed.split('@').collect();
    if parts.len() != 2 {
        return Err(invalid("invalid email format"));
    }

    let (local, domain) = (parts[0], parts[1]);

    if local.is_empty() || local.len() > 64 {
        return Err(invalid("invalid email local part"));
    }

    if !domain.contains('.') {
        return Err(invalid("invalid email domain"));
    }

    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str, min_length: usize) -> ValidationResult {
    if password.is_empty() {
        return Err(invalid("password must not be empty"));
    }

    if password.len() < min_length {
        return Err(invalid(format!("password must be at least {} characters", min_length)));
    }

    if password.len() > 128 {
        return Err(invalid("password too long (max 128 characters)"));
    }

    Ok(())
}

/// Validate product name
pub fn validate_product_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(invalid("product name must not be empty"));
    }

    if trimmed.len() > 200 {
        return Err(invalid("product name too long (max 200 characters)"));
    }

    Ok(())
}

/// Validate a price in minor units (cents). Non-negative, bounded.
pub fn validate_price_cents(price_cents: i64) -> ValidationResult {
    if price_cents < 0 {
        return Err(invalid("price must not be negative"));
    }

    // 1 billion in major units
    if price_cents > 100_000_000_000 {
        return Err(invalid("price exceeds maximum"));
    }

    Ok(())
}

/// Validate a stock quantity. Zero is allowed (out of stock).
pub fn validate_stock_quantity(qty: i64) -> ValidationResult {
    if qty < 0 {
        return Err(invalid("stock quantity must not be negative"));
    }

    if qty > 1_000_000 {
        return Err(invalid("stock quantity exceeds maximum"));
    }

    Ok(())
}

/// Validate a sale quantity. Must be strictly positive.
pub fn validate_sale_quantity(qty: i64) -> ValidationResult {
    if qty <= 0 {
        return Err(invalid("quantity must be a positive integer"));
    }

    if qty > 1_000_000 {
        return Err(invalid("quantity exceeds maximum"));
    }

    Ok(())
}

/// Validate an entity id coming from a caller.
pub fn validate_id(id: i64, what: &str) -> ValidationResult {
    if id <= 0 {
        return Err(invalid(format!("{} must be a positive id", what)));
    }
    Ok(())
}

/// Validate an ISO date-ish bound used to filter sale listings.
/// Accepts `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`; anything else is rejected
/// so it can be bound into a query safely.
pub fn validate_date_bound(value: &str) -> ValidationResult {
    let ok = match value.len() {
        10 => is_date(value),
        19 => {
            let (d, t) = value.split_at(10);
            is_date(d) && is_time(&t[1..]) && t.starts_with(' ')
        }
        _ => false,
    };

    if !ok {
        return Err(invalid("date bound must be YYYY-MM-DD or YYYY-MM-DD HH:MM:SS"));
    }
    Ok(())
}

fn is_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && s.char_indices()
            .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}

fn is_time(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 8
        && b[2] == b':'
        && b[5] == b':'
        && s.char_indices()
            .all(|(i, c)| matches!(i, 2 | 5) || c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_rejects_malformed_input() {
        assert!(validate_email("owner@shop.example").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@signs.example").is_err());
        assert!(validate_email("@shop.example").is_err());
        assert!(validate_email("owner@nodot").is_err());
    }

    #[test]
    fn password_length_is_enforced() {
        assert!(validate_password("Correct1", 8).is_ok());
        assert!(validate_password("short", 8).is_err());
        assert!(validate_password("", 8).is_err());
    }

    #[test]
    fn sale_quantity_must_be_positive() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-3).is_err());
    }

    #[test]
    fn stock_quantity_allows_zero() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(-1).is_err());
    }

    #[test]
    fn price_must_not_be_negative() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1999).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }

    #[test]
    fn date_bounds_are_shape_checked() {
        assert!(validate_date_bound("2026-08-06").is_ok());
        assert!(validate_date_bound("2026-08-06 13:45:00").is_ok());
        assert!(validate_date_bound("tomorrow").is_err());
        assert!(validate_date_bound("2026-8-6").is_err());
        assert!(validate_date_bound("2026-08-06; DROP TABLE sales").is_err());
    }
}
