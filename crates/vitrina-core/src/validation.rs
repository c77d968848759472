//! # Validation Module
//!
//! Input validation for admin writes.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form (client side)                                     │
//! │  └── Basic required-field checks                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services (Rust)                                              │
//! │  └── THIS MODULE: runs BEFORE any upload, so a rejected write never    │
//! │      leaves an orphaned asset behind                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (stock >= 0), CHECK (id = 1) on singletons                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vitrina_core::validation::{validate_color, validate_stock};
//!
//! validate_color("color1", "#ff8800").unwrap();
//! assert!(validate_stock(-1).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest slide caption accepted (column is VARCHAR(255)).
pub const MAX_SLIDE_TEXT_LEN: usize = 255;

/// Longest manually entered asset reference.
pub const MAX_REFERENCE_LEN: usize = 5000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a carousel caption. Empty captions are allowed.
pub fn validate_slide_text(text: &str) -> ValidationResult<()> {
    if text.chars().count() > MAX_SLIDE_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "text".to_string(),
            max: MAX_SLIDE_TEXT_LEN,
        });
    }
    Ok(())
}

/// Validates a hex-like color: `#rgb` or `#rrggbb`.
///
/// ## Example
/// ```rust
/// use vitrina_core::validation::validate_color;
///
/// assert!(validate_color("color1", "#fff").is_ok());
/// assert!(validate_color("color1", "#12345z").is_err());
/// ```
pub fn validate_color(field: &str, color: &str) -> ValidationResult<()> {
    let hex = color.strip_prefix('#').ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must start with '#'".to_string(),
    })?;

    if !matches!(hex.len(), 3 | 6) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be #rgb or #rrggbb".to_string(),
        });
    }

    Ok(())
}

/// Validates a manually entered asset reference, if any.
pub fn validate_reference_literal(field: &str, literal: Option<&str>) -> ValidationResult<()> {
    match literal {
        Some(value) if value.chars().count() > MAX_REFERENCE_LEN => Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_REFERENCE_LEN,
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents. Zero is allowed.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a stock count. Stock is never negative.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a battery percentage (0-100).
pub fn validate_battery_percent(percent: i64) -> ValidationResult<()> {
    if !(0..=100).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "battery".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates a record identifier supplied by a client.
pub fn validate_identifier(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::OutOfRange {
            field: "id".to_string(),
            min: 1,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
