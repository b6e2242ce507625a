use super::{ValidationError, ValidationResult};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_CART_QUANTITY: u32 = 1000;
pub const MIN_CART_QUANTITY: u32 = 1;
pub const MAX_USER_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate cart item quantity
pub fn validate_cart_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity < MIN_CART_QUANTITY || quantity > MAX_CART_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_CART_QUANTITY.to_string(),
            max: MAX_CART_QUANTITY.to_string(),
            value: quantity.to_string(),
        });
    }

    Ok(())
}

/// Validate user display name
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "name".to_string(),
        });
    }

    if trimmed.len() > MAX_USER_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max_length: MAX_USER_NAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: name.to_string(),
            reason: "Contains control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate email address shape. Deliberately shallow: one '@' with non-empty
/// local and domain parts is enough for a simulated auth layer.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "email".to_string(),
        });
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max_length: MAX_EMAIL_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            expected: "local@domain".to_string(),
        }),
    }
}

/// Validate password length
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min_length: MIN_PASSWORD_LENGTH,
            actual_length: password.len(),
        });
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max_length: MAX_PASSWORD_LENGTH,
            actual_length: password.len(),
        });
    }

    Ok(())
}
