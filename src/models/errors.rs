use thiserror::Error;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Product not found: {id}")]
    ProductNotFound { id: u32 },

    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity { quantity: u32 },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("User already exists: {email}")]
    EmailAlreadyRegistered { email: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Item not found")]
    NotFound,

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Storage I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid field value: {field}={value}, reason={reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("Field too short: {field}, min_length={min_length}, actual_length={actual_length}")]
    TooShort {
        field: String,
        min_length: usize,
        actual_length: usize,
    },

    #[error("Invalid format: {field}, expected={expected}")]
    InvalidFormat { field: String, expected: String },

    #[error("Value out of range: {field}, min={min}, max={max}, value={value}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        value: String,
    },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::ValidationError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ServiceError::ProductNotFound { id: 42 };
        assert_eq!(error.to_string(), "Product not found: 42");

        let validation_error = ValidationError::RequiredField {
            field: "email".to_string(),
        };
        assert_eq!(
            validation_error.to_string(),
            "Required field missing: email"
        );
    }

    #[test]
    fn test_error_conversion() {
        let validation_error = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: "1".to_string(),
            max: "1000".to_string(),
            value: "0".to_string(),
        };

        let service_error: ServiceError = validation_error.into();
        match service_error {
            ServiceError::ValidationError { message } => {
                assert!(message.contains("Value out of range"));
            }
            _ => panic!("Expected ValidationError conversion"),
        }
    }

    #[test]
    fn test_repository_error_from_serde() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_error.is_err());

        let repo_error: RepositoryError = json_error.unwrap_err().into();
        match repo_error {
            RepositoryError::Serialization { .. } => {}
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_service_error_from_repository() {
        let repo_error = RepositoryError::NotFound;
        let service_error: ServiceError = repo_error.into();
        match service_error {
            ServiceError::Repository { .. } => {}
            _ => panic!("Expected Repository error"),
        }
    }
}
