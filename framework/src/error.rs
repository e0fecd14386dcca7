//! Framework-wide error types
//!
//! A single error enum shared by the HTTP layer, the database layer and
//! application code. Every variant maps onto an HTTP status, so controller
//! handlers can propagate failures with `?` and still produce a sensible
//! response.

use thiserror::Error;

/// Framework-wide error type
///
/// `HttpResponse` implements `From<FrameworkError>`, which lets handlers
/// returning [`Response`](crate::Response) use the `?` operator directly:
///
/// ```rust,ignore
/// pub async fn show(req: Request) -> Response {
///     let id: i32 = req.param_as("id")?;   // 400 on a malformed id
///     let todos = req.state::<Todos>()?;   // 500 if the state was never mounted
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Typed state was requested but never mounted on the router
    #[error("State '{type_name}' not registered on the router")]
    StateNotFound {
        /// The type name of the missing state value
        type_name: &'static str,
    },

    /// A route parameter was missing from the matched path
    #[error("Missing required parameter: {param_name}")]
    ParamError {
        /// The name of the parameter that was missing
        param_name: String,
    },

    /// A route parameter could not be parsed into the expected type
    #[error("Invalid parameter '{param}': expected {expected_type}")]
    ParamParse {
        /// The raw parameter value
        param: String,
        /// The expected type (e.g. "i32")
        expected_type: &'static str,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// The request body exceeded the configured limit
    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Configured limit in bytes
        limit: usize,
    },

    /// Generic internal server error
    #[error("Internal server error: {message}")]
    Internal {
        /// The error message
        message: String,
    },

    /// Application error with a custom status code
    #[error("{message}")]
    Domain {
        /// The error message
        message: String,
        /// HTTP status code
        status_code: u16,
    },
}

impl FrameworkError {
    /// Create a StateNotFound error for a given type
    pub fn state_not_found<T: ?Sized>() -> Self {
        Self::StateNotFound {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a ParamError for a missing parameter
    pub fn param(name: impl Into<String>) -> Self {
        Self::ParamError {
            param_name: name.into(),
        }
    }

    /// Create a ParamParse error (400)
    pub fn param_parse(param: impl Into<String>, expected_type: &'static str) -> Self {
        Self::ParamParse {
            param: param.into(),
            expected_type,
        }
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a Domain error with custom status code
    pub fn domain(message: impl Into<String>, status_code: u16) -> Self {
        Self::Domain {
            message: message.into(),
            status_code,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::StateNotFound { .. } => 500,
            Self::ParamError { .. } => 400,
            Self::ParamParse { .. } => 400,
            Self::Database(_) => 500,
            Self::PayloadTooLarge { .. } => 413,
            Self::Internal { .. } => 500,
            Self::Domain { status_code, .. } => *status_code,
        }
    }
}

impl From<sea_orm::DbErr> for FrameworkError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(FrameworkError::param("id").status_code(), 400);
        assert_eq!(FrameworkError::param_parse("abc", "i32").status_code(), 400);
        assert_eq!(FrameworkError::database("down").status_code(), 500);
        assert_eq!(FrameworkError::internal("oops").status_code(), 500);
        assert_eq!(FrameworkError::domain("gone", 410).status_code(), 410);
        assert_eq!(
            FrameworkError::PayloadTooLarge { limit: 10 }.status_code(),
            413
        );
    }

    #[test]
    fn test_state_not_found_names_the_type() {
        let err = FrameworkError::state_not_found::<String>();
        assert!(err.to_string().contains("alloc::string::String"));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_db_err_converts_to_database_error() {
        let err: FrameworkError = sea_orm::DbErr::Custom("connection refused".into()).into();
        assert!(matches!(err, FrameworkError::Database(ref msg) if msg.contains("connection refused")));
    }
}
