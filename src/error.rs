use crate::utils::intern::Symbol;
use thiserror::Error;

/// Every failure the crate can report.
///
/// Errors raised by a wrapped target travel through [`crate::Curry`]
/// untouched, so a caller matching on `Raised` sees exactly what the target
/// returned.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CurryError {
    #[error("too many positional arguments: expected at most {max}, got {given}")]
    TooManyPositional { max: usize, given: usize },
    #[error("got an unexpected keyword argument '{0}'")]
    UnexpectedKeyword(Symbol),
    #[error("multiple values for argument '{0}'")]
    MultipleValues(Symbol),
    #[error("'{0}' parameter is positional only, but was passed as a keyword")]
    PositionalOnlyKeyword(Symbol),
    #[error("missing a required argument: '{0}'")]
    MissingArgument(Symbol),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("'{0}' object is not callable")]
    NotCallable(String),
    #[error("'{class}' object has no attribute '{name}'")]
    NoAttribute { class: Symbol, name: Symbol },
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0}")]
    Raised(String),
}

impl CurryError {
    /// Builds the error a target body returns to signal failure.
    pub fn raise<S: Into<String>>(msg: S) -> CurryError {
        CurryError::Raised(msg.into())
    }
}

#[test]
fn error_message_test() {
    let err = CurryError::NoAttribute {
        class: Symbol::new("Point"),
        name: Symbol::new("z"),
    };
    assert_eq!(err.to_string(), "'Point' object has no attribute 'z'");
    assert_eq!(
        CurryError::raise("division by zero").to_string(),
        "division by zero"
    );
}
