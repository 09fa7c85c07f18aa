//! Raw user input and its validated payloads.
//!
//! Every form derives [`validator::Validate`] and converts into a typed
//! payload through `TryFrom`, failing with the form's own error type.

/// Declares a form error enum with conversions from validation and type errors.
macro_rules! form_error {
    ($name:ident, $label:literal) => {
        #[derive(Debug, thiserror::Error)]
        pub enum $name {
            #[error("{label} form validation failed: {0}", label = $label)]
            Validation(String),
            #[error("{label} form contains invalid data: {0}", label = $label)]
            TypeConstraint(String),
        }

        impl From<validator::ValidationErrors> for $name {
            fn from(value: validator::ValidationErrors) -> Self {
                Self::Validation(value.to_string())
            }
        }

        impl From<$crate::domain::types::TypeConstraintError> for $name {
            fn from(value: $crate::domain::types::TypeConstraintError) -> Self {
                Self::TypeConstraint(value.to_string())
            }
        }
    };
}

pub mod articles;
pub mod auth;
pub mod categories;
pub mod users;

/// Treats blank optional input as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
