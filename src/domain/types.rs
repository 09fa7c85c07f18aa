//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw strings so that
//! identifiers, names, credentials and media links are checked once at the
//! boundary. Deserialization goes through the same constructors, which lets
//! the state loader detect corrupt persisted records.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string was shorter than the required minimum.
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },
    /// A numeric value required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// Role name outside of the known set.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// Icon name outside of the known glyph set.
    #[error("unknown category icon: {0}")]
    UnknownIcon(String),
    /// A category record nested below the second level.
    #[error("category {0} is nested too deeply")]
    NestingTooDeep(String),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Shared conversions for the string-backed newtypes below.
macro_rules! string_wrapper_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

/// Macro to generate string identifiers. Seeded records use short numeric
/// ids, records created at runtime get a random UUID.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier, rejecting blank values.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Generates a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }
        }

        string_wrapper_impls!($name);
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }
        }

        string_wrapper_impls!($name);
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }

            /// Like [`Self::new`] but maps blank input to `None`.
            pub fn optional<S: Into<String>>(
                value: S,
            ) -> Result<Option<Self>, TypeConstraintError> {
                let value = value.into();
                if value.trim().is_empty() {
                    Ok(None)
                } else {
                    Self::new(value).map(Some)
                }
            }
        }

        string_wrapper_impls!($name);
    };
}

id_newtype!(UserId, "Unique identifier for a user.", "user id");
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category id"
);
id_newtype!(ArticleId, "Unique identifier for an article.", "article id");

non_empty_string_newtype!(
    Username,
    "Login name enforcing non-empty values.",
    "username"
);

impl std::borrow::Borrow<str> for Username {
    fn borrow(&self) -> &str {
        &self.0
    }
}
non_empty_string_newtype!(
    FullName,
    "Display name of a user enforcing non-empty values.",
    "full name"
);
non_empty_string_newtype!(
    CategoryName,
    "Category name enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    Question,
    "Question text of an article enforcing non-empty values.",
    "question"
);
non_empty_string_newtype!(
    Answer,
    "Answer text of an article enforcing non-empty values.",
    "answer"
);
non_empty_string_newtype!(Tag, "Free-text article tag.", "tag");

url_string_newtype!(MediaUrl, "Image or video embed URL.", "media url");

/// Email address, trimmed and syntactically validated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?;
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }

    /// Case-insensitive comparison used for uniqueness and lookups.
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

string_wrapper_impls!(Email);

/// Minimum length enforced when an administrator sets a new password.
pub const MIN_RESET_PASSWORD_LEN: usize = 6;

/// Plain-text password. Not trimmed, only required to be non-empty.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Password(String);

impl Password {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptyString("password"));
        }
        Ok(Self(value))
    }

    /// Constructs a password of at least `min` characters.
    pub fn with_min_len<S: Into<String>>(
        value: S,
        min: usize,
    ) -> Result<Self, TypeConstraintError> {
        let password = Self::new(value)?;
        if password.0.chars().count() < min {
            return Err(TypeConstraintError::TooShort {
                field: "password",
                min,
            });
        }
        Ok(password)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl TryFrom<String> for Password {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Password> for String {
    fn from(value: Password) -> Self {
        value.0
    }
}

/// Display hint for the number of articles in a category.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(try_from = "i32", into = "i32")]
pub struct ArticleCount(i32);

impl ArticleCount {
    /// Constructs a value that must be zero or greater.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value >= 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NegativeNumber("article count"))
        }
    }

    /// Returns the raw `i32` value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ArticleCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ArticleCount {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ArticleCount> for i32 {
    fn from(value: ArticleCount) -> Self {
        value.0
    }
}

/// Access tier of a user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// String representation used in persistence and forms.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(TypeConstraintError::UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Closed set of glyphs a category can be rendered with.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryIcon {
    #[default]
    Folder,
    BookOpen,
    Rocket,
    UserPlus,
    Footprints,
    Settings,
    Star,
    Zap,
    HelpCircle,
    AlertCircle,
    Wrench,
    Link,
    FileText,
    Lightbulb,
    Shield,
}

impl CategoryIcon {
    pub const ALL: [Self; 15] = [
        Self::Folder,
        Self::BookOpen,
        Self::Rocket,
        Self::UserPlus,
        Self::Footprints,
        Self::Settings,
        Self::Star,
        Self::Zap,
        Self::HelpCircle,
        Self::AlertCircle,
        Self::Wrench,
        Self::Link,
        Self::FileText,
        Self::Lightbulb,
        Self::Shield,
    ];

    /// Glyph name understood by the icon renderer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::BookOpen => "BookOpen",
            Self::Rocket => "Rocket",
            Self::UserPlus => "UserPlus",
            Self::Footprints => "Footprints",
            Self::Settings => "Settings",
            Self::Star => "Star",
            Self::Zap => "Zap",
            Self::HelpCircle => "HelpCircle",
            Self::AlertCircle => "AlertCircle",
            Self::Wrench => "Wrench",
            Self::Link => "Link",
            Self::FileText => "FileText",
            Self::Lightbulb => "Lightbulb",
            Self::Shield => "Shield",
        }
    }
}

impl Display for CategoryIcon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for CategoryIcon {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        // Older records carry the component name with an `Icon` suffix.
        let name = value.strip_suffix("Icon").unwrap_or(value);
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str() == name)
            .ok_or_else(|| TypeConstraintError::UnknownIcon(value.to_string()))
    }
}

impl TryFrom<String> for CategoryIcon {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<CategoryIcon> for String {
    fn from(value: CategoryIcon) -> Self {
        value.as_str().to_string()
    }
}
