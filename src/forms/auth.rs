use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Email, FullName, Password, Role, Username};
use crate::domain::user::NewUser;

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFormPayload {
    /// Matched against stored usernames exactly, surrounding whitespace included.
    pub username: String,
    pub password: Password,
}

form_error!(LoginFormError, "Login");

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = LoginFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            username: value.username,
            password: Password::new(value.password)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterFormPayload {
    pub username: Username,
    pub password: Password,
    pub full_name: FullName,
    pub email: Email,
}

impl RegisterFormPayload {
    /// Self-registered accounts always get the plain user role.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            password: self.password,
            role: Role::User,
            full_name: self.full_name,
            email: self.email,
        }
    }
}

form_error!(RegisterFormError, "Register");

impl TryFrom<RegisterForm> for RegisterFormPayload {
    type Error = RegisterFormError;

    fn try_from(value: RegisterForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            username: Username::new(value.username)?,
            password: Password::new(value.password)?,
            full_name: FullName::new(value.full_name)?,
            email: Email::new(value.email)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct ResetPasswordForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResetPasswordFormPayload {
    pub email: Email,
}

form_error!(ResetPasswordFormError, "Reset password");

impl TryFrom<ResetPasswordForm> for ResetPasswordFormPayload {
    type Error = ResetPasswordFormError;

    fn try_from(value: ResetPasswordForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            email: Email::new(value.email)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            username: "admin".to_string(),
            password: String::new(),
        };
        let payload: Result<LoginFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(LoginFormError::Validation(_))));
    }

    #[test]
    fn login_keeps_username_as_entered() {
        let form = LoginForm {
            username: "admin ".to_string(),
            password: "admin123".to_string(),
        };
        let payload: LoginFormPayload = form.try_into().unwrap();
        assert_eq!(payload.username, "admin ");
    }

    #[test]
    fn register_forces_user_role() {
        let form = RegisterForm {
            username: " newbie ".to_string(),
            password: "secret".to_string(),
            full_name: "New User".to_string(),
            email: "newbie@example.com".to_string(),
        };
        let payload: RegisterFormPayload = form.try_into().unwrap();
        let new_user = payload.into_new_user();

        assert_eq!(new_user.username, "newbie");
        assert_eq!(new_user.role, Role::User);
    }

    #[test]
    fn register_rejects_malformed_email() {
        let form = RegisterForm {
            username: "newbie".to_string(),
            password: "secret".to_string(),
            full_name: "New User".to_string(),
            email: "not-an-email".to_string(),
        };
        let payload: Result<RegisterFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn blank_full_name_is_a_type_error() {
        let form = RegisterForm {
            username: "newbie".to_string(),
            password: "secret".to_string(),
            full_name: "   ".to_string(),
            email: "newbie@example.com".to_string(),
        };
        let payload: Result<RegisterFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(RegisterFormError::TypeConstraint(_))));
    }
}
