use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{
    Email, FullName, MIN_RESET_PASSWORD_LEN, Password, Role, UserId, Username,
};
use crate::domain::user::{NewUser, UserUpdate};

#[derive(Deserialize, Validate)]
pub struct AddUserForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddUserFormPayload {
    pub new_user: NewUser,
}

form_error!(AddUserFormError, "Add user");

impl TryFrom<AddUserForm> for AddUserFormPayload {
    type Error = AddUserFormError;

    fn try_from(value: AddUserForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            new_user: NewUser {
                username: Username::new(value.username)?,
                password: Password::new(value.password)?,
                role: Role::try_from(value.role)?,
                full_name: FullName::new(value.full_name)?,
                email: Email::new(value.email)?,
            },
        })
    }
}

/// Username is carried along only to detect rename attempts.
#[derive(Deserialize, Validate)]
pub struct EditUserForm {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditUserFormPayload {
    pub user_id: UserId,
    pub username: Username,
    pub update: UserUpdate,
}

form_error!(EditUserFormError, "Edit user");

impl TryFrom<EditUserForm> for EditUserFormPayload {
    type Error = EditUserFormError;

    fn try_from(value: EditUserForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            user_id: UserId::new(value.user_id)?,
            username: Username::new(value.username)?,
            update: UserUpdate {
                full_name: FullName::new(value.full_name)?,
                email: Email::new(value.email)?,
                role: Role::try_from(value.role)?,
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteUserForm {
    #[validate(length(min = 1))]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteUserFormPayload {
    pub user_id: UserId,
}

form_error!(DeleteUserFormError, "Delete user");

impl TryFrom<DeleteUserForm> for DeleteUserFormPayload {
    type Error = DeleteUserFormError;

    fn try_from(value: DeleteUserForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            user_id: UserId::new(value.user_id)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct ResetUserPasswordForm {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResetUserPasswordFormPayload {
    pub username: Username,
    pub password: Password,
}

form_error!(ResetUserPasswordFormError, "Reset user password");

impl TryFrom<ResetUserPasswordForm> for ResetUserPasswordFormPayload {
    type Error = ResetUserPasswordFormError;

    fn try_from(value: ResetUserPasswordForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            username: Username::new(value.username)?,
            password: Password::with_min_len(value.password, MIN_RESET_PASSWORD_LEN)?,
        })
    }
}
