//! Error conversion glue between the form, domain and service layers.
//!
//! The domain layer must not depend on service error types, so the
//! conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::articles::{
    AddArticleFormError, DeleteArticleFormError, SearchArticlesFormError, UpdateArticleFormError,
};
use crate::forms::auth::{LoginFormError, RegisterFormError, ResetPasswordFormError};
use crate::forms::categories::{
    AddCategoryFormError, DeleteCategoryFormError, ReorderCategoriesFormError,
    UpdateCategoryFormError,
};
use crate::forms::users::{
    AddUserFormError, DeleteUserFormError, EditUserFormError, ResetUserPasswordFormError,
};
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

macro_rules! form_error_into_service_error {
    ($($error:ty),+ $(,)?) => {
        $(
            impl From<$error> for ServiceError {
                fn from(val: $error) -> Self {
                    ServiceError::Form(val.to_string())
                }
            }
        )+
    };
}

form_error_into_service_error!(
    LoginFormError,
    RegisterFormError,
    ResetPasswordFormError,
    AddUserFormError,
    EditUserFormError,
    DeleteUserFormError,
    ResetUserPasswordFormError,
    AddCategoryFormError,
    UpdateCategoryFormError,
    DeleteCategoryFormError,
    ReorderCategoriesFormError,
    AddArticleFormError,
    UpdateArticleFormError,
    DeleteArticleFormError,
    SearchArticlesFormError,
);
