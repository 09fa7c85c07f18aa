use crate::domain::user::User;
use crate::forms::auth::{LoginFormPayload, RegisterFormPayload, ResetPasswordFormPayload};
use crate::repository::StateRepository;
use crate::state::KnowledgeBase;

use super::{ServiceError, ServiceResult};

/// Signs the user in. Returns `false` for any credential mismatch without
/// revealing whether the username exists.
pub fn login<R>(payload: LoginFormPayload, kb: &mut KnowledgeBase<R>) -> ServiceResult<bool>
where
    R: StateRepository,
{
    if !kb
        .credentials()
        .verify(&payload.username, payload.password.as_str())
    {
        log::warn!("Rejected login for {}", payload.username);
        return Ok(false);
    }

    let Some(user) = kb
        .users()
        .iter()
        .find(|u| u.username.as_str() == payload.username)
        .cloned()
    else {
        log::warn!("Credential for {} has no matching account", payload.username);
        return Ok(false);
    };

    match kb.commit_session(Some(user)) {
        Ok(()) => {
            log::info!("User {} signed in", payload.username);
            Ok(true)
        }
        Err(e) => {
            log::error!("Failed to store session: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn logout<R>(kb: &mut KnowledgeBase<R>) -> ServiceResult<()>
where
    R: StateRepository,
{
    let Some(user) = kb.current_user().map(|u| u.username.clone()) else {
        return Ok(());
    };

    match kb.commit_session(None) {
        Ok(()) => {
            log::info!("User {user} signed out");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to clear session: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Creates a plain user account. Does not sign the new user in.
pub fn register<R>(payload: RegisterFormPayload, kb: &mut KnowledgeBase<R>) -> ServiceResult<User>
where
    R: StateRepository,
{
    if kb.users().iter().any(|u| u.username == payload.username)
        || kb.credentials().contains(&payload.username)
    {
        return Err(ServiceError::Conflict(
            "Username is already taken".to_string(),
        ));
    }
    if kb
        .users()
        .iter()
        .any(|u| u.email.matches(payload.email.as_str()))
    {
        return Err(ServiceError::Conflict(
            "Email is already registered".to_string(),
        ));
    }

    let (user, password) = payload.into_new_user().into_user();

    let mut users = kb.users().to_vec();
    users.push(user.clone());
    let mut credentials = kb.credentials().clone();
    credentials.set(user.username.clone(), password);

    match kb.commit_users(users, Some(credentials)) {
        Ok(()) => {
            log::info!("Registered user {}", user.username);
            Ok(user)
        }
        Err(e) => {
            log::error!("Failed to register user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Self-service reset request.
///
/// Only reports a temporary password derived from the user id; the stored
/// credential stays as it is.
pub fn request_password_reset<R>(
    payload: ResetPasswordFormPayload,
    kb: &KnowledgeBase<R>,
) -> ServiceResult<String>
where
    R: StateRepository,
{
    let Some(user) = kb
        .users()
        .iter()
        .find(|u| u.email.matches(payload.email.as_str()))
    else {
        return Err(ServiceError::NotFound);
    };

    log::info!("Password reset requested for {}", user.username);
    Ok(format!(
        "Your temporary password is {}",
        user.temporary_password()
    ))
}
