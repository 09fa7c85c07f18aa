use crate::ADMIN_ROLE;
use crate::domain::user::User;
use crate::forms::users::{
    AddUserFormPayload, DeleteUserFormPayload, EditUserFormPayload, ResetUserPasswordFormPayload,
};
use crate::repository::StateRepository;
use crate::services::check_role;
use crate::state::KnowledgeBase;

use super::{ServiceError, ServiceResult};

pub fn list_users<R>(kb: &KnowledgeBase<R>) -> ServiceResult<Vec<User>>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    Ok(kb.users().to_vec())
}

pub fn add_user<R>(payload: AddUserFormPayload, kb: &mut KnowledgeBase<R>) -> ServiceResult<User>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let new_user = payload.new_user;
    if kb.users().iter().any(|u| u.username == new_user.username) {
        return Err(ServiceError::Conflict(
            "Username is already taken".to_string(),
        ));
    }

    let (user, password) = new_user.into_user();
    let mut users = kb.users().to_vec();
    users.push(user.clone());
    let mut credentials = kb.credentials().clone();
    credentials.set(user.username.clone(), password);

    match kb.commit_users(users, Some(credentials)) {
        Ok(()) => {
            log::info!("Added user {} with role {}", user.username, user.role);
            Ok(user)
        }
        Err(e) => {
            log::error!("Failed to add user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Updates name, email and role. The username is immutable.
pub fn update_user<R>(
    payload: EditUserFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<User>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let mut users = kb.users().to_vec();
    let Some(user) = users.iter_mut().find(|u| u.id == payload.user_id) else {
        return Err(ServiceError::NotFound);
    };
    if user.username != payload.username {
        return Err(ServiceError::Rule("Username cannot be changed".to_string()));
    }

    user.full_name = payload.update.full_name;
    user.email = payload.update.email;
    user.role = payload.update.role;
    let user = user.clone();

    match kb.commit_users(users, None) {
        Ok(()) => {
            log::info!("Updated user {}", user.username);
            Ok(user)
        }
        Err(e) => {
            log::error!("Failed to update user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Removes the account and its credential. The last remaining account
/// cannot be deleted. Deleting the signed-in account signs it out.
pub fn delete_user<R>(
    payload: DeleteUserFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<()>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    if kb.users().len() <= 1 {
        return Err(ServiceError::Rule(
            "Cannot delete the last remaining user".to_string(),
        ));
    }

    let mut users = kb.users().to_vec();
    let Some(index) = users.iter().position(|u| u.id == payload.user_id) else {
        return Err(ServiceError::NotFound);
    };
    let removed = users.remove(index);

    let mut credentials = kb.credentials().clone();
    credentials.remove(&removed.username);

    match kb.commit_users(users, Some(credentials)) {
        Ok(()) => {
            log::info!("Deleted user {}", removed.username);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn reset_user_password<R>(
    payload: ResetUserPasswordFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<()>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    if !kb.users().iter().any(|u| u.username == payload.username) {
        return Err(ServiceError::NotFound);
    }

    let mut credentials = kb.credentials().clone();
    credentials.set(payload.username.clone(), payload.password);

    match kb.commit_credentials(credentials) {
        Ok(()) => {
            log::info!("Password reset for {}", payload.username);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to reset password: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Email, FullName, Password, Role, UserId, Username};
    use crate::domain::user::{NewUser, UserUpdate};
    use crate::repository::{
        KeyValueStore, MemoryStore, PASSWORDS_KEY, SESSION_KEY, UserReader,
    };
    use crate::services::test_support::{FailingStore, knowledge_base, signed_in, signed_in_with};

    fn add_payload(username: &str, role: Role) -> AddUserFormPayload {
        AddUserFormPayload {
            new_user: NewUser {
                username: Username::new(username).unwrap(),
                password: Password::new("secret").unwrap(),
                role,
                full_name: FullName::new("Someone").unwrap(),
                email: Email::new(format!("{username}@example.com")).unwrap(),
            },
        }
    }

    fn delete_payload(id: &str) -> DeleteUserFormPayload {
        DeleteUserFormPayload {
            user_id: UserId::new(id).unwrap(),
        }
    }

    #[test]
    fn non_admin_is_refused() {
        let mut kb = signed_in(Role::User);

        assert_eq!(list_users(&kb).unwrap_err(), ServiceError::Unauthorized);
        assert_eq!(
            add_user(add_payload("x", Role::User), &mut kb).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            delete_user(delete_payload("1"), &mut kb).unwrap_err(),
            ServiceError::Unauthorized
        );

        let mut anonymous = knowledge_base();
        assert_eq!(
            list_users(&anonymous).unwrap_err(),
            ServiceError::Unauthorized
        );
        assert_eq!(
            delete_user(delete_payload("1"), &mut anonymous).unwrap_err(),
            ServiceError::Unauthorized
        );
    }

    #[test]
    fn add_user_stores_credential_with_chosen_role() {
        let mut kb = signed_in(Role::Admin);

        let user = add_user(add_payload("editor", Role::Admin), &mut kb).unwrap();

        assert_eq!(user.role, Role::Admin);
        assert!(kb.credentials().verify("editor", "secret"));
        assert_eq!(list_users(&kb).unwrap().len(), 3);
        assert!(matches!(
            add_user(add_payload("editor", Role::User), &mut kb),
            Err(ServiceError::Conflict(_))
        ));
    }

    #[test]
    fn update_user_refreshes_own_session() {
        let mut kb = signed_in(Role::Admin);
        let me = kb.current_user().unwrap().clone();

        let payload = EditUserFormPayload {
            user_id: me.id.clone(),
            username: me.username.clone(),
            update: UserUpdate {
                full_name: FullName::new("Chief").unwrap(),
                email: Email::new("chief@example.com").unwrap(),
                role: Role::Admin,
            },
        };
        update_user(payload, &mut kb).unwrap();

        assert_eq!(kb.current_user().unwrap().full_name, "Chief");
        assert_eq!(kb.users()[0].email, "chief@example.com");
    }

    #[test]
    fn update_user_rejects_rename_and_unknown_id() {
        let mut kb = signed_in(Role::Admin);
        let update = UserUpdate {
            full_name: FullName::new("Renamed").unwrap(),
            email: Email::new("user@example.com").unwrap(),
            role: Role::User,
        };

        let rename = EditUserFormPayload {
            user_id: UserId::new("2").unwrap(),
            username: Username::new("someone-else").unwrap(),
            update: update.clone(),
        };
        assert!(matches!(
            update_user(rename, &mut kb),
            Err(ServiceError::Rule(_))
        ));

        let unknown = EditUserFormPayload {
            user_id: UserId::new("404").unwrap(),
            username: Username::new("user").unwrap(),
            update,
        };
        assert_eq!(
            update_user(unknown, &mut kb).unwrap_err(),
            ServiceError::NotFound
        );
    }

    #[test]
    fn delete_user_removes_credential() {
        let mut kb = signed_in(Role::Admin);

        delete_user(delete_payload("2"), &mut kb).unwrap();

        assert_eq!(kb.users().len(), 1);
        assert!(!kb.credentials().verify("user", "user123"));
        assert_eq!(
            delete_user(delete_payload("404"), &mut kb).unwrap_err(),
            ServiceError::Rule("Cannot delete the last remaining user".to_string())
        );
    }

    #[test]
    fn last_user_cannot_be_deleted() {
        let mut kb = signed_in(Role::Admin);
        delete_user(delete_payload("2"), &mut kb).unwrap();

        let err = delete_user(delete_payload("1"), &mut kb).unwrap_err();

        assert!(matches!(err, ServiceError::Rule(_)));
        assert_eq!(kb.users().len(), 1);
        assert_eq!(kb.users()[0].username, "admin");
    }

    #[test]
    fn failed_password_write_rolls_back_new_user() {
        let store = FailingStore::default();
        let mut kb = signed_in_with(store.clone(), Role::Admin);
        store.fail_writes_to(PASSWORDS_KEY);

        let err = add_user(add_payload("ghost", Role::User), &mut kb).unwrap_err();

        assert_eq!(err, ServiceError::Internal);
        assert_eq!(kb.users().len(), 2);
        assert!(!kb.credentials().verify("ghost", "secret"));
        let stored = store.load_users().unwrap().unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|u| u.username != "ghost"));
    }

    #[test]
    fn failed_session_write_rolls_back_own_update() {
        let store = FailingStore::default();
        let mut kb = signed_in_with(store.clone(), Role::Admin);
        let me = kb.current_user().unwrap().clone();
        store.fail_writes_to(SESSION_KEY);

        let payload = EditUserFormPayload {
            user_id: me.id.clone(),
            username: me.username.clone(),
            update: UserUpdate {
                full_name: FullName::new("Chief").unwrap(),
                email: me.email.clone(),
                role: Role::Admin,
            },
        };
        let err = update_user(payload, &mut kb).unwrap_err();

        assert_eq!(err, ServiceError::Internal);
        assert_eq!(kb.current_user(), Some(&me));
        assert_eq!(kb.users()[0], me);
        assert_eq!(store.load_users().unwrap().unwrap()[0], me);
    }

    #[test]
    fn deleting_own_account_signs_out() {
        let store = MemoryStore::new();
        let mut kb = signed_in_with(store.clone(), Role::Admin);
        let admin = kb.users()[0].clone();
        add_user(add_payload("deputy", Role::Admin), &mut kb).unwrap();

        delete_user(delete_payload(admin.id.as_str()), &mut kb).unwrap();

        assert!(kb.current_user().is_none());
        assert!(store.get(SESSION_KEY).unwrap().is_none());
        assert_eq!(list_users(&kb).unwrap_err(), ServiceError::Unauthorized);
        assert!(kb.users().iter().all(|u| u.id != admin.id));
    }

    #[test]
    fn reset_user_password_overwrites_credential() {
        let mut kb = signed_in(Role::Admin);
        let payload = ResetUserPasswordFormPayload {
            username: Username::new("user").unwrap(),
            password: Password::new("brand-new").unwrap(),
        };

        reset_user_password(payload, &mut kb).unwrap();

        assert!(kb.credentials().verify("user", "brand-new"));
        assert!(!kb.credentials().verify("user", "user123"));

        let unknown = ResetUserPasswordFormPayload {
            username: Username::new("ghost").unwrap(),
            password: Password::new("whatever").unwrap(),
        };
        assert_eq!(
            reset_user_password(unknown, &mut kb).unwrap_err(),
            ServiceError::NotFound
        );
    }
}
