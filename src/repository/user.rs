use crate::domain::user::{Credentials, User};
use crate::repository::{
    KeyValueStore, PASSWORDS_KEY, RepositoryResult, SESSION_KEY, USERS_KEY, UserReader,
    UserWriter, load_json, save_json,
};

impl<S: KeyValueStore> UserReader for S {
    fn load_users(&self) -> RepositoryResult<Option<Vec<User>>> {
        load_json(self, USERS_KEY)
    }

    fn load_credentials(&self) -> RepositoryResult<Option<Credentials>> {
        load_json(self, PASSWORDS_KEY)
    }

    fn load_session(&self) -> RepositoryResult<Option<User>> {
        load_json(self, SESSION_KEY)
    }
}

impl<S: KeyValueStore> UserWriter for S {
    fn save_users(&self, users: &[User]) -> RepositoryResult<()> {
        save_json(self, USERS_KEY, users)
    }

    fn save_credentials(&self, credentials: &Credentials) -> RepositoryResult<()> {
        save_json(self, PASSWORDS_KEY, credentials)
    }

    fn save_session(&self, user: Option<&User>) -> RepositoryResult<()> {
        match user {
            Some(user) => save_json(self, SESSION_KEY, user),
            None => self.remove(SESSION_KEY),
        }
    }
}
