use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, FullName, Password, Role, UserId, Username};

/// Account record. The password lives in [`Credentials`], keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub role: Role,
    pub full_name: FullName,
    pub email: Email,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Placeholder password reported by the self-service reset flow.
    ///
    /// Derived from the id only; the stored credential is not changed.
    pub fn temporary_password(&self) -> String {
        let id = self.id.as_str();
        let tail: String = id
            .chars()
            .rev()
            .take(6)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("temp{tail}")
    }
}

/// Data required to create a [`User`] together with its credential entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub password: Password,
    pub role: Role,
    pub full_name: FullName,
    pub email: Email,
}

impl NewUser {
    /// Splits the request into the user record (with a fresh id) and its password.
    pub fn into_user(self) -> (User, Password) {
        let user = User {
            id: UserId::generate(),
            username: self.username,
            role: self.role,
            full_name: self.full_name,
            email: self.email,
        };
        (user, self.password)
    }
}

/// Fields an administrator may change on an existing user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub full_name: FullName,
    pub email: Email,
    pub role: Role,
}

/// Username to plain-text password mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Credentials(BTreeMap<Username, Password>);

impl Credentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain equality against the stored password.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.0
            .get(username)
            .is_some_and(|stored| stored.as_str() == password)
    }

    /// Inserts or overwrites the entry for `username`.
    pub fn set(&mut self, username: Username, password: Password) {
        self.0.insert(username, password);
    }

    pub fn remove(&mut self, username: &Username) -> Option<Password> {
        self.0.remove(username)
    }

    pub fn contains(&self, username: &Username) -> bool {
        self.0.contains_key(username)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Username, Password)> for Credentials {
    fn from_iter<T: IntoIterator<Item = (Username, Password)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
