//! Operations exposed to the presentation layer.
//!
//! Each function takes a validated form payload and the application state,
//! checks the acting session where the operation is admin-only and writes the
//! result through to storage.

use crate::domain::types::Role;
use crate::domain::user::User;

pub mod articles;
pub mod auth;
pub mod categories;
pub mod errors;
pub mod users;

pub use errors::{ServiceError, ServiceResult};

/// Whether the session user holds `role`. No session never matches.
pub fn check_role(role: Role, user: Option<&User>) -> bool {
    user.is_some_and(|user| user.role == role)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::domain::types::Role;
    use crate::repository::{
        KeyValueStore, MemoryStore, RepositoryError, RepositoryResult, StateRepository,
    };
    use crate::state::KnowledgeBase;

    pub fn knowledge_base() -> KnowledgeBase<MemoryStore> {
        KnowledgeBase::initialize(MemoryStore::new()).unwrap()
    }

    /// Seeded state with the default account of `role` signed in.
    pub fn signed_in(role: Role) -> KnowledgeBase<MemoryStore> {
        signed_in_with(MemoryStore::new(), role)
    }

    pub fn signed_in_with<R: StateRepository>(repo: R, role: Role) -> KnowledgeBase<R> {
        let mut kb = KnowledgeBase::initialize(repo).unwrap();
        let user = kb
            .users()
            .iter()
            .find(|u| u.role == role)
            .cloned()
            .unwrap();
        kb.commit_session(Some(user)).unwrap();
        kb
    }

    /// Memory store whose writes can be made to fail, for all keys or
    /// selected ones.
    #[derive(Clone, Default)]
    pub struct FailingStore {
        inner: MemoryStore,
        all: Rc<Cell<bool>>,
        keys: Rc<RefCell<Vec<&'static str>>>,
    }

    impl FailingStore {
        pub fn fail_all_writes(&self) {
            self.all.set(true);
        }

        pub fn fail_writes_to(&self, key: &'static str) {
            self.keys.borrow_mut().push(key);
        }

        fn fails(&self, key: &str) -> bool {
            self.all.get() || self.keys.borrow().iter().any(|k| *k == key)
        }
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> RepositoryResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> RepositoryResult<()> {
            if self.fails(key) {
                return Err(RepositoryError::Unavailable(format!("cannot write {key}")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> RepositoryResult<()> {
            if self.fails(key) {
                return Err(RepositoryError::Unavailable(format!("cannot remove {key}")));
            }
            self.inner.remove(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Email, FullName, UserId, Username};

    #[test]
    fn check_role_requires_session() {
        let admin = User {
            id: UserId::new("1").unwrap(),
            username: Username::new("admin").unwrap(),
            role: Role::Admin,
            full_name: FullName::new("Administrator").unwrap(),
            email: Email::new("admin@example.com").unwrap(),
        };

        assert!(check_role(Role::Admin, Some(&admin)));
        assert!(!check_role(Role::User, Some(&admin)));
        assert!(!check_role(Role::Admin, None));
    }
}
