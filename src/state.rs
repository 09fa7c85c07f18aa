//! Application state shared by all service functions.
//!
//! [`KnowledgeBase`] owns the in-memory copy of every collection plus the
//! session and view state. Mutations go through the `commit_*` methods which
//! write the new value to the store before replacing the in-memory copy.

use std::collections::HashSet;

use thiserror::Error;

use crate::domain::article::Article;
use crate::domain::category::{Category, CategoryTree};
use crate::domain::types::{CategoryId, CategoryName, TypeConstraintError};
use crate::domain::user::{Credentials, User};
use crate::repository::{RepositoryError, RepositoryResult, StateRepository};
use crate::seed;

#[derive(Debug, Error)]
pub enum StateError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("invalid seed data: {0}")]
    Seed(#[from] TypeConstraintError),
}

/// Options applied when the state is first loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitOptions {
    /// Seed the sample categories and articles when none are stored.
    pub seed_catalogue: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            seed_catalogue: true,
        }
    }
}

pub struct KnowledgeBase<R> {
    repo: R,
    users: Vec<User>,
    credentials: Credentials,
    session: Option<User>,
    categories: CategoryTree,
    articles: Vec<Article>,
    expanded: HashSet<CategoryId>,
    category_filter: Option<CategoryName>,
}

impl<R: StateRepository> KnowledgeBase<R> {
    /// Loads the state from `repo`, seeding defaults where nothing is stored.
    pub fn initialize(repo: R) -> Result<Self, StateError> {
        Self::initialize_with(repo, InitOptions::default())
    }

    pub fn initialize_with(repo: R, options: InitOptions) -> Result<Self, StateError> {
        let (users, credentials) = load_users(&repo)?;
        let session = load_session(&repo, &users)?;
        let categories = load_categories(&repo, options)?;
        let articles = load_articles(&repo, options)?;

        let expanded = categories.roots().take(1).map(|c| c.id.clone()).collect();

        log::info!(
            "Knowledge base loaded: {} users, {} categories, {} articles",
            users.len(),
            categories.len(),
            articles.len()
        );

        Ok(Self {
            repo,
            users,
            credentials,
            session,
            categories,
            articles,
            expanded,
            category_filter: None,
        })
    }

    /// Ends the lifecycle and hands the store back. Nothing is buffered, so
    /// there is nothing left to flush.
    pub fn shutdown(self) -> R {
        log::debug!("Knowledge base shut down");
        self.repo
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn category_filter(&self) -> Option<&CategoryName> {
        self.category_filter.as_ref()
    }

    pub fn is_expanded(&self, id: &CategoryId) -> bool {
        self.expanded.contains(id)
    }

    pub(crate) fn set_category_filter(&mut self, category: Option<CategoryName>) {
        self.category_filter = category;
    }

    /// Flips the expanded state of `id` and returns the new state.
    pub(crate) fn toggle_expanded(&mut self, id: &CategoryId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Replaces the user collection, optionally with new credentials.
    ///
    /// The session follows the new collection by id: it is refreshed when the
    /// signed-in user changed and cleared when that user is gone. Every
    /// document is written before memory changes; when a later write fails
    /// the documents already written are restored.
    pub(crate) fn commit_users(
        &mut self,
        users: Vec<User>,
        credentials: Option<Credentials>,
    ) -> RepositoryResult<()> {
        let session = self
            .session
            .as_ref()
            .and_then(|current| users.iter().find(|u| u.id == current.id).cloned());

        self.repo.save_users(&users)?;

        if let Some(credentials) = &credentials {
            if let Err(e) = self.repo.save_credentials(credentials) {
                self.restore_stored_accounts(false);
                return Err(e);
            }
        }

        if session != self.session {
            if let Err(e) = self.repo.save_session(session.as_ref()) {
                self.restore_stored_accounts(credentials.is_some());
                return Err(e);
            }
        }

        self.users = users;
        if let Some(credentials) = credentials {
            self.credentials = credentials;
        }
        self.session = session;
        Ok(())
    }

    /// Writes the in-memory accounts back after a partially failed commit.
    fn restore_stored_accounts(&self, credentials_written: bool) {
        if let Err(e) = self.repo.save_users(&self.users) {
            log::error!("Failed to restore stored users: {e}");
        }
        if credentials_written {
            if let Err(e) = self.repo.save_credentials(&self.credentials) {
                log::error!("Failed to restore stored credentials: {e}");
            }
        }
    }

    pub(crate) fn commit_credentials(&mut self, credentials: Credentials) -> RepositoryResult<()> {
        self.repo.save_credentials(&credentials)?;
        self.credentials = credentials;
        Ok(())
    }

    pub(crate) fn commit_session(&mut self, user: Option<User>) -> RepositoryResult<()> {
        self.repo.save_session(user.as_ref())?;
        self.session = user;
        Ok(())
    }

    pub(crate) fn commit_categories(&mut self, categories: CategoryTree) -> RepositoryResult<()> {
        self.repo.save_categories(&categories)?;
        self.categories = categories;
        Ok(())
    }

    pub(crate) fn commit_articles(&mut self, articles: Vec<Article>) -> RepositoryResult<()> {
        self.repo.save_articles(&articles)?;
        self.articles = articles;
        Ok(())
    }

    /// Drops view state that referred to removed categories.
    pub(crate) fn forget_categories(&mut self, removed: &[Category]) {
        for category in removed {
            self.expanded.remove(&category.id);
            if self.category_filter.as_ref() == Some(&category.name) {
                self.category_filter = None;
            }
        }
    }
}

fn load_users<R: StateRepository>(repo: &R) -> Result<(Vec<User>, Credentials), StateError> {
    let stored = match (repo.load_users(), repo.load_credentials()) {
        (Ok(Some(users)), Ok(credentials)) if !users.is_empty() => {
            Some((users, credentials.unwrap_or_default()))
        }
        (Ok(_), Ok(_)) => None,
        (Err(e), _) | (_, Err(e)) if e.is_corrupt() => {
            log::warn!("Stored accounts are unreadable, restoring defaults: {e}");
            None
        }
        (Err(e), _) | (_, Err(e)) => return Err(e.into()),
    };

    if let Some(stored) = stored {
        return Ok(stored);
    }

    let (users, credentials) = seed::default_users()?;
    repo.save_users(&users)?;
    repo.save_credentials(&credentials)?;
    log::info!("Seeded {} default accounts", users.len());
    Ok((users, credentials))
}

/// Restores the stored session, refreshed from the user collection by id.
fn load_session<R: StateRepository>(
    repo: &R,
    users: &[User],
) -> Result<Option<User>, StateError> {
    let stored = match repo.load_session() {
        Ok(stored) => stored,
        Err(e) if e.is_corrupt() => {
            log::warn!("Stored session is unreadable, signing out: {e}");
            repo.save_session(None)?;
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let Some(stored) = stored else {
        return Ok(None);
    };

    match users.iter().find(|u| u.id == stored.id) {
        Some(user) => {
            if *user != stored {
                repo.save_session(Some(user))?;
            }
            Ok(Some(user.clone()))
        }
        None => {
            log::warn!("Session user {} no longer exists, signing out", stored.username);
            repo.save_session(None)?;
            Ok(None)
        }
    }
}

fn load_categories<R: StateRepository>(
    repo: &R,
    options: InitOptions,
) -> Result<CategoryTree, StateError> {
    match repo.load_categories() {
        Ok(Some(tree)) => return Ok(tree),
        Ok(None) => {}
        Err(e) if e.is_corrupt() => {
            log::warn!("Stored categories are unreadable, restoring defaults: {e}");
        }
        Err(e) => return Err(e.into()),
    }

    let tree = if options.seed_catalogue {
        seed::default_categories()?
    } else {
        CategoryTree::new()
    };
    repo.save_categories(&tree)?;
    Ok(tree)
}

fn load_articles<R: StateRepository>(
    repo: &R,
    options: InitOptions,
) -> Result<Vec<Article>, StateError> {
    match repo.load_articles() {
        Ok(Some(articles)) => return Ok(articles),
        Ok(None) => {}
        Err(e) if e.is_corrupt() => {
            log::warn!("Stored articles are unreadable, restoring defaults: {e}");
        }
        Err(e) => return Err(e.into()),
    }

    let articles = if options.seed_catalogue {
        seed::default_articles()?
    } else {
        Vec::new()
    };
    repo.save_articles(&articles)?;
    Ok(articles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        ARTICLES_KEY, CATEGORIES_KEY, KeyValueStore, MemoryStore, PASSWORDS_KEY, SESSION_KEY,
        USERS_KEY, UserReader,
    };

    #[test]
    fn seeds_defaults_on_empty_store() {
        let store = MemoryStore::new();
        let kb = KnowledgeBase::initialize(store.clone()).unwrap();

        assert_eq!(kb.users().len(), 2);
        assert!(kb.credentials().verify("admin", "admin123"));
        assert!(kb.current_user().is_none());
        assert_eq!(kb.categories().roots().count(), 4);
        assert_eq!(kb.articles().len(), 6);
        assert!(store.get(USERS_KEY).unwrap().is_some());
        assert!(store.get(PASSWORDS_KEY).unwrap().is_some());
        assert!(store.get(CATEGORIES_KEY).unwrap().is_some());
        assert!(store.get(ARTICLES_KEY).unwrap().is_some());
    }

    #[test]
    fn first_category_starts_expanded() {
        let kb = KnowledgeBase::initialize(MemoryStore::new()).unwrap();
        let first = kb.categories().roots().next().unwrap().id.clone();
        assert!(kb.is_expanded(&first));
    }

    #[test]
    fn initialize_never_overwrites_existing_users() {
        let store = MemoryStore::new();
        let mut kb = KnowledgeBase::initialize(store.clone()).unwrap();
        let users = kb.users()[..1].to_vec();
        kb.commit_users(users, None).unwrap();
        drop(kb.shutdown());

        let kb = KnowledgeBase::initialize(store).unwrap();
        assert_eq!(kb.users().len(), 1);
        assert_eq!(kb.users()[0].username, "admin");
    }

    #[test]
    fn catalogue_seed_can_be_disabled() {
        let kb = KnowledgeBase::initialize_with(
            MemoryStore::new(),
            InitOptions {
                seed_catalogue: false,
            },
        )
        .unwrap();

        assert!(kb.categories().is_empty());
        assert!(kb.articles().is_empty());
        assert_eq!(kb.users().len(), 2);
    }

    #[test]
    fn corrupt_users_are_reseeded() {
        let store = MemoryStore::new();
        store.set(USERS_KEY, "definitely not json").unwrap();
        store.set(PASSWORDS_KEY, r#"{"ghost":"boo"}"#).unwrap();

        let kb = KnowledgeBase::initialize(store.clone()).unwrap();

        assert_eq!(kb.users().len(), 2);
        assert!(!kb.credentials().verify("ghost", "boo"));
        assert_eq!(store.load_users().unwrap().unwrap().len(), 2);
    }

    #[test]
    fn corrupt_catalogue_is_reseeded() {
        let store = MemoryStore::new();
        store.set(CATEGORIES_KEY, "[{]").unwrap();
        store.set(ARTICLES_KEY, r#"[{"id":"1"}]"#).unwrap();

        let kb = KnowledgeBase::initialize(store).unwrap();
        assert_eq!(kb.categories().len(), 10);
        assert_eq!(kb.articles().len(), 6);
    }

    #[test]
    fn session_is_rehydrated_from_user_collection() {
        let store = MemoryStore::new();
        let mut kb = KnowledgeBase::initialize(store.clone()).unwrap();
        let admin = kb.users()[0].clone();
        kb.commit_session(Some(admin.clone())).unwrap();
        drop(kb.shutdown());

        let kb = KnowledgeBase::initialize(store.clone()).unwrap();
        assert_eq!(kb.current_user(), Some(&admin));

        store
            .set(
                SESSION_KEY,
                r#"{"id":"999","username":"gone","role":"admin","fullName":"Gone","email":"gone@example.com"}"#,
            )
            .unwrap();
        let kb = KnowledgeBase::initialize(store.clone()).unwrap();
        assert!(kb.current_user().is_none());
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn commit_users_drops_session_of_removed_user() {
        let store = MemoryStore::new();
        let mut kb = KnowledgeBase::initialize(store.clone()).unwrap();
        let admin = kb.users()[0].clone();
        kb.commit_session(Some(admin)).unwrap();

        let remaining = kb.users()[1..].to_vec();
        kb.commit_users(remaining, None).unwrap();

        assert!(kb.current_user().is_none());
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }

    #[test]
    fn forget_categories_clears_matching_filter() {
        let mut kb = KnowledgeBase::initialize(MemoryStore::new()).unwrap();
        let first = kb.categories().roots().next().unwrap().clone();
        kb.set_category_filter(Some(first.name.clone()));

        kb.forget_categories(std::slice::from_ref(&first));

        assert!(kb.category_filter().is_none());
        assert!(!kb.is_expanded(&first.id));
    }
}
