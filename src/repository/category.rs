use crate::domain::category::CategoryTree;
use crate::models::category::StoredCategory;
use crate::repository::{
    CATEGORIES_KEY, CategoryReader, CategoryWriter, KeyValueStore, RepositoryError,
    RepositoryResult, load_json, save_json,
};

impl<S: KeyValueStore> CategoryReader for S {
    fn load_categories(&self) -> RepositoryResult<Option<CategoryTree>> {
        let Some(records) = load_json::<_, Vec<StoredCategory>>(self, CATEGORIES_KEY)? else {
            return Ok(None);
        };
        let tree = StoredCategory::into_tree(records).map_err(|e| RepositoryError::Corrupt {
            key: CATEGORIES_KEY,
            message: e.to_string(),
        })?;
        Ok(Some(tree))
    }
}

impl<S: KeyValueStore> CategoryWriter for S {
    fn save_categories(&self, tree: &CategoryTree) -> RepositoryResult<()> {
        save_json(self, CATEGORIES_KEY, &StoredCategory::from_tree(tree))
    }
}
