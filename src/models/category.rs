use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategoryTree, NewCategory};
use crate::domain::types::{
    ArticleCount, CategoryIcon, CategoryId, CategoryName, TypeConstraintError,
};

/// Persisted shape of a category: nested records, children inline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<StoredCategory>>,
}

impl StoredCategory {
    /// Builds the arena tree, rejecting records nested below the second level.
    pub fn into_tree(records: Vec<StoredCategory>) -> Result<CategoryTree, TypeConstraintError> {
        let mut tree = CategoryTree::new();
        for record in records {
            let children = record.subcategories.clone().unwrap_or_default();
            let parent_id = record.insert_into(&mut tree, None)?;

            for child in children {
                if child.subcategories.as_ref().is_some_and(|c| !c.is_empty()) {
                    return Err(TypeConstraintError::NestingTooDeep(child.id));
                }
                child.insert_into(&mut tree, Some(parent_id.clone()))?;
            }
        }
        Ok(tree)
    }

    /// Nested records in display order.
    pub fn from_tree(tree: &CategoryTree) -> Vec<StoredCategory> {
        tree.roots()
            .map(|root| {
                let children: Vec<StoredCategory> = tree
                    .children(&root.id)
                    .map(|child| StoredCategory::leaf(child))
                    .collect();
                let mut record = StoredCategory::leaf(root);
                if !children.is_empty() {
                    record.subcategories = Some(children);
                }
                record
            })
            .collect()
    }

    fn leaf(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.to_string(),
            icon: category.icon.to_string(),
            count: category.count.get(),
            subcategories: None,
        }
    }

    fn insert_into(
        self,
        tree: &mut CategoryTree,
        parent_id: Option<CategoryId>,
    ) -> Result<CategoryId, TypeConstraintError> {
        let id = CategoryId::new(self.id)?;
        let new = NewCategory {
            name: CategoryName::new(self.name)?,
            icon: CategoryIcon::try_from(self.icon)?,
            parent_id,
        };
        tree.insert_with(id.clone(), new, ArticleCount::new(self.count)?);
        Ok(id)
    }
}
