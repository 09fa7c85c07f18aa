use serde::Serialize;

use crate::domain::category::Category;

/// Flattened category row ready for a tree view or a picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub icon: &'static str,
    pub count: i32,
    pub parent_id: Option<String>,
    /// 0 for top-level categories, 1 for their children.
    pub depth: usize,
    pub expanded: bool,
}

impl CategoryDto {
    pub fn new(category: &Category, depth: usize, expanded: bool) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.to_string(),
            icon: category.icon.as_str(),
            count: category.count.get(),
            parent_id: category.parent_id.as_ref().map(ToString::to_string),
            depth,
            expanded,
        }
    }
}
