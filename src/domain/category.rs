//! Two-level category tree.
//!
//! Nodes are owned by an id-keyed arena. Top-level order is kept in a
//! separate id list and every node keeps the ordered ids of its children,
//! so edits and removals never rebuild nested structures.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::types::{ArticleCount, CategoryIcon, CategoryId, CategoryName};

/// Single category as seen by callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub icon: CategoryIcon,
    /// Display hint, never recomputed from actual articles.
    pub count: ArticleCount,
    /// Set for second-level categories only.
    pub parent_id: Option<CategoryId>,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub icon: CategoryIcon,
    pub parent_id: Option<CategoryId>,
}

/// Replacement values for an existing category. `count` is kept when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name: CategoryName,
    pub icon: CategoryIcon,
    pub count: Option<ArticleCount>,
}

#[derive(Debug, Clone)]
struct CategoryNode {
    category: Category,
    children: Vec<CategoryId>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    nodes: HashMap<CategoryId, CategoryNode>,
    roots: Vec<CategoryId>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.nodes.get(id).map(|node| &node.category)
    }

    /// Top-level categories in display order.
    pub fn roots(&self) -> impl Iterator<Item = &Category> + '_ {
        self.roots.iter().filter_map(|id| self.get(id))
    }

    /// Children of `id` in display order; empty for leaves and unknown ids.
    pub fn children(&self, id: &CategoryId) -> impl Iterator<Item = &Category> + '_ {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.get(child))
    }

    /// Whether any category in the tree carries `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.nodes
            .values()
            .any(|node| node.category.name.as_str() == name)
    }

    /// Inserts a category under a freshly generated id.
    pub fn insert(&mut self, new: NewCategory) -> Category {
        self.insert_with(CategoryId::generate(), new, ArticleCount::default())
    }

    /// Inserts a category with a caller-chosen id and count.
    ///
    /// A parent that is missing or is itself a child is ignored and the
    /// category lands at the top level. An existing node with the same id is
    /// replaced.
    pub fn insert_with(
        &mut self,
        id: CategoryId,
        new: NewCategory,
        count: ArticleCount,
    ) -> Category {
        if self.nodes.contains_key(&id) {
            self.remove(&id);
        }

        let parent_id = new.parent_id.filter(|parent| {
            self.nodes
                .get(parent)
                .is_some_and(|node| node.category.parent_id.is_none())
        });

        let category = Category {
            id: id.clone(),
            name: new.name,
            icon: new.icon,
            count,
            parent_id: parent_id.clone(),
        };

        let parent_node = match &parent_id {
            Some(parent) => self.nodes.get_mut(parent),
            None => None,
        };
        match parent_node {
            Some(parent) => parent.children.push(id.clone()),
            None => self.roots.push(id.clone()),
        }

        self.nodes.insert(
            id,
            CategoryNode {
                category: category.clone(),
                children: Vec::new(),
            },
        );
        category
    }

    /// Replaces name, icon and optionally count of the category in place.
    pub fn update(&mut self, id: &CategoryId, update: CategoryUpdate) -> Option<Category> {
        let node = self.nodes.get_mut(id)?;
        node.category.name = update.name;
        node.category.icon = update.icon;
        if let Some(count) = update.count {
            node.category.count = count;
        }
        Some(node.category.clone())
    }

    /// Removes the category and its children.
    ///
    /// Returns the removed categories, the requested one first. Empty when
    /// the id is unknown.
    pub fn remove(&mut self, id: &CategoryId) -> Vec<Category> {
        let Some(node) = self.nodes.remove(id) else {
            return Vec::new();
        };

        match &node.category.parent_id {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(parent) {
                    parent.children.retain(|child| child != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }

        let mut removed = vec![node.category];
        for child in node.children {
            if let Some(child) = self.nodes.remove(&child) {
                removed.push(child.category);
            }
        }
        removed
    }

    /// Moves the top-level category `dragged` to the index held by `target`.
    ///
    /// Only top-level siblings take part. Returns `false` and leaves the
    /// order untouched when either id is not top-level or both are equal.
    pub fn reorder(&mut self, dragged: &CategoryId, target: &CategoryId) -> bool {
        if dragged == target {
            return false;
        }
        let Some(from) = self.roots.iter().position(|id| id == dragged) else {
            return false;
        };
        let Some(to) = self.roots.iter().position(|id| id == target) else {
            return false;
        };

        let moved = self.roots.remove(from);
        self.roots.insert(to, moved);
        true
    }

    /// Pre-order walk: every top-level category followed by its children.
    /// The visitor receives the depth (0 or 1) of each category.
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(usize, &'a Category),
    {
        for root in &self.roots {
            let Some(node) = self.nodes.get(root) else {
                continue;
            };
            visit(0, &node.category);
            for child in &node.children {
                if let Some(child) = self.nodes.get(child) {
                    visit(1, &child.category);
                }
            }
        }
    }

    /// Flattened pre-order listing used for category pickers.
    pub fn flatten(&self) -> Vec<&Category> {
        let mut items = Vec::with_capacity(self.nodes.len());
        self.walk(|_, category| items.push(category));
        items
    }
}
