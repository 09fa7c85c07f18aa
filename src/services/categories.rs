use crate::ADMIN_ROLE;
use crate::domain::category::Category;
use crate::domain::types::{CategoryId, CategoryName};
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{
    AddCategoryFormPayload, DeleteCategoryFormPayload, ReorderCategoriesFormPayload,
    UpdateCategoryFormPayload,
};
use crate::repository::StateRepository;
use crate::services::check_role;
use crate::state::KnowledgeBase;

use super::{ServiceError, ServiceResult};

/// Pre-order listing of the tree with depth and expanded state per row.
pub fn show_categories<R>(kb: &KnowledgeBase<R>) -> Vec<CategoryDto>
where
    R: StateRepository,
{
    let mut items = Vec::with_capacity(kb.categories().len());
    kb.categories().walk(|depth, category| {
        items.push(CategoryDto::new(category, depth, kb.is_expanded(&category.id)));
    });
    items
}

pub fn add_category<R>(
    payload: AddCategoryFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<Category>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let mut tree = kb.categories().clone();
    let category = tree.insert(payload.new_category);

    match kb.commit_categories(tree) {
        Ok(()) => {
            log::info!("Added category {}", category.name);
            Ok(category)
        }
        Err(e) => {
            log::error!("Failed to add category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(
    payload: UpdateCategoryFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<Category>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let mut tree = kb.categories().clone();
    let Some(category) = tree.update(&payload.category_id, payload.update) else {
        return Err(ServiceError::NotFound);
    };

    match kb.commit_categories(tree) {
        Ok(()) => {
            log::info!("Updated category {}", category.id);
            Ok(category)
        }
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes the category with its children and returns how many were removed.
/// Articles keep their category label.
pub fn delete_category<R>(
    payload: DeleteCategoryFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<usize>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let mut tree = kb.categories().clone();
    let removed = tree.remove(&payload.category_id);
    if removed.is_empty() {
        return Err(ServiceError::NotFound);
    }

    if let Err(e) = kb.commit_categories(tree) {
        log::error!("Failed to delete category: {e}");
        return Err(ServiceError::Internal);
    }
    kb.forget_categories(&removed);

    log::info!(
        "Deleted category {} with {} subcategories",
        payload.category_id,
        removed.len() - 1
    );
    Ok(removed.len())
}

/// Moves a top-level category onto the slot of another. Returns `false`
/// when nothing moved.
pub fn reorder_categories<R>(
    payload: ReorderCategoriesFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<bool>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let mut tree = kb.categories().clone();
    if !tree.reorder(&payload.dragged_id, &payload.target_id) {
        return Ok(false);
    }

    match kb.commit_categories(tree) {
        Ok(()) => Ok(true),
        Err(e) => {
            log::error!("Failed to reorder categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Flips the expanded state of a category in the tree view.
pub fn toggle_category<R>(id: &CategoryId, kb: &mut KnowledgeBase<R>) -> ServiceResult<bool>
where
    R: StateRepository,
{
    if kb.categories().get(id).is_none() {
        return Err(ServiceError::NotFound);
    }
    Ok(kb.toggle_expanded(id))
}

/// Sets or clears the category filter applied by
/// [`visible_articles`](crate::services::articles::visible_articles).
pub fn select_category<R>(category: Option<CategoryName>, kb: &mut KnowledgeBase<R>)
where
    R: StateRepository,
{
    kb.set_category_filter(category);
}
