use serde::Deserialize;
use validator::Validate;

use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{
    ArticleCount, CategoryIcon, CategoryId, CategoryName, TypeConstraintError,
};
use crate::forms::non_blank;

/// Blank input selects the default icon.
fn parse_icon(value: Option<String>) -> Result<CategoryIcon, TypeConstraintError> {
    match non_blank(value) {
        Some(icon) => CategoryIcon::try_from(icon),
        None => Ok(CategoryIcon::default()),
    }
}

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub new_category: NewCategory,
}

form_error!(AddCategoryFormError, "Add category");

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            new_category: NewCategory {
                name: CategoryName::new(value.name)?,
                icon: parse_icon(value.icon)?,
                parent_id: non_blank(value.parent_id).map(CategoryId::new).transpose()?,
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1))]
    pub category_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub count: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub update: CategoryUpdate,
}

form_error!(UpdateCategoryFormError, "Update category");

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = UpdateCategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            update: CategoryUpdate {
                name: CategoryName::new(value.name)?,
                icon: parse_icon(value.icon)?,
                count: value.count.map(ArticleCount::new).transpose()?,
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteCategoryForm {
    #[validate(length(min = 1))]
    pub category_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCategoryFormPayload {
    pub category_id: CategoryId,
}

form_error!(DeleteCategoryFormError, "Delete category");

impl TryFrom<DeleteCategoryForm> for DeleteCategoryFormPayload {
    type Error = DeleteCategoryFormError;

    fn try_from(value: DeleteCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}

/// Drag-and-drop outcome: `dragged_id` takes the slot of `target_id`.
#[derive(Deserialize, Validate)]
pub struct ReorderCategoriesForm {
    #[validate(length(min = 1))]
    pub dragged_id: String,
    #[validate(length(min = 1))]
    pub target_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReorderCategoriesFormPayload {
    pub dragged_id: CategoryId,
    pub target_id: CategoryId,
}

form_error!(ReorderCategoriesFormError, "Reorder categories");

impl TryFrom<ReorderCategoriesForm> for ReorderCategoriesFormPayload {
    type Error = ReorderCategoriesFormError;

    fn try_from(value: ReorderCategoriesForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            dragged_id: CategoryId::new(value.dragged_id)?,
            target_id: CategoryId::new(value.target_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_category_defaults_icon_and_parent() {
        let form = AddCategoryForm {
            name: " Billing ".to_string(),
            icon: Some(String::new()),
            parent_id: Some("  ".to_string()),
        };
        let payload: AddCategoryFormPayload = form.try_into().unwrap();

        assert_eq!(payload.new_category.name, "Billing");
        assert_eq!(payload.new_category.icon, CategoryIcon::Folder);
        assert!(payload.new_category.parent_id.is_none());
    }

    #[test]
    fn add_category_rejects_unknown_icon() {
        let form = AddCategoryForm {
            name: "Billing".to_string(),
            icon: Some("Banana".to_string()),
            parent_id: None,
        };
        let payload: Result<AddCategoryFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(AddCategoryFormError::TypeConstraint(_))));
    }

    #[test]
    fn update_category_rejects_negative_count() {
        let form = UpdateCategoryForm {
            category_id: "1".to_string(),
            name: "Billing".to_string(),
            icon: Some("Star".to_string()),
            count: Some(-1),
        };
        let payload: Result<UpdateCategoryFormPayload, _> = form.try_into();
        assert!(payload.is_err());
    }

    #[test]
    fn update_category_keeps_count_optional() {
        let form = UpdateCategoryForm {
            category_id: "1".to_string(),
            name: "Billing".to_string(),
            icon: None,
            count: None,
        };
        let payload: UpdateCategoryFormPayload = form.try_into().unwrap();
        assert!(payload.update.count.is_none());
    }
}
