use serde::Deserialize;
use validator::Validate;

use crate::domain::article::{ArticleQuery, DEFAULT_ARTICLE_CATEGORY, NewArticle, parse_tags};
use crate::domain::types::{
    Answer, ArticleId, CategoryName, MediaUrl, Question, TypeConstraintError,
};
use crate::forms::non_blank;

/// Fields shared by the add and edit article forms.
#[derive(Deserialize, Validate)]
pub struct ArticleFields {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Comma-separated list.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

impl ArticleFields {
    fn into_new_article(self) -> Result<NewArticle, TypeConstraintError> {
        let category = non_blank(self.category)
            .unwrap_or_else(|| DEFAULT_ARTICLE_CATEGORY.to_string());

        Ok(NewArticle {
            question: Question::new(self.question)?,
            answer: Answer::new(self.answer)?,
            category: CategoryName::new(category)?,
            tags: parse_tags(&self.tags),
            image: MediaUrl::optional(self.image.unwrap_or_default())?,
            video: MediaUrl::optional(self.video.unwrap_or_default())?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct AddArticleForm {
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: ArticleFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddArticleFormPayload {
    pub new_article: NewArticle,
}

form_error!(AddArticleFormError, "Add article");

impl TryFrom<AddArticleForm> for AddArticleFormPayload {
    type Error = AddArticleFormError;

    fn try_from(value: AddArticleForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            new_article: value.fields.into_new_article()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateArticleForm {
    #[validate(length(min = 1))]
    pub article_id: String,
    #[serde(flatten)]
    #[validate(nested)]
    pub fields: ArticleFields,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateArticleFormPayload {
    pub article_id: ArticleId,
    pub article: NewArticle,
}

form_error!(UpdateArticleFormError, "Update article");

impl TryFrom<UpdateArticleForm> for UpdateArticleFormPayload {
    type Error = UpdateArticleFormError;

    fn try_from(value: UpdateArticleForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            article_id: ArticleId::new(value.article_id)?,
            article: value.fields.into_new_article()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteArticleForm {
    #[validate(length(min = 1))]
    pub article_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteArticleFormPayload {
    pub article_id: ArticleId,
}

form_error!(DeleteArticleFormError, "Delete article");

impl TryFrom<DeleteArticleForm> for DeleteArticleFormPayload {
    type Error = DeleteArticleFormError;

    fn try_from(value: DeleteArticleForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            article_id: ArticleId::new(value.article_id)?,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct SearchArticlesForm {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
}

form_error!(SearchArticlesFormError, "Search articles");

impl TryFrom<SearchArticlesForm> for ArticleQuery {
    type Error = SearchArticlesFormError;

    fn try_from(value: SearchArticlesForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let category = non_blank(value.category).map(CategoryName::new).transpose()?;
        Ok(ArticleQuery::new(value.search).category(category))
    }
}
