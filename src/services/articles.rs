use crate::ADMIN_ROLE;
use crate::domain::article::{Article, ArticleQuery};
use crate::domain::types::ArticleId;
use crate::forms::articles::{
    AddArticleFormPayload, DeleteArticleFormPayload, UpdateArticleFormPayload,
};
use crate::repository::StateRepository;
use crate::services::check_role;
use crate::state::KnowledgeBase;

use super::{ServiceError, ServiceResult};

/// Articles matching `query`, in insertion order.
pub fn search_articles<R>(query: &ArticleQuery, kb: &KnowledgeBase<R>) -> Vec<Article>
where
    R: StateRepository,
{
    query.apply(kb.articles()).into_iter().cloned().collect()
}

/// Articles matching `search` within the currently selected category.
pub fn visible_articles<R>(search: &str, kb: &KnowledgeBase<R>) -> Vec<Article>
where
    R: StateRepository,
{
    let query = ArticleQuery::new(search).category(kb.category_filter().cloned());
    search_articles(&query, kb)
}

pub fn add_article<R>(
    payload: AddArticleFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<Article>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let article = payload.new_article.into_article(ArticleId::generate());
    let mut articles = kb.articles().to_vec();
    articles.push(article.clone());

    match kb.commit_articles(articles) {
        Ok(()) => {
            log::info!("Added article {}", article.id);
            Ok(article)
        }
        Err(e) => {
            log::error!("Failed to add article: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Replaces every field of an existing article, keeping its id and position.
pub fn update_article<R>(
    payload: UpdateArticleFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<Article>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let mut articles = kb.articles().to_vec();
    let Some(slot) = articles.iter_mut().find(|a| a.id == payload.article_id) else {
        return Err(ServiceError::NotFound);
    };
    let article = payload.article.into_article(payload.article_id);
    *slot = article.clone();

    match kb.commit_articles(articles) {
        Ok(()) => {
            log::info!("Updated article {}", article.id);
            Ok(article)
        }
        Err(e) => {
            log::error!("Failed to update article: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn delete_article<R>(
    payload: DeleteArticleFormPayload,
    kb: &mut KnowledgeBase<R>,
) -> ServiceResult<()>
where
    R: StateRepository,
{
    if !check_role(ADMIN_ROLE, kb.current_user()) {
        return Err(ServiceError::Unauthorized);
    }

    let mut articles = kb.articles().to_vec();
    let before = articles.len();
    articles.retain(|a| a.id != payload.article_id);
    if articles.len() == before {
        return Err(ServiceError::NotFound);
    }

    match kb.commit_articles(articles) {
        Ok(()) => {
            log::info!("Deleted article {}", payload.article_id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete article: {e}");
            Err(ServiceError::Internal)
        }
    }
}
