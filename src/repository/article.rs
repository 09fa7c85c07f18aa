use crate::domain::article::Article;
use crate::repository::{
    ARTICLES_KEY, ArticleReader, ArticleWriter, KeyValueStore, RepositoryResult, load_json,
    save_json,
};

impl<S: KeyValueStore> ArticleReader for S {
    fn load_articles(&self) -> RepositoryResult<Option<Vec<Article>>> {
        load_json(self, ARTICLES_KEY)
    }
}

impl<S: KeyValueStore> ArticleWriter for S {
    fn save_articles(&self, articles: &[Article]) -> RepositoryResult<()> {
        save_json(self, ARTICLES_KEY, articles)
    }
}
