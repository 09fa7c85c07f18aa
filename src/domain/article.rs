use serde::{Deserialize, Serialize};

use crate::domain::types::{Answer, ArticleId, CategoryName, MediaUrl, Question, Tag};

/// Category label applied to articles created without one.
pub const DEFAULT_ARTICLE_CATEGORY: &str = "General";

/// FAQ entry. `category` holds a category name, not an id, and may point at a
/// category that no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: ArticleId,
    pub question: Question,
    pub answer: Answer,
    pub category: CategoryName,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<MediaUrl>,
}

/// Data required to create or fully replace an [`Article`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewArticle {
    pub question: Question,
    pub answer: Answer,
    pub category: CategoryName,
    pub tags: Vec<Tag>,
    pub image: Option<MediaUrl>,
    pub video: Option<MediaUrl>,
}

impl NewArticle {
    pub fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            tags: self.tags,
            image: self.image,
            video: self.video,
        }
    }
}

/// Splits a comma-separated tag list, trimming entries and dropping blanks.
pub fn parse_tags(csv: &str) -> Vec<Tag> {
    csv.split(',').filter_map(|tag| Tag::new(tag).ok()).collect()
}

/// Search term plus optional exact category filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleQuery {
    /// Case-insensitive substring matched against question, answer and tags.
    pub search: String,
    /// Exact category name the article must carry.
    pub category: Option<CategoryName>,
}

impl ArticleQuery {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            category: None,
        }
    }

    pub fn category(mut self, category: Option<CategoryName>) -> Self {
        self.category = category;
        self
    }

    pub fn matches(&self, article: &Article) -> bool {
        self.matches_search(article) && self.matches_category(article)
    }

    /// Filters `articles` keeping their original order.
    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        articles.iter().filter(|a| self.matches(a)).collect()
    }

    fn matches_search(&self, article: &Article) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&needle);

        contains(article.question.as_str())
            || contains(article.answer.as_str())
            || article.tags.iter().any(|tag| contains(tag.as_str()))
    }

    fn matches_category(&self, article: &Article) -> bool {
        self.category
            .as_ref()
            .is_none_or(|category| article.category == *category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, question: &str, category: &str, tags: &str) -> Article {
        Article {
            id: ArticleId::new(id).unwrap(),
            question: Question::new(question).unwrap(),
            answer: Answer::new("Answer text").unwrap(),
            category: CategoryName::new(category).unwrap(),
            tags: parse_tags(tags),
            image: None,
            video: None,
        }
    }

    #[test]
    fn parse_tags_trims_and_drops_blanks() {
        let tags = parse_tags(" tag1, tag2 ,, ,tag3,");
        let tags: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(tags, vec!["tag1", "tag2", "tag3"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn empty_query_is_identity() {
        let articles = vec![
            article("1", "First", "A", ""),
            article("2", "Second", "B", ""),
        ];

        let found = ArticleQuery::default().apply(&articles);
        let ids: Vec<&str> = found.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn search_is_case_insensitive_over_question_answer_and_tags() {
        let articles = vec![
            article("1", "How to RESET password", "A", ""),
            article("2", "Other", "A", "Security, Login"),
        ];

        assert_eq!(ArticleQuery::new("reset").apply(&articles).len(), 1);
        assert_eq!(ArticleQuery::new("login").apply(&articles)[0].id, "2");
        assert_eq!(ArticleQuery::new("answer TEXT").apply(&articles).len(), 2);
        assert!(ArticleQuery::new("missing").apply(&articles).is_empty());
    }

    #[test]
    fn whitespace_search_is_a_literal_substring() {
        let articles = vec![
            article("1", "Two  spaces", "A", ""),
            article("2", "Single", "A", ""),
        ];

        let found = ArticleQuery::new("  ").apply(&articles);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn category_filter_requires_exact_name() {
        let articles = vec![
            article("1", "First", "Cats", ""),
            article("2", "Second", "Cats and dogs", ""),
        ];

        let query = ArticleQuery::new("").category(Some(CategoryName::new("Cats").unwrap()));
        let found = query.apply(&articles);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn optional_media_is_omitted_from_json() {
        let json = serde_json::to_value(article("1", "Q", "A", "x")).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["tags"][0], "x");
    }
}
