//! Default content written on first start.

use crate::domain::article::{Article, parse_tags};
use crate::domain::category::CategoryTree;
use crate::domain::types::{
    Answer, ArticleId, CategoryName, Email, FullName, MediaUrl, Password, Question, Role,
    TypeConstraintError, UserId, Username,
};
use crate::domain::user::{Credentials, User};
use crate::models::category::StoredCategory;

/// (id, username, password, role, full name, email)
const DEFAULT_USERS: [(&str, &str, &str, Role, &str, &str); 2] = [
    (
        "1",
        "admin",
        "admin123",
        Role::Admin,
        "Administrator",
        "admin@example.com",
    ),
    ("2", "user", "user123", Role::User, "User", "user@example.com"),
];

/// The two default accounts and their passwords.
pub fn default_users() -> Result<(Vec<User>, Credentials), TypeConstraintError> {
    let mut users = Vec::with_capacity(DEFAULT_USERS.len());
    let mut credentials = Credentials::new();

    for (id, username, password, role, full_name, email) in DEFAULT_USERS {
        let username = Username::new(username)?;
        credentials.set(username.clone(), Password::new(password)?);
        users.push(User {
            id: UserId::new(id)?,
            username,
            role,
            full_name: FullName::new(full_name)?,
            email: Email::new(email)?,
        });
    }

    Ok((users, credentials))
}

fn record(
    id: &str,
    name: &str,
    icon: &str,
    count: i32,
    children: Vec<StoredCategory>,
) -> StoredCategory {
    StoredCategory {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        count,
        subcategories: (!children.is_empty()).then_some(children),
    }
}

/// Sample category tree.
pub fn default_categories() -> Result<CategoryTree, TypeConstraintError> {
    StoredCategory::into_tree(vec![
        record(
            "1",
            "Getting started",
            "Rocket",
            8,
            vec![
                record("1-1", "Registration", "UserPlus", 3, vec![]),
                record("1-2", "First steps", "Footprints", 5, vec![]),
            ],
        ),
        record(
            "2",
            "Features",
            "Settings",
            12,
            vec![
                record("2-1", "Basics", "Star", 7, vec![]),
                record("2-2", "Advanced", "Zap", 5, vec![]),
            ],
        ),
        record(
            "3",
            "Troubleshooting",
            "HelpCircle",
            15,
            vec![
                record("3-1", "Common errors", "AlertCircle", 8, vec![]),
                record("3-2", "Technical questions", "Wrench", 7, vec![]),
            ],
        ),
        record("4", "Integrations", "Link", 10, vec![]),
    ])
}

/// (id, question, answer, category, tags, image, video)
const DEFAULT_ARTICLES: [(&str, &str, &str, &str, &str, &str, &str); 6] = [
    (
        "1",
        "How do I register?",
        "Press the \"Sign up\" button in the top right corner, enter your email and choose a \
         strong password. A confirmation letter arrives shortly after.",
        "Getting started",
        "registration, account",
        "https://images.unsplash.com/photo-1633356122544-f134324a6cee?w=400",
        "",
    ),
    (
        "2",
        "How do I restore my password?",
        "Open the sign-in page and press \"Forgot password?\". Enter the email you registered \
         with and follow the link from the letter to choose a new password.",
        "Getting started",
        "password, security",
        "",
        "",
    ),
    (
        "3",
        "Which file formats are supported?",
        "Images (JPG, PNG, GIF, WebP), video (MP4, WebM), documents (PDF, DOC, DOCX) and \
         archives (ZIP, RAR). The maximum file size is 50 MB.",
        "Features",
        "files, upload",
        "",
        "https://www.youtube.com/embed/dQw4w9WgXcQ",
    ),
    (
        "4",
        "How do I use search?",
        "Type a keyword into the search field. Questions, answers and tags are searched as you \
         type; pick a category to narrow the results down.",
        "Features",
        "search, navigation",
        "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?w=400",
        "",
    ),
    (
        "5",
        "What does error 404 mean?",
        "The page was not found. Check the URL; the page may have been removed or moved. Use \
         search or return to the home page.",
        "Troubleshooting",
        "error, 404",
        "",
        "",
    ),
    (
        "6",
        "How do I connect the API?",
        "Go to Settings, then API, and create a new access key. Every request must carry the \
         Authorization header with your key.",
        "Integrations",
        "API, development",
        "https://images.unsplash.com/photo-1555066931-4365d14bab8c?w=400",
        "",
    ),
];

/// Sample FAQ articles matching [`default_categories`].
pub fn default_articles() -> Result<Vec<Article>, TypeConstraintError> {
    DEFAULT_ARTICLES
        .into_iter()
        .map(|(id, question, answer, category, tags, image, video)| {
            Ok(Article {
                id: ArticleId::new(id)?,
                question: Question::new(question)?,
                answer: Answer::new(answer)?,
                category: CategoryName::new(category)?,
                tags: parse_tags(tags),
                image: MediaUrl::optional(image)?,
                video: MediaUrl::optional(video)?,
            })
        })
        .collect()
}
