//! Data shapes shared by every view and the sources they are loaded from.
//!
//! This module is the only place where [`Article`], [`IndexRouteProps`] and [`ArticleRouteProps`] are declared. Views,
//! pages and the build all import them from here.
//!
//! How articles are obtained is left to an [`ArticleSource`]. The library ships a few: plain vectors for articles already
//! in memory, [`JsonArticles`] for a JSON file, and, with the `sanitize` feature, [`Sanitized`] to clean untrusted HTML
//! before it ever reaches a view.
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::errors::ContentError;

mod json;
#[cfg(feature = "sanitize")]
#[cfg_attr(docsrs, doc(cfg(feature = "sanitize")))]
pub mod sanitize;

pub use json::JsonArticles;
#[cfg(feature = "sanitize")]
pub use sanitize::Sanitized;

/// A blog post.
///
/// `content` is pre-rendered HTML and is trusted as-is by the views: it is injected into the page without escaping.
/// Fields missing from serialized input default to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub description: String,
}

/// Data resolved for the index route, `/`.
///
/// `articles` is `None` when the source explicitly has no collection, which is rendered the same way as an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRouteProps {
    pub articles: Option<Vec<Article>>,
}

impl IndexRouteProps {
    pub fn new(articles: impl Into<Option<Vec<Article>>>) -> Self {
        Self {
            articles: articles.into(),
        }
    }

    /// Returns the articles to preview, or `None` if there is nothing to list.
    pub fn listed(&self) -> Option<&[Article]> {
        match &self.articles {
            Some(articles) if !articles.is_empty() => Some(articles),
            _ => None,
        }
    }
}

/// Data resolved for the article route, `/articles/[slug]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRouteProps {
    pub article: Article,
}

impl From<Article> for ArticleRouteProps {
    fn from(article: Article) -> Self {
        Self { article }
    }
}

/// Something able to provide the article collection of the blog.
///
/// ## Example
/// ```rust
/// use feuillet::content::{Article, ArticleSource};
///
/// let articles = vec![Article {
///     id: 1,
///     slug: "hello-world".into(),
///     title: "Hello".into(),
///     ..Default::default()
/// }];
///
/// let loaded = articles.load().unwrap();
/// assert_eq!(loaded.unwrap().len(), 1);
/// ```
pub trait ArticleSource: Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Loads the collection. `Ok(None)` means the source explicitly holds no collection.
    fn load(&self) -> Result<Option<Vec<Article>>, ContentError>;
}

impl ArticleSource for Vec<Article> {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<Option<Vec<Article>>, ContentError> {
        Ok(Some(self.clone()))
    }
}

impl ArticleSource for Option<Vec<Article>> {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self) -> Result<Option<Vec<Article>>, ContentError> {
        Ok(self.clone())
    }
}

impl<S: ArticleSource + ?Sized> ArticleSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self) -> Result<Option<Vec<Article>>, ContentError> {
        (**self).load()
    }
}

/// Checks that no two articles share a slug. Empty slugs are not considered, they never get a page of their own.
pub fn ensure_unique_slugs(articles: &[Article]) -> Result<(), ContentError> {
    let mut seen = FxHashSet::default();

    for article in articles.iter().filter(|article| !article.slug.is_empty()) {
        if !seen.insert(article.slug.as_str()) {
            return Err(ContentError::DuplicateSlug {
                slug: article.slug.clone(),
            });
        }
    }

    Ok(())
}

/// Pairs of distinct slugs that only differ by case, e.g. `Hello` and `hello`.
///
/// They are valid, but on a case-insensitive filesystem both pages are written to the same file and only the last one
/// is kept.
pub fn case_insensitive_collisions(articles: &[Article]) -> Vec<(&str, &str)> {
    let mut seen: FxHashMap<String, &str> = FxHashMap::default();
    let mut collisions = Vec::new();

    for article in articles.iter().filter(|article| !article.slug.is_empty()) {
        let slug = article.slug.as_str();
        let first = *seen.entry(slug.to_lowercase()).or_insert(slug);
        if first != slug {
            collisions.push((first, slug));
        }
    }

    collisions
}

#[cfg(test)]
pub(crate) fn article(id: i64, slug: &str, title: &str, description: &str, content: &str) -> Article {
    Article {
        id,
        slug: slug.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        description: description.to_string(),
    }
}
