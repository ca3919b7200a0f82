use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{Article, ArticleSource};
use crate::errors::ContentError;

/// Loads articles from a JSON file holding either an array of articles or `null`.
///
/// ## Example
/// ```rust,no_run
/// use feuillet::content::{ArticleSource, JsonArticles};
///
/// let source = JsonArticles::new("data/articles.json");
/// let articles = source.load().unwrap();
/// ```
pub struct JsonArticles {
    path: PathBuf,
    name: String,
}

impl JsonArticles {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.to_string_lossy().to_string();

        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArticleSource for JsonArticles {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Option<Vec<Article>>, ContentError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| ContentError::ReadFailed {
            path: self.path.clone(),
            source,
        })?;

        let articles: Option<Vec<Article>> =
            serde_json::from_str(&raw).map_err(|source| ContentError::ParseFailed {
                path: self.path.clone(),
                source,
            })?;

        debug!(target: "content", "{} holds {} articles", self.name, articles.as_ref().map_or(0, Vec::len));

        Ok(articles)
    }
}
