use std::path::PathBuf;

/// Feuillet build options. Should be passed to [`publish()`](crate::publish()).
///
/// ## Examples
/// Default values:
/// ```rust,no_run
/// use feuillet::{publish, BuildOptions, BuildOutput, FeuilletError};
/// use feuillet::content::JsonArticles;
///
/// fn main() -> Result<BuildOutput, FeuilletError> {
///   publish(JsonArticles::new("data/articles.json"), BuildOptions::default())
/// }
/// ```
/// Custom values:
/// ```rust
/// use feuillet::{BuildOptions, SiteOptions};
///
/// let options = BuildOptions {
///   output_dir: "public".into(),
///   base_url: Some("https://blog.example.com".into()),
///   site: SiteOptions {
///     stylesheet: Some("/assets/main.css".into()),
///     ..Default::default()
///   },
///   ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Base URL for the site, e.g. `https://example.com` or `https://example.com/subdir`.
    /// When set, every page gets a canonical link.
    pub base_url: Option<String>,

    pub output_dir: PathBuf,

    /// Directory copied as-is into the output directory, if it exists. Typically holds `favicon.ico` and stylesheets.
    pub static_dir: PathBuf,

    /// Whether to clean the output directory before building.
    pub clean_output_dir: bool,

    pub site: SiteOptions,
}

impl BuildOptions {
    /// Returns the canonical URL of a page. If [`BuildOptions::base_url`] is not set, this will return `None`.
    pub fn canonical_url(&self, path: &str) -> Option<String> {
        self.base_url
            .as_ref()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), path))
    }
}

/// Provides default values for [`crate::publish()`].
impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            output_dir: "dist".into(),
            static_dir: "static".into(),
            clean_output_dir: true,
            site: SiteOptions::default(),
        }
    }
}

/// Site-wide metadata used by the document layout.
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// Title of the home page. Article pages use the title of the article.
    pub title: String,
    /// Description of the home page. Article pages use the description of the article.
    pub description: String,
    /// Value of the `lang` attribute of every page.
    pub lang: String,
    /// URL of the utility-class stylesheet, if any.
    pub stylesheet: Option<String>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            title: "Блог".to_string(),
            description: "Главная страница блога".to_string(),
            lang: "ru".to_string(),
            stylesheet: None,
        }
    }
}
