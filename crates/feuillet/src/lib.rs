#![cfg_attr(docsrs, feature(doc_cfg))]
//! Feuillet renders a minimal blog: a home page listing article previews, and a detail page for every article.
//!
//! Views are pure functions of already resolved data ([`content::IndexRouteProps`] and [`content::ArticleRouteProps`]),
//! they never fetch anything and never fail. Where the articles come from is decided by the caller, through an
//! [`content::ArticleSource`].
//!
//! ## Example
//! ```rust,no_run
//! use feuillet::{publish, BuildOptions, BuildOutput, FeuilletError};
//! use feuillet::content::JsonArticles;
//!
//! fn main() -> Result<BuildOutput, FeuilletError> {
//!     publish(JsonArticles::new("data/articles.json"), BuildOptions::default())
//! }
//! ```
//!
//! Pages can also be rendered one at a time, for instance by a server resolving the routes itself:
//! ```rust
//! use feuillet::BuildOptions;
//! use feuillet::content::{Article, ArticleRouteProps};
//! use feuillet::pages::{ArticlePage, Route};
//!
//! let props = ArticleRouteProps::from(Article {
//!     slug: "x".into(),
//!     title: "T".into(),
//!     content: "<b>bold</b>".into(),
//!     ..Default::default()
//! });
//!
//! let html = ArticlePage.render_document(&props, &BuildOptions::default()).into_string();
//! assert!(html.contains("<b>bold</b>"));
//! ```

// Modules the end-user will interact directly or indirectly with
pub mod components;
pub mod content;
pub mod errors;
pub mod layout;
pub mod pages;
pub mod routing;

// Exports for end-users
pub use build::metadata::{BuildOutput, PageOutput, StaticAssetOutput};
pub use build::options::{BuildOptions, SiteOptions};
pub use errors::FeuilletError;

mod build;

// Internal modules
mod logging;

use build::build;
use content::ArticleSource;
use logging::init_logging;

/// The version of Feuillet being used.
///
/// Used for the generator tag of every page, see [`layout::generator`].
pub const GENERATOR: &str = concat!("Feuillet v", env!("CARGO_PKG_VERSION"));

/// Feuillet entrypoint. Loads the articles, then generates the home page and one page per article.
///
/// ## Example
/// Should be called from the main function of the binary crate.
/// ```rust,no_run
/// use feuillet::{publish, BuildOptions, BuildOutput, FeuilletError};
/// use feuillet::content::{JsonArticles, Sanitized};
///
/// fn main() -> Result<BuildOutput, FeuilletError> {
///     publish(
///         Sanitized::new(JsonArticles::new("data/articles.json")),
///         BuildOptions::default(),
///     )
/// }
/// ```
pub fn publish(
    source: impl ArticleSource,
    options: BuildOptions,
) -> Result<BuildOutput, FeuilletError> {
    init_logging();

    build(&source, &options)
}
