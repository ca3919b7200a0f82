//! Allow-list cleaning of article HTML.
//!
//! Views inject [`Article::content`] without escaping. When articles come from somewhere that is not fully trusted, wrap
//! the source in [`Sanitized`] so the HTML is cleaned once, at load time, instead of inside the views.
//!
//! Only the elements and attributes listed in this module survive. Unknown elements are unwrapped, their text is kept.
//! Elements whose content is code or foreign markup (`script`, `style`, `svg`, `math`...) are dropped whole. URL
//! attributes must be relative or use `http`, `https` or `mailto`.
use lol_html::{RewriteStrSettings, element, errors::RewritingError, rewrite_str};

use super::{Article, ArticleSource};
use crate::errors::ContentError;

const ALLOWED_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "caption", "cite", "code", "dd", "del", "details", "div", "dl", "dt",
    "em", "figcaption", "figure", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "kbd", "li", "mark",
    "ol", "p", "pre", "q", "s", "small", "span", "strong", "sub", "summary", "sup", "table", "tbody", "td", "th",
    "thead", "tr", "ul",
];

/// Elements dropped along with everything inside them.
const DROPPED_ELEMENTS: &[&str] = &[
    "applet", "audio", "base", "button", "embed", "form", "frame", "frameset", "iframe", "input", "link", "math",
    "meta", "noembed", "noframes", "noscript", "object", "script", "select", "style", "svg", "template",
];

/// Attributes allowed on every kept element.
const GLOBAL_ATTRIBUTES: [&str; 4] = ["class", "dir", "lang", "title"];

/// Attributes holding a URL, only kept when [`is_allowed_url`] accepts their value.
const URL_ATTRIBUTES: [&str; 3] = ["cite", "href", "src"];

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

fn is_allowed_attribute(element: &str, attribute: &str) -> bool {
    if GLOBAL_ATTRIBUTES.contains(&attribute) {
        return true;
    }

    match element {
        "a" => matches!(attribute, "href" | "rel"),
        "img" => matches!(attribute, "src" | "alt" | "width" | "height"),
        "blockquote" | "q" | "del" | "ins" => attribute == "cite",
        "td" | "th" => matches!(attribute, "colspan" | "rowspan"),
        "ol" => matches!(attribute, "start" | "reversed"),
        "li" => attribute == "value",
        "details" => attribute == "open",
        _ => false,
    }
}

/// Cleans a fragment of HTML against the allow-list of this module.
///
/// ## Example
/// ```rust
/// use feuillet::content::sanitize::sanitize_html;
///
/// let clean = sanitize_html(r#"<p onclick="steal()">Hi<script>steal()</script></p>"#).unwrap();
/// assert_eq!(clean, "<p>Hi</p>");
/// ```
pub fn sanitize_html(html: &str) -> Result<String, RewritingError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", |el| {
                let tag_name = el.tag_name();

                if DROPPED_ELEMENTS.contains(&tag_name.as_str()) {
                    el.remove();
                    return Ok(());
                }

                if !ALLOWED_ELEMENTS.contains(&tag_name.as_str()) {
                    el.remove_and_keep_content();
                    return Ok(());
                }

                let rejected: Vec<String> = el
                    .attributes()
                    .iter()
                    .filter(|attribute| {
                        let name = attribute.name();
                        !is_allowed_attribute(&tag_name, &name)
                            || (URL_ATTRIBUTES.contains(&name.as_str())
                                && !is_allowed_url(&attribute.value()))
                    })
                    .map(|attribute| attribute.name())
                    .collect();

                for name in rejected {
                    el.remove_attribute(&name);
                }

                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    )
}

/// Accepts relative URLs and URLs with one of [`ALLOWED_SCHEMES`].
///
/// Attribute values are read as written, character references included. Browsers decode them before reading the
/// scheme, so a scheme containing `&` could be anything and is refused.
fn is_allowed_url(url: &str) -> bool {
    // Browsers ignore whitespace and control characters when reading the scheme.
    let url: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    let scheme_end = url.find([':', '/', '?', '#']).unwrap_or(url.len());
    let scheme = &url[..scheme_end];

    if scheme.contains('&') {
        return false;
    }

    if url[scheme_end..].starts_with(':') {
        ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
    } else {
        true
    }
}

/// Wraps an [`ArticleSource`], sanitizing the content of every article it loads.
///
/// ## Example
/// ```rust
/// use feuillet::content::{Article, ArticleSource, Sanitized};
///
/// let source = Sanitized::new(vec![Article {
///     slug: "hello".into(),
///     content: "<b>bold</b><script>alert(1)</script>".into(),
///     ..Default::default()
/// }]);
///
/// let articles = source.load().unwrap().unwrap();
/// assert_eq!(articles[0].content, "<b>bold</b>");
/// ```
pub struct Sanitized<S> {
    inner: S,
}

impl<S: ArticleSource> Sanitized<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ArticleSource> ArticleSource for Sanitized<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn load(&self) -> Result<Option<Vec<Article>>, ContentError> {
        let Some(articles) = self.inner.load()? else {
            return Ok(None);
        };

        articles
            .into_iter()
            .map(|mut article| {
                article.content = sanitize_html(&article.content).map_err(|source| {
                    ContentError::SanitizeFailed {
                        slug: article.slug.clone(),
                        source,
                    }
                })?;
                Ok::<_, ContentError>(article)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}
