//! Views shared by the pages of the blog.
//!
//! Every view is a pure function of its input, rendered through [`maud::Render`]. Class names are utility classes from
//! the external stylesheet and carry no meaning here.
use maud::{Markup, PreEscaped, Render, html};

use crate::content::Article;
use crate::pages::{ArticlePage, Home};

/// The site title, linking back to the home page.
pub struct Header;

impl Render for Header {
    fn render(&self) -> Markup {
        html! {
            a href=(Home::url()) {
                h1 class="hover:bg-blue-100 my-4 pt-2 pb-4 text-gray-800 text-5xl font-semibold text-center" {
                    "My Blog"
                }
            }
        }
    }
}

/// A clickable summary card of an article.
///
/// No validation is done: an empty slug gives a link to `/articles/`, empty fields give empty text.
pub struct ArticlePreview<'a> {
    pub article: &'a Article,
}

impl Render for ArticlePreview<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="mb-4 p-4 bg-white rounded-md shadow-md hover:bg-blue-100" data-slug=(self.article.slug) {
                a href=(ArticlePage::url(&self.article.slug)) {
                    h2 class="text-2xl font-semibold text-gray-800" { (self.article.title) }
                    p class="text-gray-600" { (self.article.description) }
                }
            }
        }
    }
}

/// The full view of an article.
///
/// `content` is injected as markup, byte for byte, without any escaping or cleaning. Whatever provides the article is
/// responsible for its HTML being safe, see [`Sanitized`](crate::content::Sanitized).
pub struct ArticleView<'a> {
    pub article: &'a Article,
}

impl Render for ArticleView<'_> {
    fn render(&self) -> Markup {
        html! {
            div {
                (Header)
                div class="max-w-4xl mx-auto pb-4" {
                    h1 class="text-4xl text-gray-800 mb-4 text-center" { (self.article.title) }
                    div class="prose text-gray-700" {
                        (PreEscaped(&self.article.content))
                    }
                }
            }
        }
    }
}
