//! The two pages of the blog and the [`Route`] trait they implement.
//!
//! A page is a pure function of its resolved props. [`Route::render`] gives the page body, [`Route::render_document`]
//! wraps it in the HTML document [`layout`](crate::layout::layout).
use std::path::{Path, PathBuf};

use maud::{Markup, Render, html};

use crate::BuildOptions;
use crate::components::{ArticlePreview, ArticleView, Header};
use crate::content::{ArticleRouteProps, IndexRouteProps};
use crate::layout::{Head, layout};
use crate::routing::{RouteParams, build_file_path_with_params, build_url_with_params};

pub const HOME_ROUTE: &str = "/";
pub const ARTICLE_ROUTE: &str = "/articles/[slug]";

/// Shown on the home page when there is no article to list.
pub const NO_ARTICLES_MESSAGE: &str = "Пока нет ни одной статьи.";

/// Must be implemented by every page of the blog.
pub trait Route {
    type Props;

    /// The route template, with parameters between brackets, e.g. `/articles/[slug]`.
    fn route_raw(&self) -> &'static str;

    /// Values of the route parameters for the given props.
    fn params(&self, _props: &Self::Props) -> RouteParams {
        RouteParams::default()
    }

    fn head(&self, props: &Self::Props, options: &BuildOptions) -> Head;

    fn render(&self, props: &Self::Props) -> Markup;

    fn url(&self, props: &Self::Props) -> String {
        build_url_with_params(self.route_raw(), &self.params(props))
    }

    fn file_path(&self, props: &Self::Props, output_dir: &Path) -> PathBuf {
        build_file_path_with_params(self.route_raw(), &self.params(props), output_dir)
    }

    fn render_document(&self, props: &Self::Props, options: &BuildOptions) -> Markup {
        layout(
            &self.head(props, options),
            options,
            &self.url(props),
            self.render(props),
        )
    }
}

/// The index page, `/`.
pub struct Home;

impl Home {
    pub fn url() -> String {
        build_url_with_params(HOME_ROUTE, &RouteParams::default())
    }
}

impl Route for Home {
    type Props = IndexRouteProps;

    fn route_raw(&self) -> &'static str {
        HOME_ROUTE
    }

    fn head(&self, _props: &IndexRouteProps, options: &BuildOptions) -> Head {
        Head {
            title: options.site.title.clone(),
            description: options.site.description.clone(),
        }
    }

    fn render(&self, props: &IndexRouteProps) -> Markup {
        html! {
            div {
                (Header)
                div class="max-w-3xl mx-auto" {
                    @if let Some(articles) = props.listed() {
                        div {
                            @for article in articles {
                                (ArticlePreview { article })
                            }
                        }
                    } @else {
                        p { (NO_ARTICLES_MESSAGE) }
                    }
                }
            }
        }
    }
}

/// The detail page of an article, `/articles/[slug]`.
pub struct ArticlePage;

impl ArticlePage {
    pub fn url(slug: &str) -> String {
        build_url_with_params(ARTICLE_ROUTE, &RouteParams::new().with("slug", slug))
    }
}

impl Route for ArticlePage {
    type Props = ArticleRouteProps;

    fn route_raw(&self) -> &'static str {
        ARTICLE_ROUTE
    }

    fn params(&self, props: &ArticleRouteProps) -> RouteParams {
        RouteParams::new().with("slug", props.article.slug.as_str())
    }

    fn head(&self, props: &ArticleRouteProps, _options: &BuildOptions) -> Head {
        Head {
            title: props.article.title.clone(),
            description: props.article.description.clone(),
        }
    }

    fn render(&self, props: &ArticleRouteProps) -> Markup {
        ArticleView {
            article: &props.article,
        }
        .render()
    }
}
