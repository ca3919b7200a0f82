use maud::{DOCTYPE, Markup, html};

use crate::{BuildOptions, GENERATOR};

/// Metadata of a single page, placed in the document `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub title: String,
    pub description: String,
}

/// Can be used to create a generator tag in the output HTML. See [`GENERATOR`].
pub fn generator() -> Markup {
    html! {
        meta name="generator" content=(GENERATOR);
    }
}

/// Wraps the body of a page into a full HTML document.
pub fn layout(head: &Head, options: &BuildOptions, current_path: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(options.site.lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (head.title) }
                meta property="og:title" content=(head.title);
                meta name="description" content=(head.description);
                (generator())
                @if let Some(canonical) = options.canonical_url(current_path) {
                    link rel="canonical" href=(canonical);
                }
                @if let Some(stylesheet) = &options.site.stylesheet {
                    link rel="stylesheet" type="text/css" href=(stylesheet);
                }
            }
            body {
                (body)
            }
        }
    }
}
