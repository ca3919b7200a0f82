use std::{
    env, fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use colored::{ColoredString, Colorize};
use log::{info, trace, warn};
use rayon::prelude::*;

use crate::{
    BuildOptions, BuildOutput, PageOutput,
    content::{
        Article, ArticleRouteProps, ArticleSource, IndexRouteProps, case_insensitive_collisions,
        ensure_unique_slugs,
    },
    errors::{BuildError, FeuilletError},
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    pages::{ArticlePage, Home, Route},
    routing::is_safe_path_segment,
};

pub mod metadata;
pub mod options;

pub fn build(
    source: &dyn ArticleSource,
    options: &BuildOptions,
) -> Result<BuildOutput, FeuilletError> {
    let mut build_metadata = BuildOutput::new(Instant::now());

    let section_format_options = FormatElapsedTimeOptions {
        sec_red_threshold: 5,
        sec_yellow_threshold: 1,
        millis_red_threshold: None,
        millis_yellow_threshold: None,
        ..Default::default()
    };

    print_title("loading articles");
    let content_start = Instant::now();

    let articles = source.load()?;
    validate_articles(articles.as_deref().unwrap_or_default())?;

    match &articles {
        Some(articles) => {
            info!(target: "content", "{} loaded {} articles in {}", source.name(), articles.len(), format_elapsed_time(content_start.elapsed(), &FormatElapsedTimeOptions::default()))
        }
        None => {
            info!(target: "content", "{} has no article collection", source.name())
        }
    }

    trace!(target: "build", "Setting up output directory...");

    if options.clean_output_dir && options.output_dir.exists() {
        let mut protected = vec![options.static_dir.clone()];
        protected.extend(env::current_dir().ok());

        ensure_safe_to_clean(&options.output_dir, &protected)?;
        fs::remove_dir_all(&options.output_dir)?;
    }

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    print_title("generating pages");
    let pages_start = Instant::now();

    let index_props = IndexRouteProps::new(articles);
    build_metadata.add_page(write_page(&Home, &index_props, options)?);

    let detail_articles: Vec<&Article> = index_props
        .articles
        .iter()
        .flatten()
        .filter(|article| {
            if article.slug.is_empty() {
                warn!(target: "build", "Article {} has an empty slug, it will be listed but no page will be generated for it.", article.id.to_string().bold());
                false
            } else {
                true
            }
        })
        .collect();

    if !detail_articles.is_empty() {
        info!(target: "build", "{}", ArticlePage.route_raw().bold());
    }

    let detail_pages = detail_articles
        .par_iter()
        .map(|article| {
            let props = ArticleRouteProps::from((*article).clone());
            write_page(&ArticlePage, &props, options)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let page_count = detail_pages.len() + 1;
    for page in detail_pages {
        build_metadata.add_page(page);
    }

    info!(target: "pages", "{}", format!("generated {} pages in {}", page_count, format_elapsed_time(pages_start.elapsed(), &section_format_options)).bold());

    if options.static_dir.exists() {
        let assets_start = Instant::now();
        print_title("copying assets");

        copy_recursively(
            &options.static_dir,
            &options.output_dir,
            &mut build_metadata,
        )?;

        info!(target: "build", "{}", format!("Assets copied in {}", format_elapsed_time(assets_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());
    }

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!("Build completed in {}", format_elapsed_time(build_metadata.elapsed(), &section_format_options)).bold());

    Ok(build_metadata)
}

/// Checks everything that would make the output ambiguous or escape the output directory, before anything is written.
fn validate_articles(articles: &[Article]) -> Result<(), FeuilletError> {
    ensure_unique_slugs(articles)?;

    if let Some(article) = articles
        .iter()
        .find(|article| !article.slug.is_empty() && !is_safe_path_segment(&article.slug))
    {
        Err(BuildError::UnsafeSlug {
            slug: article.slug.clone(),
        })?;
    }

    for (first, second) in case_insensitive_collisions(articles) {
        warn!(target: "content", "Slugs {} and {} only differ by case, on a case-insensitive filesystem one page will overwrite the other.", first.bold(), second.bold());
    }

    Ok(())
}

/// Refuses to clean `output_dir` if it is, or contains, one of the `protected` paths. Paths that do not exist are ignored.
fn ensure_safe_to_clean(output_dir: &Path, protected: &[PathBuf]) -> Result<(), BuildError> {
    let Ok(output_dir) = fs::canonicalize(output_dir) else {
        return Ok(());
    };

    for path in protected {
        if let Ok(path) = fs::canonicalize(path)
            && path.starts_with(&output_dir)
        {
            return Err(BuildError::UnsafeOutputDir {
                output_dir,
                protected: path,
            });
        }
    }

    Ok(())
}

fn write_page<R: Route>(
    route: &R,
    props: &R::Props,
    options: &BuildOptions,
) -> Result<PageOutput, BuildError> {
    let route_start = Instant::now();

    let route_format_options = FormatElapsedTimeOptions {
        additional_fn: Some(&|msg: ColoredString| {
            let formatted_msg = format!("(+{})", msg);
            if msg.fgcolor.is_none() {
                formatted_msg.dimmed()
            } else {
                formatted_msg.into()
            }
        }),
        ..Default::default()
    };

    let url = route.url(props);
    let html = route.render_document(props, options).into_string();
    let file_path = route.file_path(props, &options.output_dir);

    write_route_file(html.as_bytes(), &file_path)?;

    info!(target: "pages", "{} -> {} {}", url, file_path.to_string_lossy().dimmed(), format_elapsed_time(route_start.elapsed(), &route_format_options));

    let params = route.params(props).0;

    Ok(PageOutput {
        route: route.route_raw().to_string(),
        url,
        file_path,
        params: if params.is_empty() { None } else { Some(params) },
    })
}

fn write_route_file(content: &[u8], file_path: &PathBuf) -> Result<(), BuildError> {
    let write = || -> io::Result<()> {
        // Create the parent directories if they don't exist
        if let Some(parent_dir) = file_path.parent() {
            fs::create_dir_all(parent_dir)?
        }

        fs::write(file_path, content)
    };

    write().map_err(|source| BuildError::WriteFailed {
        path: file_path.clone(),
        source,
    })
}

fn copy_recursively(
    source: &Path,
    destination: &Path,
    build_metadata: &mut BuildOutput,
) -> Result<(), BuildError> {
    fs::create_dir_all(destination).map_err(copy_failed(source, destination))?;

    for entry in fs::read_dir(source).map_err(copy_failed(source, destination))? {
        let entry = entry.map_err(copy_failed(source, destination))?;
        let entry_source = entry.path();
        let entry_destination = destination.join(entry.file_name());

        let filetype = entry
            .file_type()
            .map_err(copy_failed(&entry_source, &entry_destination))?;

        if filetype.is_dir() {
            copy_recursively(&entry_source, &entry_destination, build_metadata)?;
        } else {
            fs::copy(&entry_source, &entry_destination)
                .map_err(copy_failed(&entry_source, &entry_destination))?;

            build_metadata.add_static_file(entry_destination, entry_source);
        }
    }

    Ok(())
}

fn copy_failed(from: &Path, to: &Path) -> impl FnOnce(io::Error) -> BuildError {
    let (from, to) = (from.to_path_buf(), to.to_path_buf());
    move |source| BuildError::CopyFailed { from, to, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::article;
    use crate::errors::ContentError;
    use crate::pages::NO_ARTICLES_MESSAGE;
    use tempfile::tempdir;

    fn options_for(dir: &Path) -> BuildOptions {
        BuildOptions {
            output_dir: dir.join("dist"),
            static_dir: dir.join("static"),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_writes_every_page() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path());
        let articles = vec![
            article(1, "hello-world", "Hello", "First post", "<p>Hi</p>"),
            article(2, "second", "Second", "Another one", "<b>bold</b>"),
        ];

        let output = build(&articles, &options).unwrap();

        let index = fs::read_to_string(options.output_dir.join("index.html")).unwrap();
        assert!(index.contains("href=\"/articles/hello-world\""));
        assert!(index.contains("href=\"/articles/second\""));
        assert!(index.contains("<title>Блог</title>"));

        let detail = fs::read_to_string(
            options
                .output_dir
                .join("articles")
                .join("second")
                .join("index.html"),
        )
        .unwrap();
        assert!(detail.contains("<title>Second</title>"));
        assert!(detail.contains("<b>bold</b>"));

        let urls: Vec<_> = output.pages.iter().map(|page| page.url.as_str()).collect();
        assert_eq!(urls, vec!["/", "/articles/hello-world", "/articles/second"]);
        assert_eq!(output.pages[0].params, None);
        assert_eq!(
            output.pages[1].params.as_ref().unwrap().get("slug").unwrap(),
            "hello-world"
        );
        assert_eq!(
            output.page("/articles/second").unwrap().file_path,
            options
                .output_dir
                .join("articles")
                .join("second")
                .join("index.html")
        );
    }

    #[test]
    fn test_build_null_articles() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path());

        let output = build(&None::<Vec<Article>>, &options).unwrap();

        assert_eq!(output.pages.len(), 1);
        let index = fs::read_to_string(options.output_dir.join("index.html")).unwrap();
        assert!(index.contains(NO_ARTICLES_MESSAGE));
        assert!(!options.output_dir.join("articles").exists());
    }

    #[test]
    fn test_build_skips_empty_slug_page() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path());
        let articles = vec![
            article(1, "", "Nameless", "", ""),
            article(2, "named", "Named", "", ""),
        ];

        let output = build(&articles, &options).unwrap();

        assert_eq!(output.pages.len(), 2);
        let index = fs::read_to_string(options.output_dir.join("index.html")).unwrap();
        assert!(index.contains("href=\"/articles/\""));
        assert!(index.contains(">Nameless</h2>"));
        assert!(!options.output_dir.join("articles").join("index.html").exists());
    }

    #[test]
    fn test_build_rejects_duplicate_slugs() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path());
        let articles = vec![article(1, "same", "", "", ""), article(2, "same", "", "", "")];

        assert!(matches!(
            build(&articles, &options),
            Err(FeuilletError::Content(ContentError::DuplicateSlug { .. }))
        ));
        assert!(!options.output_dir.exists());
    }

    #[test]
    fn test_build_rejects_unsafe_slugs() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path());
        let articles = vec![article(1, "..", "", "", "")];

        assert!(matches!(
            build(&articles, &options),
            Err(FeuilletError::Build(BuildError::UnsafeSlug { slug })) if slug == ".."
        ));
    }

    #[test]
    fn test_build_cleans_output_dir() {
        let dir = tempdir().unwrap();
        let mut options = options_for(dir.path());
        fs::create_dir_all(&options.output_dir).unwrap();
        fs::write(options.output_dir.join("stale.html"), "stale").unwrap();

        options.clean_output_dir = false;
        build(&Vec::<Article>::new(), &options).unwrap();
        assert!(options.output_dir.join("stale.html").exists());

        options.clean_output_dir = true;
        build(&Vec::<Article>::new(), &options).unwrap();
        assert!(!options.output_dir.join("stale.html").exists());
        assert!(options.output_dir.join("index.html").exists());
    }

    #[test]
    fn test_build_copies_static_dir() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path());
        fs::create_dir_all(options.static_dir.join("assets")).unwrap();
        fs::write(options.static_dir.join("favicon.ico"), "icon").unwrap();
        fs::write(options.static_dir.join("assets").join("main.css"), "body{}").unwrap();

        let output = build(&Vec::<Article>::new(), &options).unwrap();

        assert_eq!(output.static_files.len(), 2);
        assert_eq!(
            fs::read_to_string(options.output_dir.join("favicon.ico")).unwrap(),
            "icon"
        );
        assert_eq!(
            fs::read_to_string(options.output_dir.join("assets").join("main.css")).unwrap(),
            "body{}"
        );
    }

    #[test]
    fn test_build_reports_failed_static_copy() {
        let dir = tempdir().unwrap();
        let options = options_for(dir.path());
        fs::write(&options.static_dir, "not a directory").unwrap();

        let err = build(&Vec::<Article>::new(), &options).unwrap_err();

        assert!(matches!(
            &err,
            FeuilletError::Build(BuildError::CopyFailed { from, to, .. })
                if *from == options.static_dir && *to == options.output_dir
        ));
        assert!(err.to_string().contains(&options.static_dir.display().to_string()));
    }

    #[test]
    fn test_build_refuses_to_clean_static_dir() {
        let dir = tempdir().unwrap();
        let mut options = options_for(dir.path());
        options.static_dir = options.output_dir.join("static");
        fs::create_dir_all(&options.static_dir).unwrap();
        fs::write(options.static_dir.join("favicon.ico"), "icon").unwrap();

        assert!(matches!(
            build(&Vec::<Article>::new(), &options),
            Err(FeuilletError::Build(BuildError::UnsafeOutputDir { .. }))
        ));
        assert!(options.static_dir.join("favicon.ico").exists());
        assert!(!options.output_dir.join("index.html").exists());

        options.clean_output_dir = false;
        build(&Vec::<Article>::new(), &options).unwrap();
        assert!(options.static_dir.join("favicon.ico").exists());
        assert!(options.output_dir.join("favicon.ico").exists());
    }

    #[test]
    fn test_ensure_safe_to_clean() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("dist");
        let sibling = dir.path().join("static");
        fs::create_dir_all(output_dir.join("nested")).unwrap();
        fs::create_dir_all(&sibling).unwrap();

        assert!(ensure_safe_to_clean(&output_dir, &[sibling.clone()]).is_ok());
        assert!(ensure_safe_to_clean(&output_dir, &[output_dir.join("missing")]).is_ok());
        assert!(ensure_safe_to_clean(&dir.path().join("missing"), &[sibling.clone()]).is_ok());

        assert!(matches!(
            ensure_safe_to_clean(&output_dir, &[sibling.clone(), output_dir.join("nested")]),
            Err(BuildError::UnsafeOutputDir { .. })
        ));
        assert!(matches!(
            ensure_safe_to_clean(&output_dir, &[output_dir.join("nested").join("..")]),
            Err(BuildError::UnsafeOutputDir { .. })
        ));
        assert!(matches!(
            ensure_safe_to_clean(dir.path(), &[sibling]),
            Err(BuildError::UnsafeOutputDir { .. })
        ));
    }
}
