use std::path::PathBuf;

use clap::Parser;
use feuillet::{
    BuildOptions, BuildOutput, FeuilletError, SiteOptions, publish,
    content::{JsonArticles, Sanitized},
};
use log::info;

/// Publishes the blog as a static site.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file holding the articles, an array or `null`
    #[arg(long, env = "FEUILLET_DATA", default_value = "data/articles.json")]
    data: PathBuf,

    /// Directory the site is written to
    #[arg(long, env = "FEUILLET_OUTPUT_DIR", default_value = "dist")]
    output_dir: PathBuf,

    /// Directory copied as-is into the output directory
    #[arg(long, env = "FEUILLET_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Base URL of the deployed site, used for canonical links
    #[arg(long, env = "FEUILLET_BASE_URL")]
    base_url: Option<String>,

    /// URL of the stylesheet linked from every page
    #[arg(long, env = "FEUILLET_STYLESHEET")]
    stylesheet: Option<String>,

    /// Clean the HTML of every article before rendering it
    #[arg(long)]
    sanitize: bool,

    /// Keep the existing content of the output directory
    #[arg(long)]
    no_clean: bool,

    /// Do not print anything
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            base_url: self.base_url.clone(),
            output_dir: self.output_dir.clone(),
            static_dir: self.static_dir.clone(),
            clean_output_dir: !self.no_clean,
            site: SiteOptions {
                stylesheet: self.stylesheet.clone(),
                ..Default::default()
            },
        }
    }
}

fn main() -> Result<BuildOutput, FeuilletError> {
    let cli = Cli::parse();
    let options = cli.build_options();
    let source = JsonArticles::new(&cli.data);

    let output = if cli.sanitize {
        publish(Sanitized::new(source), options)?
    } else {
        publish(source, options)?
    };

    if !cli.quiet {
        info!(target: "build", "{} pages written to {} in {}ms", output.pages.len(), cli.output_dir.display(), output.elapsed().as_millis());
    }

    Ok(output)
}
