use std::{
    path::PathBuf,
    process::{ExitCode, Termination},
    time::{Duration, Instant},
};

use rustc_hash::FxHashMap;

/// A page written by [`publish()`](crate::publish).
#[derive(Debug)]
pub struct PageOutput {
    /// Route template the page was rendered from, e.g. `/articles/[slug]`.
    pub route: String,
    pub url: String,
    pub file_path: PathBuf,
    pub params: Option<FxHashMap<String, String>>,
}

/// A file of the static directory, copied as-is by [`publish()`](crate::publish).
#[derive(Debug)]
pub struct StaticAssetOutput {
    pub file_path: PathBuf,
    pub original_path: PathBuf,
}

/// Everything [`publish()`](crate::publish) wrote, in the order it was written. The home page always comes first.
#[derive(Debug)]
pub struct BuildOutput {
    pub start_time: Instant,
    pub pages: Vec<PageOutput>,
    pub static_files: Vec<StaticAssetOutput>,
}

impl BuildOutput {
    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            pages: Vec::new(),
            static_files: Vec::new(),
        }
    }

    /// Time spent since the build started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Finds the page written for `url`.
    pub fn page(&self, url: &str) -> Option<&PageOutput> {
        self.pages.iter().find(|page| page.url == url)
    }

    pub(crate) fn add_page(&mut self, page: PageOutput) {
        self.pages.push(page);
    }

    pub(crate) fn add_static_file(&mut self, file_path: PathBuf, original_path: PathBuf) {
        self.static_files.push(StaticAssetOutput {
            file_path,
            original_path,
        });
    }
}

impl Default for BuildOutput {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Termination for BuildOutput {
    fn report(self) -> ExitCode {
        ExitCode::SUCCESS
    }
}
