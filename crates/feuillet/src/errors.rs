//! Error types for Feuillet.
//!
//! Views never fail, so everything here belongs to the layers around them: loading articles and writing pages.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from main are printed through Debug, thiserror only gives us Display.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

#[derive(Error)]
pub enum ContentError {
    #[error("Failed to read articles file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse articles file: {path}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "Slug `{slug}` is used by more than one article. Slugs are used to build the URL of each article and must be unique."
    )]
    DuplicateSlug { slug: String },
    #[cfg(feature = "sanitize")]
    #[error("Failed to sanitize the content of article `{slug}`")]
    SanitizeFailed {
        slug: String,
        #[source]
        source: lol_html::errors::RewritingError,
    },
}

#[derive(Error)]
pub enum BuildError {
    #[error(
        "Slug `{slug}` cannot be used as a path segment. Slugs must not contain slashes or be `.` or `..`."
    )]
    UnsafeSlug { slug: String },
    #[error("Failed to write page: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy static file {from} to {to}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "Refusing to clean output directory {output_dir}: it contains {protected}, which the build reads from. Pick another output directory or disable cleaning."
    )]
    UnsafeOutputDir {
        output_dir: PathBuf,
        protected: PathBuf,
    },
}

#[derive(Error)]
pub enum FeuilletError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(ContentError, BuildError, FeuilletError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_uses_display() {
        let err = FeuilletError::from(ContentError::DuplicateSlug {
            slug: "hello-world".to_string(),
        });

        assert_eq!(format!("{:?}", err), format!("{}", err));
        assert!(format!("{:?}", err).contains("`hello-world`"));
    }

    #[test]
    fn test_source_is_kept() {
        use std::error::Error;

        let err = BuildError::WriteFailed {
            path: PathBuf::from("dist/index.html"),
            source: std::io::Error::other("disk full"),
        };

        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }

    #[test]
    fn test_copy_failed_names_both_paths() {
        let err = BuildError::CopyFailed {
            from: PathBuf::from("static/favicon.ico"),
            to: PathBuf::from("dist/favicon.ico"),
            source: std::io::Error::other("permission denied"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to copy static file static/favicon.ico to dist/favicon.ico"
        );
    }
}
