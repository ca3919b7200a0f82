use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

#[derive(Debug, PartialEq)]
pub struct ParameterDef {
    pub(crate) key: String,
    pub(crate) index: usize,
    pub(crate) length: usize,
}

/// Values for the bracketed parameters of a route, e.g. `slug` in `/articles/[slug]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteParams(pub FxHashMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

pub fn extract_params_from_raw_route(raw_route: &str) -> Vec<ParameterDef> {
    let mut params = Vec::new();
    let mut start = 0;

    while let Some(bracket_pos) = raw_route[start..].find('[') {
        let abs_pos = start + bracket_pos;

        // Escaped if preceded by an odd number of backslashes
        let backslash_count = raw_route[..abs_pos]
            .chars()
            .rev()
            .take_while(|&c| c == '\\')
            .count();

        if backslash_count % 2 == 1 {
            start = abs_pos + 1;
            continue;
        }

        if let Some(end_bracket) = raw_route[abs_pos + 1..].find(']') {
            let end_pos = abs_pos + 1 + end_bracket;
            let key = raw_route[abs_pos + 1..end_pos].to_string();

            params.push(ParameterDef {
                key,
                index: abs_pos,
                length: end_pos - abs_pos + 1,
            });

            start = end_pos + 1;
        } else {
            break;
        }
    }

    params
}

fn substitute_params(route_template: &str, params_def: &[ParameterDef], params: &RouteParams) -> String {
    let mut result = route_template.to_string();

    // Replace from the end so earlier indices stay valid.
    for param_def in params_def.iter().rev() {
        let value = params.0.get(&param_def.key).unwrap_or_else(|| {
            panic!(
                "Route {:?} is missing parameter {:?}",
                route_template, param_def.key
            )
        });

        result.replace_range(param_def.index..param_def.index + param_def.length, value);
    }

    result
}

/// Builds the URL of a route. Parameter values are inserted as-is: `/articles/[slug]` with an empty slug gives
/// `/articles/`.
pub fn build_url_with_params(route_template: &str, params: &RouteParams) -> String {
    let params_def = extract_params_from_raw_route(route_template);

    if params_def.is_empty() {
        return route_template.to_string();
    }

    substitute_params(route_template, &params_def, params)
}

/// Builds the path of the file a route is written to, always an `index.html` inside a directory named after the route.
pub fn build_file_path_with_params(route_template: &str, params: &RouteParams, output_dir: &Path) -> PathBuf {
    let params_def = extract_params_from_raw_route(route_template);
    let route = substitute_params(route_template, &params_def, params);

    let mut path = PathBuf::from(output_dir);
    path.extend(route.split('/').filter(|s| !s.is_empty()));
    path.push("index.html");

    path
}

/// Whether `value` can be used as a single path segment of an output file.
pub fn is_safe_path_segment(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(['/', '\\'])
        && !value.chars().any(|c| c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_params() {
        let input = "/articles/[slug]";
        let expected = vec![ParameterDef {
            key: "slug".to_string(),
            index: 10,
            length: 6,
        }];

        assert_eq!(extract_params_from_raw_route(input), expected);
    }

    #[test]
    fn test_extract_params_no_params() {
        let expected: Vec<ParameterDef> = Vec::new();

        assert_eq!(extract_params_from_raw_route("/"), expected);
        assert_eq!(extract_params_from_raw_route("/articles"), expected);
    }

    #[test]
    fn test_extract_params_escaped() {
        let input = "/articles/\\[slug\\]";
        let expected: Vec<ParameterDef> = Vec::new();

        assert_eq!(extract_params_from_raw_route(input), expected);
    }

    #[test]
    fn test_extract_params_multiple() {
        let input = "/articles/[year]/[slug]";
        let keys: Vec<_> = extract_params_from_raw_route(input)
            .into_iter()
            .map(|def| def.key)
            .collect();

        assert_eq!(keys, vec!["year", "slug"]);
    }

    #[test]
    fn test_url_is_verbatim() {
        let params = RouteParams::new().with("slug", "hello-world");
        assert_eq!(
            build_url_with_params("/articles/[slug]", &params),
            "/articles/hello-world"
        );

        let params = RouteParams::new().with("slug", "");
        assert_eq!(build_url_with_params("/articles/[slug]", &params), "/articles/");
    }

    #[test]
    fn test_url_multiple_parameters_different_lengths() {
        let params = RouteParams::new()
            .with("year", "2024")
            .with("slug", "development-experience");

        assert_eq!(
            build_url_with_params("/articles/[year]/[slug]", &params),
            "/articles/2024/development-experience"
        );
    }

    #[test]
    fn test_url_no_parameters() {
        assert_eq!(build_url_with_params("/", &RouteParams::new()), "/");
    }

    #[test]
    #[should_panic(expected = "missing parameter")]
    fn test_url_missing_parameter_panics() {
        build_url_with_params("/articles/[slug]", &RouteParams::new());
    }

    #[test]
    fn test_file_path_root_route() {
        let path = build_file_path_with_params("/", &RouteParams::new(), Path::new("dist"));

        assert_eq!(path, Path::new("dist").join("index.html"));
    }

    #[test]
    fn test_file_path_single_parameter() {
        let params = RouteParams::new().with("slug", "hello-world");
        let path = build_file_path_with_params("/articles/[slug]", &params, Path::new("dist"));

        assert_eq!(
            path,
            Path::new("dist")
                .join("articles")
                .join("hello-world")
                .join("index.html")
        );
    }

    #[test]
    fn test_is_safe_path_segment() {
        assert!(is_safe_path_segment("hello-world"));
        assert!(is_safe_path_segment("привет-мир"));
        assert!(!is_safe_path_segment(""));
        assert!(!is_safe_path_segment("."));
        assert!(!is_safe_path_segment(".."));
        assert!(!is_safe_path_segment("a/b"));
        assert!(!is_safe_path_segment("a\\b"));
        assert!(!is_safe_path_segment("a\nb"));
    }
}
