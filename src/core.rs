use thiserror::Error;
use tracing::{debug, trace};

use crate::config::RewriteConfig;
use crate::env::EnvError;
use crate::parsers::css::rewrite_url_with;
use crate::parsers::html::{extract_base_url, html_to_dom, serialize_document, Document, Element};
use crate::parsers::js::rewrite_module_dependencies;
use crate::utils::path::{location_dir, rebase_path, relative_path, resolve_path, unix_path};
use crate::utils::url::{is_remote_url, resolve_reference};

/// Represents errors that can occur around document relocation
///
/// The rewrite itself never fails; errors come from building a rewrite
/// table, reading environment configuration or serializing the result.
#[derive(Debug, Error)]
pub enum RelocateError {
    #[error("invalid selector '{0}'")]
    Selector(String),
    #[error("invalid {name} pattern: {source}")]
    Pattern {
        name: &'static str,
        source: regex::Error,
    },
    #[error("invalid rewrite configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Env(#[from] EnvError),
    #[error("unable to serialize document: {0}")]
    Serialize(#[source] std::io::Error),
}

/// Locations of a document being relocated
///
/// `input` and `output` may name either the document file or its directory.
/// When `abspath` is set, rewritten references are rooted at it instead of
/// being relative to `output`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelocateOptions {
    pub input: String,
    pub output: String,
    pub abspath: Option<String>,
    pub encoding: Option<String>,
}

impl RelocateOptions {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        RelocateOptions {
            input: input.into(),
            output: output.into(),
            ..Default::default()
        }
    }

    pub fn with_abspath(mut self, abspath: impl Into<String>) -> Self {
        self.abspath = Some(abspath.into());
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Rewrites every relative reference of a document moved from `input` to `output`
///
/// Uses the shared default rewrite table. See [`resolve_paths_with`].
pub fn resolve_paths<D: Document>(document: &D, input: &str, output: &str, abspath: Option<&str>) {
    resolve_paths_with(RewriteConfig::shared(), document, input, output, abspath)
}

/// Rewrites every relative reference of a document using the given rewrite table
///
/// Runs, in order:
///
/// 1. `<base>` extraction and removal
/// 2. asset path computation
/// 3. URL-bearing attributes (`style` attributes are treated as CSS text)
/// 4. inline style elements
/// 5. asset path tagging of structural elements
/// 6. module dependency lists of inline scripts
///
/// # Arguments
///
/// * `config` - The rewrite table (selectors and patterns)
/// * `document` - The parsed document, mutated in place
/// * `input` - Original location of the document (file or directory)
/// * `output` - New location of the document (file or directory)
/// * `abspath` - Optional root that rewritten references are anchored to
pub fn resolve_paths_with<D: Document>(
    config: &RewriteConfig,
    document: &D,
    input: &str,
    output: &str,
    abspath: Option<&str>,
) {
    let abspath = non_empty(abspath);

    let base_url = extract_base_url(document, config.base_selector());
    let base_url = non_empty(Some(base_url.as_str()));

    let asset_path = compute_asset_path(input, output, abspath, base_url);
    debug!(input, output, asset_path = %asset_path, "resolving document paths");

    for rule in config.url_attribute_rules() {
        for element in document.select_elements(&rule.selector) {
            for attribute in &rule.attributes {
                let Some(value) = element.attr(attribute) else {
                    continue;
                };
                if value.is_empty() || config.is_template(&value) {
                    continue;
                }

                let rewritten = if attribute == "style" {
                    rewrite_url_with(config, input, output, &value, abspath, base_url)
                } else {
                    rewrite_rel_path_with(config, input, output, &value, abspath, base_url)
                };

                trace!(attribute = %attribute, from = %value, to = %rewritten, "rewrote attribute");
                element.set_attr(attribute, &rewritten);
            }
        }
    }

    // <base href> is anchored to the original document directory
    let (style_input, style_base_url) = match base_url {
        Some(base_url) if !is_remote_url(base_url) => {
            let input_dir = location_dir(input);
            let input_dir = if input_dir.ends_with('/') {
                input_dir
            } else {
                format!("{input_dir}/")
            };
            (resolve_reference(&input_dir, base_url), None)
        }
        other => (input.to_string(), other),
    };

    for element in document.select_elements(config.inline_style_selector()) {
        let text = element.text();
        let rewritten =
            rewrite_url_with(config, &style_input, output, &text, abspath, style_base_url);
        if rewritten != text {
            element.set_text(&rewritten);
        }
    }

    for element in document.select_elements(config.asset_element_selector()) {
        element.set_attr(config.asset_path_attribute(), &asset_path);
    }

    for element in document.select_elements(config.inline_script_selector()) {
        let text = element.text();
        if text.is_empty() {
            continue;
        }

        let rewritten = rewrite_module_dependencies(config, input, output, &text);
        if rewritten != text {
            element.set_text(&rewritten);
        }
    }
}

/// Computes where the relocated document's assets now live
///
/// The result is either empty or ends with exactly one `/`. With `abspath`
/// it is the input directory with the `abspath` prefix stripped, otherwise
/// the path from the output directory to the input directory. A base URL is
/// then resolved against it.
pub fn compute_asset_path(
    input: &str,
    output: &str,
    abspath: Option<&str>,
    base_url: Option<&str>,
) -> String {
    let input_dir = location_dir(input);

    let mut asset_path = match non_empty(abspath) {
        Some(abspath) => rebase_path(&input_dir, &unix_path(abspath)).to_string(),
        None => relative_path(&location_dir(output), &input_dir),
    };

    // a folder, but never the root
    if !asset_path.is_empty() {
        asset_path = format!("{}/", unix_path(&asset_path).trim_end_matches('/'));
    }

    // the asset path is the base here, the base URL the reference
    if let Some(base_url) = non_empty(base_url) {
        asset_path = resolve_reference(&asset_path, base_url);
    }

    asset_path
}

/// Rewrites a single relative reference using the shared default rewrite table
///
/// ```
/// use relocate::rewrite_rel_path;
///
/// assert_eq!(
///     rewrite_rel_path("/proj/pages/a.html", "/proj/out/a.html", "b.png", Some("/proj"), None),
///     "/pages/b.png"
/// );
/// assert_eq!(
///     rewrite_rel_path("/proj/pages/a.html", "/proj/out/a.html", "b.png", None, None),
///     "../pages/b.png"
/// );
/// ```
pub fn rewrite_rel_path(
    input: &str,
    output: &str,
    rel: &str,
    abspath: Option<&str>,
    base_url: Option<&str>,
) -> String {
    rewrite_rel_path_with(RewriteConfig::shared(), input, output, rel, abspath, base_url)
}

/// Rewrites a single relative reference
///
/// Absolute URLs are returned unchanged. Otherwise the reference is resolved
/// against the base URL (if any), then against the input directory, and
/// expressed either relative to the output directory or, with `abspath`,
/// as the absolute target with the `abspath` prefix stripped.
pub fn rewrite_rel_path_with(
    config: &RewriteConfig,
    input: &str,
    output: &str,
    rel: &str,
    abspath: Option<&str>,
    base_url: Option<&str>,
) -> String {
    if config.is_absolute_url(rel) {
        return rel.to_string();
    }

    let rel = match non_empty(base_url) {
        Some(base_url) => resolve_reference(base_url, rel),
        None => rel.to_string(),
    };

    if is_remote_url(&rel) {
        return rel;
    }

    let target = resolve_path(&location_dir(input), &rel);

    let rewritten = match non_empty(abspath) {
        Some(abspath) => rebase_path(&target, &unix_path(abspath)).to_string(),
        None => relative_path(&location_dir(output), &target),
    };

    unix_path(&rewritten)
}

/// Parses an HTML document, rewrites its references and serializes it back
///
/// # Examples
///
/// ```
/// use relocate::{relocate_html, RelocateOptions, RewriteConfig};
///
/// let options = RelocateOptions::new("/site/src/page.html", "/site/dist/page.html");
/// let html = b"<html><body><img src=\"img/a.png\"></body></html>";
///
/// let result = relocate_html(html, &options, RewriteConfig::shared()).unwrap();
/// assert!(String::from_utf8_lossy(&result).contains("src=\"../src/img/a.png\""));
/// ```
pub fn relocate_html(
    html: &[u8],
    options: &RelocateOptions,
    config: &RewriteConfig,
) -> Result<Vec<u8>, RelocateError> {
    let encoding = options.encoding.as_deref().unwrap_or("utf-8");
    let dom = html_to_dom(html, encoding);

    resolve_paths_with(
        config,
        &dom,
        &options.input,
        &options.output,
        options.abspath.as_deref(),
    );

    serialize_document(dom, encoding)
}
