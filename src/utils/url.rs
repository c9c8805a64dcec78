//! URL 引用解析工具
//!
//! `<base href>` 的值和资源路径往往都是相对的（例如 `sub/` 或 `../src/`），
//! 而 `url::Url` 只接受绝对基准。这里实现与浏览器一致的"旧式"解析：
//! 基准是绝对 URL 时交给 `url` crate，基准是相对路径时按路径段词法合并，
//! 并保留无法抵消的前导 `..`。

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

fn remote_url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Two or more scheme characters, so that Windows drive letters are not mistaken for a scheme
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[a-zA-Z][a-zA-Z0-9+.\-]+:|//)").expect("invalid remote URL regex")
    })
}

/// 检查值是否带有协议（`https:`、`data:` 等）或是协议相对 URL（`//host/...`）
pub fn is_remote_url(value: &str) -> bool {
    remote_url_pattern().is_match(value)
}

/// 把 `reference` 按 URL 语义相对于 `base` 解析
///
/// ```
/// use relocate::utils::url::resolve_reference;
///
/// assert_eq!(resolve_reference("sub/", "img/a.png"), "sub/img/a.png");
/// assert_eq!(resolve_reference("../src/", "sub/"), "../src/sub/");
/// assert_eq!(resolve_reference("sub/", "../../a.png"), "../a.png");
/// assert_eq!(resolve_reference("https://cdn.example.com/x/", "a.png"), "https://cdn.example.com/x/a.png");
/// assert_eq!(resolve_reference("//cdn.example.com/x/", "a.png"), "//cdn.example.com/x/a.png");
/// ```
pub fn resolve_reference(base: &str, reference: &str) -> String {
    if is_remote_url(reference) && !reference.starts_with("//") {
        return reference.to_string();
    }

    // protocol-relative base: join under a placeholder scheme, then drop it again
    if base.starts_with("//") {
        let placeholder = format!("http:{base}");
        if let Ok(joined) = Url::parse(&placeholder).and_then(|base_url| base_url.join(reference)) {
            let joined = joined.to_string();
            return joined.strip_prefix("http:").unwrap_or(&joined).to_string();
        }
    } else if is_remote_url(base) {
        if let Ok(joined) = Url::parse(base).and_then(|base_url| base_url.join(reference)) {
            return joined.to_string();
        }
    }

    if reference.starts_with("//") {
        return reference.to_string();
    }

    let (base_path, _) = split_suffix(base);

    if reference.is_empty() {
        return base_path.to_string();
    }

    let (reference_path, suffix) = split_suffix(reference);

    if reference_path.is_empty() {
        return format!("{base_path}{suffix}");
    }

    let joined = if reference_path.starts_with('/') {
        reference_path.to_string()
    } else {
        let base_dir = match base_path.rfind('/') {
            Some(index) => &base_path[..=index],
            None => "",
        };
        format!("{base_dir}{reference_path}")
    };

    let last_segment = reference_path.rsplit('/').next().unwrap_or_default();
    let keep_trailing_slash =
        reference_path.ends_with('/') || last_segment == "." || last_segment == "..";

    let mut resolved = normalize_segments(&joined);
    if keep_trailing_slash && !resolved.is_empty() && !resolved.ends_with('/') {
        resolved.push('/');
    }

    format!("{resolved}{suffix}")
}

/// 把 `?query` / `#fragment` 与路径部分拆开
fn split_suffix(value: &str) -> (&str, &str) {
    match value.find(['?', '#']) {
        Some(index) => value.split_at(index),
        None => (value, ""),
    }
}

/// 词法消除 `.` 与 `..` 路径段
///
/// 以 `/` 开头的路径不能越过根目录；相对路径保留无法抵消的前导 `..`。
fn normalize_segments(path: &str) -> String {
    let anchored = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !anchored {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if anchored {
        format!("/{joined}")
    } else {
        joined
    }
}
