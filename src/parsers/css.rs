//! CSS 文本中的 `url(...)` 重写
//!
//! 内联 `<style>` 元素和 `style` 属性里的 `url(...)` 引用都按文档的相对路径解析，
//! 文档移动后需要重新计算。这里不做完整的 CSS 解析，只按重写表中的正则定位
//! `url(...)` 记号，逐个交给相对路径重写。
//!
//! ```
//! use relocate::parsers::css::rewrite_url;
//!
//! let css = rewrite_url(
//!     "/site/src/page.html",
//!     "/site/dist/out.html",
//!     "background:url('img/a.png')",
//!     None,
//!     None,
//! );
//! assert_eq!(css, "background:url(\"../src/img/a.png\")");
//! ```

use regex::Captures;
use tracing::trace;

use crate::config::RewriteConfig;
use crate::core::rewrite_rel_path_with;

/// 使用默认重写表重写 CSS 文本中的所有 `url(...)` 记号
pub fn rewrite_url(
    input: &str,
    output: &str,
    css_text: &str,
    abspath: Option<&str>,
    base_url: Option<&str>,
) -> String {
    rewrite_url_with(
        RewriteConfig::shared(),
        input,
        output,
        css_text,
        abspath,
        base_url,
    )
}

/// 使用指定重写表重写 CSS 文本中的所有 `url(...)` 记号
///
/// 每个记号去掉引号和 `url(` / `)` 包装后按相对路径重写，
/// 结果总是用双引号重新包装：`url("<新路径>")`。
pub fn rewrite_url_with(
    config: &RewriteConfig,
    input: &str,
    output: &str,
    css_text: &str,
    abspath: Option<&str>,
    base_url: Option<&str>,
) -> String {
    config
        .css_url_pattern()
        .replace_all(css_text, |caps: &Captures| {
            let token = caps[0].replace(['"', '\''], "");
            let reference = token
                .get(4..token.len().saturating_sub(1))
                .unwrap_or_default()
                .trim();

            let rewritten = rewrite_rel_path_with(config, input, output, reference, abspath, base_url);
            trace!(from = reference, to = %rewritten, "rewrote css url");

            format!("url(\"{rewritten}\")")
        })
        .into_owned()
}
