//! 内联脚本中的模块依赖重写
//!
//! 组件脚本通过 `Flipper.define(name, [dep1, dep2])` 或 `Flipper.register(...)`
//! 声明依赖模块。依赖列表中的静态相对路径是相对于原文档位置写的，
//! 文档移动后需要相对于新位置重新计算。
//!
//! 依赖列表只按顶层逗号切分，不理解嵌套括号或字符串内的逗号：
//! 这类输入可能被错误切分，这是已知的限制。

use regex::Captures;
use tracing::trace;

use crate::config::RewriteConfig;
use crate::utils::path::{extname, location_dir, relative_path, resolve_path};

/// 重写脚本文本中所有依赖声明里的静态相对模块路径
///
/// 依赖数组之外的文本保持不变；数组中的条目以 `, ` 重新连接。
///
/// ```
/// use relocate::parsers::js::rewrite_module_dependencies;
/// use relocate::RewriteConfig;
///
/// let script = "Flipper.register('x-foo', ['./foo', somevar, 'polymer'])";
/// let rewritten = rewrite_module_dependencies(
///     RewriteConfig::shared(),
///     "/a/b/c.html",
///     "/a/x/y.html",
///     script,
/// );
/// assert_eq!(
///     rewritten,
///     "Flipper.register('x-foo', ['../b/foo.js',  somevar, 'polymer'])"
/// );
/// ```
pub fn rewrite_module_dependencies(
    config: &RewriteConfig,
    input: &str,
    output: &str,
    script_text: &str,
) -> String {
    let input_dir = location_dir(input);
    let output_dir = location_dir(output);

    config
        .module_dependency_pattern()
        .replace_all(script_text, |caps: &Captures| {
            let entries: Vec<String> = caps[2]
                .split(',')
                .map(|entry| {
                    if is_static_string(entry.trim()) {
                        rebase_module_path(&input_dir, &output_dir, entry)
                    } else {
                        entry.to_string()
                    }
                })
                .collect();

            format!("{}{}{}", &caps[1], entries.join(", "), &caps[3])
        })
        .into_owned()
}

/// 检查条目是否是被同一种引号完整包裹的字符串字面量
fn is_static_string(entry: &str) -> bool {
    let mut chars = entry.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first @ ('\'' | '"')), Some(last)) => first == last && entry.len() > 2,
        _ => false,
    }
}

/// 把一个带引号的依赖条目改写为相对于输出目录的路径
///
/// 非相对路径（不以 `.` 开头，例如裸模块名）原样返回；
/// 没有扩展名时补上 `.js`；结果总是以 `.` 开头，并用单引号包裹。
pub fn rebase_module_path(input_dir: &str, output_dir: &str, entry: &str) -> String {
    let entry = entry.trim();
    if !is_static_string(entry) {
        return entry.to_string();
    }

    let rel = &entry[1..entry.len() - 1];
    if !rel.starts_with('.') {
        return entry.to_string();
    }

    let rel = if extname(rel).is_empty() {
        format!("{rel}.js")
    } else {
        rel.to_string()
    };

    let mut result = relative_path(output_dir, &resolve_path(input_dir, &rel));
    if !result.starts_with('.') {
        result = format!("./{result}");
    }

    trace!(from = %rel, to = %result, "rebased module dependency");

    format!("'{result}'")
}
