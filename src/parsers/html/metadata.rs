//! HTML 文档元数据处理
//!
//! 文档移动位置后，`<base>` 声明不能再保留在输出中：它描述的是原始位置下的解析基准。
//! 这里把它从文档中取出，转成之后路径解析时要叠加的 base URL 片段。

use tracing::debug;

use super::dom::{CompiledSelector, Document, Element};

/// 提取并移除文档的 `<base>` 声明
///
/// 只有第一个匹配的元素的 `href` 有效（与浏览器行为一致），但所有匹配的元素都会被删除。
/// `href` 为空或缺失时返回空字符串，表示没有 base URL。
/// 非空时返回值总是以且仅以一个 `/` 结尾。
///
/// # 参数
///
/// * `document` - 要处理的文档
/// * `selector` - 匹配 base 声明的选择器，通常是 `base`
///
/// # 返回值
///
/// base URL 片段，例如 `<base href="sub">` 得到 `sub/`
pub fn extract_base_url<D: Document>(document: &D, selector: &CompiledSelector) -> String {
    let base_nodes = document.select_elements(selector);

    let base_url = base_nodes
        .first()
        .and_then(|base_node| base_node.attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .map(|href| {
            if href.ends_with('/') {
                href
            } else {
                format!("{href}/")
            }
        })
        .unwrap_or_default();

    for base_node in &base_nodes {
        base_node.remove();
    }

    if !base_nodes.is_empty() {
        debug!(
            base_url = %base_url,
            removed = base_nodes.len(),
            "removed base declaration"
        );
    }

    base_url
}
