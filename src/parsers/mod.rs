//! # 解析器模块
//!
//! 这个模块包含文档中各类引用的定位与重写：
//!
//! - `html` - DOM 能力接口、选择器查询、`<base>` 处理、序列化
//! - `css` - CSS 文本中的 `url(...)` 重写
//! - `js` - 内联脚本中模块依赖列表的重写

pub mod css;
pub mod html;
pub mod js;

// Re-export commonly used items for convenience
pub use css::{rewrite_url, rewrite_url_with};
pub use html::{
    extract_base_url, html_to_dom, serialize_document, CompiledSelector, Document, Element,
};
pub use js::{rebase_module_path, rewrite_module_dependencies};
