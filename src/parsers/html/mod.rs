//! HTML 解析和处理模块
//!
//! - `dom`: DOM 能力接口（`Document` / `Element`）、选择器编译及 kuchikiki 实现
//! - `metadata`: `<base>` 声明的提取与移除
//! - `serializer`: 序列化功能

pub mod dom;
pub mod metadata;
pub mod serializer;

pub use dom::{html_to_dom, select_nodes, CompiledSelector, Document, Element};
pub use metadata::extract_base_url;
pub use serializer::serialize_document;
