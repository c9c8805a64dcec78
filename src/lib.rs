//! # Relocate Library
//!
//! 在打包/内联过程中，HTML 文档会从输入位置移动到新的输出位置。
//! 这个库负责重写文档中的相对引用，使其在新位置依然正确。
//!
//! ## 模块组织
//!
//! - `core` - 主要处理逻辑：`<base>` 处理、资源路径计算、属性/样式/脚本重写
//! - `config` - 可注入的选择器与正则表配置
//! - `env` - 环境变量配置
//! - `parsers` - HTML、CSS、JavaScript 文本的解析与重写
//! - `utils` - 路径与 URL 工具函数

pub mod config;
pub mod core;
pub mod env;
pub mod parsers;
pub mod utils;

// Re-export commonly used items for convenience
pub use self::config::{RewriteConfig, RewriteConfigBuilder, UrlAttributeRule};
pub use self::core::{
    compute_asset_path, relocate_html, resolve_paths, resolve_paths_with, rewrite_rel_path,
    rewrite_rel_path_with, RelocateError, RelocateOptions,
};
pub use self::parsers::{
    extract_base_url, html_to_dom, rewrite_module_dependencies, rewrite_url, rewrite_url_with,
    serialize_document, CompiledSelector, Document, Element,
};
pub use self::utils::{is_remote_url, resolve_reference};
