//! # 工具模块
//!
//! 这个模块包含路径与 URL 的基础工具函数：
//!
//! - 文件系统路径的解析、求相对路径和分隔符规范化
//! - 旧式（相对基准也可用的）URL 引用解析
//! - 绝对 URL / 远程 URL 判断
//!
//! # 模块组织
//!
//! - `path` - 路径工具函数
//! - `url` - URL 引用解析工具函数

pub mod path;
pub mod url;

// Re-export commonly used items for convenience
pub use self::path::{
    extname, is_absolute_path, location_dir, rebase_path, relative_path, resolve_path, unix_path,
};
pub use self::url::{is_remote_url, resolve_reference};
