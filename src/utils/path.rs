//! 文件系统路径工具
//!
//! 所有函数都是纯字符串/词法运算，不访问文件系统。输出一律使用正斜杠，
//! 因为结果会被直接写回 HTML 文档。

use std::path::{Path, PathBuf};

use path_clean::clean;
use pathdiff::diff_paths;

/// 将路径中的反斜杠统一替换为正斜杠
pub fn unix_path(path: &str) -> String {
    path.replace('\\', "/")
}

fn to_unix_string(path: &Path) -> String {
    unix_path(&path.to_string_lossy())
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// 检查路径是否为绝对路径（`/` 开头，或 Windows 盘符开头）
pub fn is_absolute_path(path: &str) -> bool {
    let path = unix_path(path);
    path.starts_with('/') || has_drive_prefix(&path)
}

/// 获取路径最后一段的扩展名（包含 `.`）
///
/// 以 `.` 开头且没有其他 `.` 的文件名（如 `.hidden`）没有扩展名，返回空字符串。
///
/// ```
/// use relocate::utils::path::extname;
///
/// assert_eq!(extname("lib/module.js"), ".js");
/// assert_eq!(extname("./module"), "");
/// assert_eq!(extname("dir.d/file"), "");
/// assert_eq!(extname(".hidden"), "");
/// ```
pub fn extname(path: &str) -> &str {
    let segment = match path.rfind(['/', '\\']) {
        Some(index) => &path[index + 1..],
        None => path,
    };

    match segment.rfind('.') {
        Some(0) | None => "",
        Some(index) => &segment[index..],
    }
}

/// 获取一个文档位置所对应的目录
///
/// 以分隔符结尾、或最后一段没有扩展名的位置被视为目录本身；
/// 否则视为文件，返回其父目录。
pub fn location_dir(location: &str) -> String {
    let location = unix_path(location);

    if location.ends_with('/') {
        let trimmed = location.trim_end_matches('/');
        return if trimmed.is_empty() || (trimmed.len() == 2 && has_drive_prefix(&location)) {
            format!("{trimmed}/")
        } else {
            trimmed.to_string()
        };
    }

    if extname(&location).is_empty() {
        return location;
    }

    match location.rfind('/') {
        Some(0) => "/".to_string(),
        Some(index) if index == 2 && has_drive_prefix(&location) => location[..=index].to_string(),
        Some(index) => location[..index].to_string(),
        None => ".".to_string(),
    }
}

/// 将 `reference` 相对于目录 `dir` 解析为规范化的路径
///
/// 若 `reference` 本身是绝对路径，则直接规范化后返回。
pub fn resolve_path(dir: &str, reference: &str) -> String {
    let reference = unix_path(reference);

    let joined: PathBuf = if is_absolute_path(&reference) {
        PathBuf::from(reference)
    } else {
        Path::new(&unix_path(dir)).join(reference)
    };

    to_unix_string(&clean(joined))
}

/// 计算从目录 `from` 到 `to` 的相对路径
///
/// 两者相同时返回空字符串。
///
/// ```
/// use relocate::utils::path::relative_path;
///
/// assert_eq!(relative_path("/site/dist", "/site/src/img/a.png"), "../src/img/a.png");
/// assert_eq!(relative_path("/site/src", "/site/src"), "");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let from = clean(unix_path(from));
    let to = clean(unix_path(to));

    match diff_paths(&to, &from) {
        Some(relative) => to_unix_string(&relative),
        None => to_unix_string(&to),
    }
}

/// 去掉 `absolute` 开头的字面前缀 `baseline`
///
/// 这是纯字符串前缀匹配，不考虑路径语义：`baseline` 不是 `absolute` 的前缀时原样返回。
pub fn rebase_path<'a>(absolute: &'a str, baseline: &str) -> &'a str {
    absolute.strip_prefix(baseline).unwrap_or(absolute)
}
