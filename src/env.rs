//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问。重写表中可由环境覆盖的部分
//! （模块加载器命名空间、调用名、模板表达式）都在这里定义。

use std::env;
use std::fmt;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 重写表相关环境变量
pub mod rewrite {
    use super::*;
    use crate::config::{DEFAULT_MODULE_CALLS, DEFAULT_MODULE_NAMESPACE, DEFAULT_TEMPLATE_PATTERN};

    /// 模块加载器命名空间
    pub struct ModuleNamespace;
    impl EnvVar<String> for ModuleNamespace {
        const NAME: &'static str = "RELOCATE_MODULE_NAMESPACE";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(DEFAULT_MODULE_NAMESPACE.to_string()),
            }
        }
        const DESCRIPTION: &'static str =
            "Identifier qualifying module dependency calls, e.g. Flipper in Flipper.define(...)";

        fn parse(value: &str) -> EnvResult<String> {
            let namespace = value.trim();
            if is_identifier_path(namespace) {
                Ok(namespace.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("'{}' is not a valid identifier", value),
                })
            }
        }
    }

    /// 模块依赖声明的调用名
    pub struct ModuleCalls;
    impl EnvVar<Vec<String>> for ModuleCalls {
        const NAME: &'static str = "RELOCATE_MODULE_CALLS";
        const DEFAULT: Option<Vec<String>> = None;

        fn get() -> EnvResult<Vec<String>> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(DEFAULT_MODULE_CALLS.iter().map(|s| s.to_string()).collect()),
            }
        }
        const DESCRIPTION: &'static str = "Module dependency call names (comma-separated)";

        fn parse(value: &str) -> EnvResult<Vec<String>> {
            let calls: Vec<String> = value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();

            if calls.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "At least one call name is required".to_string(),
                });
            }

            if let Some(invalid) = calls.iter().find(|call| !is_identifier_path(call)) {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("'{}' is not a valid identifier", invalid),
                });
            }

            Ok(calls)
        }
    }

    /// 模板表达式正则
    pub struct TemplatePattern;
    impl EnvVar<String> for TemplatePattern {
        const NAME: &'static str = "RELOCATE_TEMPLATE_PATTERN";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(DEFAULT_TEMPLATE_PATTERN.to_string()),
            }
        }
        const DESCRIPTION: &'static str =
            "Regular expression for template placeholders that must not be rewritten";

        fn parse(value: &str) -> EnvResult<String> {
            if value.trim().is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Pattern must not be empty".to_string(),
                });
            }
            Ok(value.to_string())
        }
    }

    fn is_identifier_path(value: &str) -> bool {
        !value.is_empty()
            && value.split('.').all(|part| {
                let mut chars = part.chars();
                chars
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            })
    }
}
