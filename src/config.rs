//! 重写表配置
//!
//! 哪些元素和属性携带 URL、哪些元素是内联样式/脚本、哪些值是模板占位符……
//! 这些都不是算法本身的一部分，而是一张可注入的表。`RewriteConfig` 是这张表
//! 编译后的不可变形式，`RewriteConfigBuilder` 用于替换其中任意一项。

use std::sync::OnceLock;

use regex::Regex;

use crate::core::RelocateError;
use crate::env::{rewrite, EnvVar};
use crate::parsers::html::dom::CompiledSelector;

/// `<base>` 声明
pub const DEFAULT_BASE_SELECTOR: &str = "base";
/// 携带 URL 的属性
pub const DEFAULT_URL_ATTRIBUTES: &[&str] = &["href", "src", "action", "style"];
/// 内联样式元素
pub const DEFAULT_INLINE_STYLE_SELECTOR: &str = r#"style:not([type]), style[type="text/css"]"#;
/// 需要标记资源路径的结构元素
pub const DEFAULT_ASSET_ELEMENT_SELECTOR: &str = "polymer-element";
/// 写入结构元素的资源路径属性
pub const DEFAULT_ASSET_PATH_ATTRIBUTE: &str = "assetpath";
/// 内联脚本元素
pub const DEFAULT_INLINE_SCRIPT_SELECTOR: &str =
    r#"script:not([type]):not([src]), script[type="text/javascript"]:not([src])"#;
/// 模板表达式占位符
pub const DEFAULT_TEMPLATE_PATTERN: &str = r"\{\{.*\}\}";
/// 已经是绝对形式、不需要重写的 URL：带协议、协议相对、根路径、纯片段、纯查询
pub const DEFAULT_ABSOLUTE_URL_PATTERN: &str = r"^(?:[a-zA-Z][a-zA-Z0-9+.\-]*:|/|#|\?)";
/// CSS 中的 `url(...)` 记号
pub const DEFAULT_CSS_URL_PATTERN: &str = r"url\([^)]*\)";
/// 模块加载器命名空间
pub const DEFAULT_MODULE_NAMESPACE: &str = "Flipper";
/// 模块依赖声明的调用名
pub const DEFAULT_MODULE_CALLS: &[&str] = &["define", "register"];

/// 一条 URL 属性规则：匹配选择器的元素上，这些属性的值是 URL
#[derive(Debug)]
pub struct UrlAttributeRule {
    pub selector: CompiledSelector,
    pub attributes: Vec<String>,
}

/// 编译后的重写表
#[derive(Debug)]
pub struct RewriteConfig {
    base_selector: CompiledSelector,
    url_attribute_rules: Vec<UrlAttributeRule>,
    inline_style_selector: CompiledSelector,
    asset_element_selector: CompiledSelector,
    asset_path_attribute: String,
    inline_script_selector: CompiledSelector,
    template_pattern: Regex,
    absolute_url_pattern: Regex,
    css_url_pattern: Regex,
    module_dependency_pattern: Regex,
}

impl RewriteConfig {
    /// 创建一个以默认表为起点的构建器
    pub fn builder() -> RewriteConfigBuilder {
        RewriteConfigBuilder::default()
    }

    /// 进程内共享的默认重写表
    pub fn shared() -> &'static RewriteConfig {
        static SHARED: OnceLock<RewriteConfig> = OnceLock::new();
        SHARED.get_or_init(RewriteConfig::default)
    }

    /// 以默认表为起点，应用环境变量中的覆盖项
    ///
    /// 读取 `RELOCATE_MODULE_NAMESPACE`、`RELOCATE_MODULE_CALLS` 和 `RELOCATE_TEMPLATE_PATTERN`。
    pub fn from_env() -> Result<Self, RelocateError> {
        Self::builder()
            .module_namespace(rewrite::ModuleNamespace::get()?)
            .module_calls(rewrite::ModuleCalls::get()?)
            .template_pattern(rewrite::TemplatePattern::get()?)
            .build()
    }

    pub fn base_selector(&self) -> &CompiledSelector {
        &self.base_selector
    }

    pub fn url_attribute_rules(&self) -> &[UrlAttributeRule] {
        &self.url_attribute_rules
    }

    pub fn inline_style_selector(&self) -> &CompiledSelector {
        &self.inline_style_selector
    }

    pub fn asset_element_selector(&self) -> &CompiledSelector {
        &self.asset_element_selector
    }

    pub fn asset_path_attribute(&self) -> &str {
        &self.asset_path_attribute
    }

    pub fn inline_script_selector(&self) -> &CompiledSelector {
        &self.inline_script_selector
    }

    pub fn template_pattern(&self) -> &Regex {
        &self.template_pattern
    }

    pub fn absolute_url_pattern(&self) -> &Regex {
        &self.absolute_url_pattern
    }

    pub fn css_url_pattern(&self) -> &Regex {
        &self.css_url_pattern
    }

    /// 捕获组 1 为调用开头直到 `[`，2 为数组内容，3 为 `]`
    pub fn module_dependency_pattern(&self) -> &Regex {
        &self.module_dependency_pattern
    }

    /// 值中是否含有模板表达式
    pub fn is_template(&self, value: &str) -> bool {
        self.template_pattern.is_match(value)
    }

    /// 值是否已经是绝对 URL
    pub fn is_absolute_url(&self, value: &str) -> bool {
        self.absolute_url_pattern.is_match(value)
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        RewriteConfigBuilder::default()
            .build()
            .expect("default rewrite table must compile")
    }
}

/// 重写表构建器
#[derive(Debug, Clone)]
pub struct RewriteConfigBuilder {
    base_selector: String,
    url_attribute_rules: Vec<(String, Vec<String>)>,
    inline_style_selector: String,
    asset_element_selector: String,
    asset_path_attribute: String,
    inline_script_selector: String,
    template_pattern: String,
    absolute_url_pattern: String,
    css_url_pattern: String,
    module_namespace: String,
    module_calls: Vec<String>,
}

impl Default for RewriteConfigBuilder {
    fn default() -> Self {
        let url_attributes: Vec<String> =
            DEFAULT_URL_ATTRIBUTES.iter().map(|s| s.to_string()).collect();
        let url_selector = url_attributes
            .iter()
            .map(|attr| format!("[{attr}]"))
            .collect::<Vec<_>>()
            .join(",");

        Self {
            base_selector: DEFAULT_BASE_SELECTOR.to_string(),
            url_attribute_rules: vec![(url_selector, url_attributes)],
            inline_style_selector: DEFAULT_INLINE_STYLE_SELECTOR.to_string(),
            asset_element_selector: DEFAULT_ASSET_ELEMENT_SELECTOR.to_string(),
            asset_path_attribute: DEFAULT_ASSET_PATH_ATTRIBUTE.to_string(),
            inline_script_selector: DEFAULT_INLINE_SCRIPT_SELECTOR.to_string(),
            template_pattern: DEFAULT_TEMPLATE_PATTERN.to_string(),
            absolute_url_pattern: DEFAULT_ABSOLUTE_URL_PATTERN.to_string(),
            css_url_pattern: DEFAULT_CSS_URL_PATTERN.to_string(),
            module_namespace: DEFAULT_MODULE_NAMESPACE.to_string(),
            module_calls: DEFAULT_MODULE_CALLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RewriteConfigBuilder {
    pub fn base_selector(mut self, selector: impl Into<String>) -> Self {
        self.base_selector = selector.into();
        self
    }

    /// 替换全部 URL 属性规则
    pub fn url_attribute_rules<S, A>(mut self, rules: impl IntoIterator<Item = (S, Vec<A>)>) -> Self
    where
        S: Into<String>,
        A: Into<String>,
    {
        self.url_attribute_rules = rules
            .into_iter()
            .map(|(selector, attributes)| {
                (
                    selector.into(),
                    attributes.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        self
    }

    /// 追加一条 URL 属性规则
    pub fn add_url_attribute_rule<A>(mut self, selector: impl Into<String>, attributes: Vec<A>) -> Self
    where
        A: Into<String>,
    {
        self.url_attribute_rules.push((
            selector.into(),
            attributes.into_iter().map(Into::into).collect(),
        ));
        self
    }

    pub fn inline_style_selector(mut self, selector: impl Into<String>) -> Self {
        self.inline_style_selector = selector.into();
        self
    }

    pub fn asset_element_selector(mut self, selector: impl Into<String>) -> Self {
        self.asset_element_selector = selector.into();
        self
    }

    pub fn asset_path_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.asset_path_attribute = attribute.into();
        self
    }

    pub fn inline_script_selector(mut self, selector: impl Into<String>) -> Self {
        self.inline_script_selector = selector.into();
        self
    }

    pub fn template_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.template_pattern = pattern.into();
        self
    }

    pub fn absolute_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.absolute_url_pattern = pattern.into();
        self
    }

    pub fn css_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.css_url_pattern = pattern.into();
        self
    }

    pub fn module_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.module_namespace = namespace.into();
        self
    }

    pub fn module_calls<A: Into<String>>(mut self, calls: Vec<A>) -> Self {
        self.module_calls = calls.into_iter().map(Into::into).collect();
        self
    }

    /// 校验并编译所有选择器与正则
    pub fn build(self) -> Result<RewriteConfig, RelocateError> {
        if self.module_namespace.is_empty() || self.module_calls.is_empty() {
            return Err(RelocateError::InvalidConfig(
                "module namespace and at least one module call name are required".to_string(),
            ));
        }

        if self.asset_path_attribute.is_empty() {
            return Err(RelocateError::InvalidConfig(
                "asset path attribute name must not be empty".to_string(),
            ));
        }

        let url_attribute_rules = self
            .url_attribute_rules
            .iter()
            .map(|(selector, attributes)| -> Result<_, RelocateError> {
                Ok(UrlAttributeRule {
                    selector: CompiledSelector::compile(selector)?,
                    attributes: attributes.clone(),
                })
            })
            .collect::<Result<Vec<_>, RelocateError>>()?;

        let module_calls = self
            .module_calls
            .iter()
            .map(|call| regex::escape(call))
            .collect::<Vec<_>>()
            .join("|");
        let module_dependency_pattern = format!(
            r"({}\.(?:{})[^\[]+\[)([\w\W]*?)(\])",
            regex::escape(&self.module_namespace),
            module_calls
        );

        Ok(RewriteConfig {
            base_selector: CompiledSelector::compile(&self.base_selector)?,
            url_attribute_rules,
            inline_style_selector: CompiledSelector::compile(&self.inline_style_selector)?,
            asset_element_selector: CompiledSelector::compile(&self.asset_element_selector)?,
            asset_path_attribute: self.asset_path_attribute,
            inline_script_selector: CompiledSelector::compile(&self.inline_script_selector)?,
            template_pattern: compile("template", &self.template_pattern)?,
            absolute_url_pattern: compile("absolute URL", &self.absolute_url_pattern)?,
            css_url_pattern: compile("CSS URL", &self.css_url_pattern)?,
            module_dependency_pattern: compile("module dependency", &module_dependency_pattern)?,
        })
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex, RelocateError> {
    Regex::new(pattern).map_err(|source| RelocateError::Pattern { name, source })
}
