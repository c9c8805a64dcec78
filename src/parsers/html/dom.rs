//! DOM 能力接口及其基于 `kuchikiki` 的实现
//!
//! 路径重写只需要很少的 DOM 能力：按选择器查询元素，读写属性，读写文本，删除元素。
//! `Document` / `Element` 两个 trait 描述这些能力，`NodeRef` 与 `NodeDataRef<ElementData>`
//! 实现它们。选择器的解析与匹配交给 `kuchikiki`（即 `selectors` crate）。

use std::fmt;

use encoding_rs::Encoding;
use kuchikiki::traits::*;
use kuchikiki::{ElementData, NodeDataRef, NodeRef, Selectors};

use crate::core::RelocateError;

/// 编译后的选择器列表，保留原始文本用于显示和报错
pub struct CompiledSelector {
    source: String,
    selectors: Selectors,
}

impl CompiledSelector {
    pub fn compile(source: &str) -> Result<Self, RelocateError> {
        let selectors = Selectors::compile(source)
            .map_err(|_| RelocateError::Selector(source.to_string()))?;

        Ok(CompiledSelector {
            source: source.to_string(),
            selectors,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, element: &NodeDataRef<ElementData>) -> bool {
        self.selectors.matches(element)
    }
}

impl fmt::Debug for CompiledSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompiledSelector").field(&self.source).finish()
    }
}

impl fmt::Display for CompiledSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// 可以被重写的元素句柄
pub trait Element {
    /// 读取属性值
    fn attr(&self, name: &str) -> Option<String>;
    /// 设置属性值（不存在时新建）
    fn set_attr(&self, name: &str, value: &str);
    /// 读取元素的文本内容
    fn text(&self) -> String;
    /// 用一段文本替换元素的文本内容
    fn set_text(&self, text: &str);
    /// 从文档中删除元素
    fn remove(&self);
}

/// 支持选择器查询的文档
pub trait Document {
    type Element: Element;

    /// 按文档顺序返回所有匹配的元素
    ///
    /// 不与 `NodeRef::select` 同名，那是 kuchikiki 按字符串查询的固有方法。
    fn select_elements(&self, selector: &CompiledSelector) -> Vec<Self::Element>;
}

impl Document for NodeRef {
    type Element = NodeDataRef<ElementData>;

    fn select_elements(&self, selector: &CompiledSelector) -> Vec<Self::Element> {
        select_nodes(self, selector)
    }
}

impl Element for NodeDataRef<ElementData> {
    fn attr(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).map(str::to_string)
    }

    fn set_attr(&self, name: &str, value: &str) {
        self.attributes.borrow_mut().insert(name, value.to_string());
    }

    fn text(&self) -> String {
        get_text_content(self.as_node())
    }

    fn set_text(&self, text: &str) {
        set_text_content(self.as_node(), text);
    }

    fn remove(&self) {
        self.as_node().detach();
    }
}

/// 将 HTML 字节转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> NodeRef {
    let s: String = match Encoding::for_label(document_encoding.as_bytes()) {
        Some(encoding) => encoding.decode(data).0.into_owned(),
        None => String::from_utf8_lossy(data).into_owned(),
    };

    kuchikiki::parse_html().one(s)
}

/// 按文档顺序查找所有匹配选择器的元素节点
///
/// `<template>` 的内容片段不是模板元素的子节点，这里单独进入遍历。
pub fn select_nodes(node: &NodeRef, selector: &CompiledSelector) -> Vec<NodeDataRef<ElementData>> {
    let mut found_nodes = Vec::new();
    collect_matching_nodes(node, selector, &mut found_nodes);
    found_nodes
}

fn collect_matching_nodes(
    node: &NodeRef,
    selector: &CompiledSelector,
    found_nodes: &mut Vec<NodeDataRef<ElementData>>,
) {
    for element in node.inclusive_descendants().elements() {
        if selector.matches(&element) {
            found_nodes.push(element.clone());
        }

        if let Some(contents) = &element.template_contents {
            collect_matching_nodes(contents, selector, found_nodes);
        }
    }
}

/// 拼接节点的直接文本子节点
pub fn get_text_content(node: &NodeRef) -> String {
    node.children()
        .filter_map(|child_node| child_node.as_text().map(|text| text.borrow().clone()))
        .collect()
}

/// 用一个文本节点替换节点的所有直接文本子节点
pub fn set_text_content(node: &NodeRef, text: &str) {
    let text_nodes: Vec<NodeRef> = node
        .children()
        .filter(|child_node| child_node.as_text().is_some())
        .collect();

    match text_nodes.split_first() {
        Some((first, rest)) => {
            if let Some(contents) = first.as_text() {
                *contents.borrow_mut() = text.to_string();
            }
            for text_node in rest {
                text_node.detach();
            }
        }
        None if !text.is_empty() => node.append(NodeRef::new_text(text)),
        None => {}
    }
}
