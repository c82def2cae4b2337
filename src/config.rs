use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// TTML 生成选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct TtmlGenerationOptions {
    /// 是否输出带缩进的 TTML。
    pub format: bool,
    /// 每一级缩进的空格数，仅在 `format` 为 `true` 时生效。
    pub indent_size: usize,
    /// 写入根元素的 `xml:lang`。只对 [`crate::generate_ttml`] 生效，
    /// 直接生成文档时使用文档自身的语言。
    pub language: Option<String>,
    /// 是否在根元素上声明命名空间。
    ///
    /// `xmlns` 总是声明；`xmlns:ttp`、`xmlns:tts` 只在实际用到对应前缀时声明。
    pub declare_namespaces: bool,
}

impl Default for TtmlGenerationOptions {
    fn default() -> Self {
        Self {
            format: true,
            indent_size: 4,
            language: None,
            declare_namespaces: true,
        }
    }
}
