use std::{io, num::ParseIntError};

use quick_xml::{
    Error as QuickXmlErrorMain, encoding::EncodingError,
    events::attributes::AttrError as QuickXmlAttrError,
};
use thiserror::Error;

/// 时间码文本格式错误。
///
/// 只描述单个时间码字符串本身的问题；在文档解析过程中出现时，
/// 会被包装进 [`TtmlError::Timecode`] 并附带所在元素的上下文。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimecodeError {
    /// 整体结构不符合 `hh:mm:ss.mmm` / `hh:mm:ss:fff`。
    #[error("时间码 '{input}' 格式无效: {reason}")]
    InvalidShape {
        /// 原始输入
        input: String,
        /// 失败原因
        reason: &'static str,
    },
    /// 某个字段不是合法的数字，或超出范围。
    #[error("时间码 '{input}' 中的{field}字段 '{value}' 无效")]
    InvalidField {
        /// 原始输入
        input: String,
        /// 字段名（小时、分钟、秒、毫秒）
        field: &'static str,
        /// 字段原文
        value: String,
    },
    /// 帧数后缀无法解析为整数。
    #[error("时间码 '{input}' 中的帧数 '{value}' 无法解析: {source}")]
    InvalidFrames {
        /// 原始输入
        input: String,
        /// 帧数原文
        value: String,
        /// 底层整数解析错误
        #[source]
        source: ParseIntError,
    },
}

/// 读写 TTML 文档时可能发生的错误。
#[derive(Error, Debug)]
pub enum TtmlError {
    /// XML 语法错误，来自 `quick-xml`。
    #[error("XML 错误: {0}")]
    Xml(#[from] QuickXmlErrorMain),
    /// XML 属性语法错误，来自 `quick-xml`。
    #[error("XML 属性错误: {0}")]
    Attribute(#[from] QuickXmlAttrError),
    /// 文本编码或解码错误。
    #[error("文本编码或解码错误: {0}")]
    Encoding(#[from] EncodingError),
    /// 文档中没有任何根元素。
    #[error("文档为空，未找到 <tt> 根元素")]
    MissingRoot,
    /// 根元素不是 `<tt>`。
    #[error("根元素应为 <tt>，实际为 <{0}>")]
    UnexpectedRoot(String),
    /// 文档在元素闭合前结束。
    #[error("文档意外结束，<{0}> 未闭合")]
    UnclosedElement(String),
    /// 无法识别的 XML 实体引用。
    #[error("未知的 XML 实体 '&{0};'")]
    UnknownEntity(String),
    /// 缺少必需的属性。
    #[error("<{element}> 缺少必需的属性 '{attribute}'")]
    MissingAttribute {
        /// 元素名
        element: &'static str,
        /// 属性名
        attribute: &'static str,
    },
    /// 属性值无法转换为目标类型。
    #[error("<{element}> 的属性 '{attribute}' 值 '{value}' 无效: {reason}")]
    InvalidAttribute {
        /// 元素名
        element: &'static str,
        /// 属性名
        attribute: &'static str,
        /// 属性原文
        value: String,
        /// 失败原因
        reason: String,
    },
    /// 某个元素上的时间码格式错误。
    #[error("第 {index} 个 <{element}> 的属性 '{attribute}' 时间码无效: {source}")]
    Timecode {
        /// 元素名
        element: &'static str,
        /// 该元素在同类元素中的序号（从 0 开始）
        index: usize,
        /// 属性名
        attribute: &'static str,
        /// 底层时间码错误
        #[source]
        source: TimecodeError,
    },
    /// 没有任何字幕可供写入。
    #[error("没有可写入的字幕")]
    NoSubtitlesToWrite,
    /// 写入输出时的 IO 错误。
    #[error("IO 错误: {0}")]
    Io(#[from] io::Error),
}

impl From<TtmlError> for io::Error {
    fn from(err: TtmlError) -> Self {
        Self::other(err)
    }
}
