//! # TTML 文档结构映射表
//!
//! 文档中每种元素的位置和它所承载的属性，集中以静态表的形式描述：
//! `{ 元素路径, 属性名, 读取函数, 写入函数, 是否必需 }`。
//! 解析器和生成器都只通过这张表访问字段，属性的输出顺序就是表中的顺序。

use std::borrow::Cow;

use crate::{
    error::TimecodeError,
    types::{CueElement, TextSpan, TtmlDocument, TtmlRegion, TtmlStyle},
};

pub(crate) const NS_TTML: &str = "http://www.w3.org/ns/ttml";
pub(crate) const NS_TTML_PARAMETER: &str = "http://www.w3.org/ns/ttml#parameter";
pub(crate) const NS_TTML_STYLING: &str = "http://www.w3.org/ns/ttml#styling";

/// 属性前缀到命名空间声明的映射。`xml` 前缀是预定义的，不需要声明。
pub(crate) const PREFIX_DECLARATIONS: &[(&str, &str, &str)] = &[
    ("ttp", "xmlns:ttp", NS_TTML_PARAMETER),
    ("tts", "xmlns:tts", NS_TTML_STYLING),
];

/// 属性值写入目标字段时的失败原因。
#[derive(Debug)]
pub(crate) enum ValueError {
    Timecode(TimecodeError),
    Invalid(String),
}

/// 单个属性与结构体字段的绑定。
pub(crate) struct AttributeBinding<T: 'static> {
    /// 输出时使用的限定名，读取时只比较本地名
    pub(crate) name: &'static str,
    pub(crate) required: bool,
    /// 读取字段值，第二个参数是文档帧率
    pub(crate) get: fn(&T, Option<u32>) -> Option<Cow<'_, str>>,
    pub(crate) set: fn(&mut T, &str) -> Result<(), ValueError>,
}

impl<T> AttributeBinding<T> {
    /// 去掉前缀后的属性名，例如 `xml:id` -> `id`。
    pub(crate) fn local_name(&self) -> &'static str {
        local_part(self.name)
    }

    /// 属性名的前缀，无前缀时为 `None`。
    pub(crate) fn prefix(&self) -> Option<&'static str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }
}

/// 一种元素在文档中的位置和属性表。
pub(crate) struct ElementSchema<T: 'static> {
    /// 从根元素开始的本地名路径
    pub(crate) path: &'static [&'static str],
    pub(crate) attributes: &'static [AttributeBinding<T>],
}

impl<T> ElementSchema<T> {
    /// 元素本身的名字。
    pub(crate) fn tag(&self) -> &'static str {
        self.path.last().copied().unwrap_or_default()
    }

    /// 当前打开的元素栈是否正好位于该元素上。
    pub(crate) fn matches<S: AsRef<[u8]>>(&self, stack: &[S]) -> bool {
        stack.len() == self.path.len()
            && stack
                .iter()
                .zip(self.path)
                .all(|(open, expected)| open.as_ref() == expected.as_bytes())
    }

    /// 按本地名查找绑定。
    pub(crate) fn find(&self, local_name: &[u8]) -> Option<(usize, &AttributeBinding<T>)> {
        self.attributes
            .iter()
            .enumerate()
            .find(|(_, binding)| binding.local_name().as_bytes() == local_name)
    }

    /// 收集所有有值的属性，顺序与表一致。
    pub(crate) fn collect<'a>(
        &self,
        item: &'a T,
        frame_rate: Option<u32>,
    ) -> Vec<(&'static str, Cow<'a, str>)> {
        self.attributes
            .iter()
            .filter_map(|binding| (binding.get)(item, frame_rate).map(|v| (binding.name, v)))
            .collect()
    }
}

pub(crate) fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

macro_rules! string_attr {
    ($ty:ty, $name:literal, $field:ident) => {
        AttributeBinding::<$ty> {
            name: $name,
            required: false,
            get: |item, _| item.$field.as_deref().map(Cow::Borrowed),
            set: |item, value| {
                item.$field = Some(value.to_owned());
                Ok(())
            },
        }
    };
}

macro_rules! timecode_attr {
    ($name:literal, $field:ident) => {
        AttributeBinding::<CueElement> {
            name: $name,
            required: true,
            get: |cue, frame_rate| Some(Cow::Owned(cue.$field.resolve(frame_rate).to_string())),
            set: |cue, value| {
                cue.$field = value.parse().map_err(ValueError::Timecode)?;
                Ok(())
            },
        }
    };
}

pub(crate) static ROOT: ElementSchema<TtmlDocument> = ElementSchema {
    path: &["tt"],
    attributes: &[
        AttributeBinding {
            name: "ttp:frameRate",
            required: false,
            get: |doc, _| doc.frame_rate.map(|rate| Cow::Owned(rate.to_string())),
            set: |doc, value| {
                let rate = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|e| ValueError::Invalid(e.to_string()))?;
                // 非正的帧率视为未设置
                doc.frame_rate = if rate > 0 {
                    Some(u32::try_from(rate).map_err(|e| ValueError::Invalid(e.to_string()))?)
                } else {
                    None
                };
                Ok(())
            },
        },
        string_attr!(TtmlDocument, "xml:lang", lang),
    ],
};

pub(crate) static STYLE: ElementSchema<TtmlStyle> = ElementSchema {
    path: &["tt", "head", "styling", "style"],
    attributes: &[
        string_attr!(TtmlStyle, "tts:backgroundColor", background_color),
        string_attr!(TtmlStyle, "tts:color", color),
        string_attr!(TtmlStyle, "tts:displayAlign", display_align),
        string_attr!(TtmlStyle, "tts:extent", extent),
        string_attr!(TtmlStyle, "tts:fontFamily", font_family),
        string_attr!(TtmlStyle, "tts:fontSize", font_size),
        string_attr!(TtmlStyle, "xml:id", id),
        string_attr!(TtmlStyle, "tts:origin", origin),
        string_attr!(TtmlStyle, "style", style),
        string_attr!(TtmlStyle, "tts:textAlign", text_align),
    ],
};

pub(crate) static REGION: ElementSchema<TtmlRegion> = ElementSchema {
    path: &["tt", "head", "layout", "region"],
    attributes: &[
        string_attr!(TtmlRegion, "tts:extent", extent),
        string_attr!(TtmlRegion, "xml:id", id),
        string_attr!(TtmlRegion, "tts:origin", origin),
        string_attr!(TtmlRegion, "style", style),
        string_attr!(TtmlRegion, "tts:zIndex", z_index),
    ],
};

pub(crate) static CUE: ElementSchema<CueElement> = ElementSchema {
    path: &["tt", "body", "div", "p"],
    attributes: &[
        timecode_attr!("begin", begin),
        timecode_attr!("end", end),
        string_attr!(CueElement, "xml:id", id),
        string_attr!(CueElement, "region", region),
    ],
};

pub(crate) static SPAN: ElementSchema<TextSpan> = ElementSchema {
    path: &["tt", "body", "div", "p", "span"],
    attributes: &[string_attr!(TextSpan, "style", style)],
};
