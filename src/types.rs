//! # 数据结构
//!
//! - [`Subtitles`] / [`Subtitle`]：与具体格式无关的字幕容器。
//! - [`TtmlDocument`] 及其子结构：TTML 文档树的直接映射。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::timecode::Timecode;

/// 一条字幕。
///
/// `end_at >= start_at` 由调用方保证，这里原样保存文档中的值。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subtitle {
    /// 开始时间
    pub start_at: Duration,
    /// 结束时间
    pub end_at: Duration,
    /// 文本行，按显示顺序排列
    pub text: Vec<String>,
}

impl Subtitle {
    /// 创建一条字幕。
    #[must_use]
    pub fn new(start_at: Duration, end_at: Duration, text: Vec<String>) -> Self {
        Self {
            start_at,
            end_at,
            text,
        }
    }
}

/// 按显示顺序排列的字幕列表。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Subtitles {
    /// 所有字幕条目
    pub items: Vec<Subtitle>,
}

impl Subtitles {
    /// 创建空列表。
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 条目数量。
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 是否没有任何条目。
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<Subtitle>> for Subtitles {
    fn from(items: Vec<Subtitle>) -> Self {
        Self { items }
    }
}

/// `<head><layout><region>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TtmlRegion {
    pub extent: Option<String>,
    pub id: Option<String>,
    pub origin: Option<String>,
    pub style: Option<String>,
    pub z_index: Option<String>,
}

/// `<head><styling><style>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TtmlStyle {
    pub background_color: Option<String>,
    pub color: Option<String>,
    pub display_align: Option<String>,
    pub extent: Option<String>,
    pub font_family: Option<String>,
    pub font_size: Option<String>,
    pub id: Option<String>,
    pub origin: Option<String>,
    pub style: Option<String>,
    pub text_align: Option<String>,
}

/// `<p>` 内的一个 `<span>`，对应一行文本。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextSpan {
    pub style: Option<String>,
    pub sentence: String,
}

impl TextSpan {
    /// 不带样式的文本行。
    #[must_use]
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            style: None,
            sentence: sentence.into(),
        }
    }
}

/// `<body><div><p>`，一条字幕在文档中的形态。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CueElement {
    /// `begin` 属性，帧率尚未绑定
    pub begin: Timecode,
    /// `end` 属性，帧率尚未绑定
    pub end: Timecode,
    pub id: Option<String>,
    pub region: Option<String>,
    pub spans: Vec<TextSpan>,
}

/// 解析后的 TTML 文档。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TtmlDocument {
    /// 根元素上的 `ttp:frameRate`，单位为帧/秒
    pub frame_rate: Option<u32>,
    /// 根元素上的 `xml:lang`
    pub lang: Option<String>,
    pub regions: Vec<TtmlRegion>,
    pub styles: Vec<TtmlStyle>,
    pub cues: Vec<CueElement>,
}

impl TtmlDocument {
    /// 把文档投影为字幕列表。
    ///
    /// 每个 `<p>` 的 `begin`/`end` 都绑定文档帧率后再取实际时长，
    /// 每个 `<span>` 成为一行文本。区域和样式引用不会带入结果。
    #[must_use]
    pub fn to_subtitles(&self) -> Subtitles {
        let mut ignored_frames = false;

        let items = self
            .cues
            .iter()
            .map(|cue| {
                let begin = cue.begin.resolve(self.frame_rate);
                let end = cue.end.resolve(self.frame_rate);
                ignored_frames |= begin.frames_ignored() || end.frames_ignored();

                Subtitle {
                    start_at: begin.duration(),
                    end_at: end.duration(),
                    text: cue.spans.iter().map(|s| s.sentence.clone()).collect(),
                }
            })
            .collect();

        if ignored_frames {
            warn!(
                frame_rate = ?self.frame_rate,
                "文档包含帧偏移时间码，但没有可用的 frameRate，帧偏移已忽略"
            );
        }

        Subtitles { items }
    }

    /// 由字幕列表构造文档。
    ///
    /// 只填充 `<p>` 与 `<span>`：帧率、区域和样式始终为空，时间码不带帧偏移。
    #[must_use]
    pub fn from_subtitles(subtitles: &Subtitles) -> Self {
        let cues = subtitles
            .items
            .iter()
            .map(|sub| CueElement {
                begin: Timecode::from_duration(sub.start_at),
                end: Timecode::from_duration(sub.end_at),
                spans: sub.text.iter().map(TextSpan::new).collect(),
                ..Default::default()
            })
            .collect();

        Self {
            cues,
            ..Default::default()
        }
    }
}
