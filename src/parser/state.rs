//! # 解析器的状态机

use crate::types::{CueElement, TextSpan, TtmlDocument};

/// 解析过程中的全部状态。
#[derive(Debug, Default)]
pub(super) struct TtmlParserState {
    /// 当前打开的元素（本地名），栈底是根元素。
    pub(super) stack: Vec<Vec<u8>>,
    /// 是否已经遇到过 `<tt>`。
    pub(super) seen_root: bool,
    /// 根元素是否已经闭合，之后的内容不再读取。
    pub(super) root_closed: bool,
    /// 正在构建的文档。
    pub(super) document: TtmlDocument,
    /// 当前所在的 `<p>`。
    pub(super) current_cue: Option<CueElement>,
    /// 当前所在的顶层 `<span>`，嵌套 span 的文本也会累积到这里。
    pub(super) current_span: Option<TextSpan>,
}

impl TtmlParserState {
    /// 追加文本，只有位于 `<span>` 内时才生效。
    pub(super) fn push_text(&mut self, text: &str) {
        if let Some(span) = self.current_span.as_mut() {
            span.sentence.push_str(text);
        }
    }

    /// 栈顶元素的名字，用于错误信息。
    pub(super) fn innermost_open(&self) -> Option<String> {
        self.stack
            .last()
            .map(|name| String::from_utf8_lossy(name).into_owned())
    }
}
