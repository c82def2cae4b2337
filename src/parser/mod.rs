//! # TTML (Timed Text Markup Language) 字幕解析器
//!
//! 只读取 [`crate::schema`] 中登记的元素和属性：
//! 根元素的帧率与语言、`<head>` 中的区域和样式、`<body><div><p>` 字幕和其中的 `<span>`。
//! 其余内容会被跳过，但整份文档仍然必须是格式正确的 XML。

mod handlers;
mod state;

use quick_xml::{Reader, events::Event};
use tracing::{debug, error};

use self::state::TtmlParserState;
use crate::{
    error::TtmlError,
    types::{Subtitles, TtmlDocument},
};

/// 把 TTML 字节流解析为文档树。
///
/// 时间码在这一步只完成文本解析，帧率需要之后通过
/// [`crate::Timecode::resolve`] 或 [`TtmlDocument::to_subtitles`] 绑定。
///
/// # Errors
///
/// * `TtmlError::Xml` / `TtmlError::Attribute` / `TtmlError::Encoding` - XML 本身格式错误
/// * `TtmlError::MissingRoot` / `TtmlError::UnexpectedRoot` - 根元素缺失或不是 `<tt>`
/// * `TtmlError::UnclosedElement` - 文档在元素闭合前结束
/// * `TtmlError::Timecode` - 某个 `<p>` 的 `begin`/`end` 不是合法的时间码
/// * `TtmlError::MissingAttribute` / `TtmlError::InvalidAttribute` - 属性缺失或值无效
pub fn parse_document(content: &[u8]) -> Result<TtmlDocument, TtmlError> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut state = TtmlParserState::default();
    let mut buf = Vec::new();

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(e) => {
                error!(
                    "TTML 解析错误，位置 {}: {}。无法继续解析",
                    reader.error_position(),
                    e
                );
                return Err(TtmlError::Xml(e));
            }
        };

        match &event {
            Event::Eof => break,
            Event::Start(e) => handlers::handle_start(e, &reader, &mut state)?,
            Event::End(_) => handlers::handle_end(&mut state),
            Event::Text(e) => handlers::handle_text(e, &mut state)?,
            Event::CData(e) => handlers::handle_cdata(e, &mut state)?,
            Event::GeneralRef(e) => handlers::handle_general_ref(e, &mut state)?,
            _ => {}
        }

        if state.root_closed {
            break;
        }
        buf.clear();
    }

    if !state.seen_root {
        return Err(TtmlError::MissingRoot);
    }
    if let Some(open) = state.innermost_open() {
        return Err(TtmlError::UnclosedElement(open));
    }

    let document = state.document;
    debug!(
        cues = document.cues.len(),
        regions = document.regions.len(),
        styles = document.styles.len(),
        frame_rate = ?document.frame_rate,
        "TTML 文档解析完成"
    );
    Ok(document)
}

/// 解析 TTML 字节流，得到字幕列表。
///
/// 每个 `<p>` 对应一条字幕，`begin`/`end` 按文档帧率换算为实际时长，
/// 每个 `<span>` 对应一行文本。区域和样式引用不会带入结果。
///
/// # Errors
///
/// 与 [`parse_document`] 相同；任何一条字幕的时间码错误都会导致整体失败。
pub fn parse_ttml(content: &[u8]) -> Result<Subtitles, TtmlError> {
    parse_document(content).map(|document| document.to_subtitles())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::error::TimecodeError;

    fn parse(content: &str) -> Result<TtmlDocument, TtmlError> {
        parse_document(content.as_bytes())
    }

    #[test]
    fn test_parse_frame_based_cue() {
        let content = r#"<tt xmlns="http://www.w3.org/ns/ttml" xmlns:ttp="http://www.w3.org/ns/ttml#parameter" ttp:frameRate="25">
            <body>
                <div>
                    <p begin="00:00:01:10" end="00:00:02.500">
                        <span>hello</span>
                    </p>
                </div>
            </body>
        </tt>"#;

        let doc = parse(content).unwrap();
        assert_eq!(doc.frame_rate, Some(25));
        assert_eq!(doc.cues.len(), 1);
        assert_eq!(doc.cues[0].begin.frames(), 10);
        assert_eq!(doc.cues[0].spans[0].sentence, "hello");

        let subs = doc.to_subtitles();
        assert_eq!(subs.items[0].start_at, Duration::from_millis(1400));
        assert_eq!(subs.items[0].end_at, Duration::from_millis(2500));
    }

    #[test]
    fn test_parse_head_and_attributes() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
        <tt xml:lang="fr" xmlns:tts="http://www.w3.org/ns/ttml#styling">
            <head>
                <styling>
                    <style xml:id="s1" tts:color="white" tts:fontSize="100%"/>
                </styling>
                <layout>
                    <region xml:id="bottom" tts:origin="10% 80%" tts:extent="80% 20%" tts:zIndex="1"/>
                </layout>
            </head>
            <body>
                <div>
                    <p xml:id="c1" region="bottom" begin="00:00:00.000" end="00:00:01.000">
                        <span style="s1">un</span>
                        <span>deux</span>
                    </p>
                </div>
            </body>
        </tt>"#;

        let doc = parse(content).unwrap();
        assert_eq!(doc.lang.as_deref(), Some("fr"));
        assert_eq!(doc.frame_rate, None);

        assert_eq!(doc.styles.len(), 1);
        assert_eq!(doc.styles[0].id.as_deref(), Some("s1"));
        assert_eq!(doc.styles[0].color.as_deref(), Some("white"));
        assert_eq!(doc.styles[0].font_size.as_deref(), Some("100%"));

        assert_eq!(doc.regions.len(), 1);
        assert_eq!(doc.regions[0].id.as_deref(), Some("bottom"));
        assert_eq!(doc.regions[0].origin.as_deref(), Some("10% 80%"));
        assert_eq!(doc.regions[0].z_index.as_deref(), Some("1"));

        let cue = &doc.cues[0];
        assert_eq!(cue.id.as_deref(), Some("c1"));
        assert_eq!(cue.region.as_deref(), Some("bottom"));
        assert_eq!(cue.spans.len(), 2);
        assert_eq!(cue.spans[0].style.as_deref(), Some("s1"));
        assert_eq!(cue.spans[1].style, None);
        assert_eq!(cue.spans[1].sentence, "deux");
    }

    #[test]
    fn test_parse_text_content() {
        let content = r#"<tt><body><div>
            <p begin="00:00:00.000" end="00:00:01.000">ignored<span>Tom &amp; Jerry &#x4E2D;</span><br/><span><![CDATA[<b>raw</b>]]></span></p>
            <p begin="00:00:01.000" end="00:00:02.000"><span>Hello <span style="b">nested</span> world</span><span></span></p>
        </div></body></tt>"#;

        let doc = parse(content).unwrap();
        assert_eq!(doc.cues.len(), 2);

        let lines: Vec<_> = doc.cues[0].spans.iter().map(|s| s.sentence.as_str()).collect();
        assert_eq!(lines, vec!["Tom & Jerry 中", "<b>raw</b>"]);

        let lines: Vec<_> = doc.cues[1].spans.iter().map(|s| s.sentence.as_str()).collect();
        assert_eq!(lines, vec!["Hello nested world", ""]);
    }

    #[test]
    fn test_parse_multiple_divs_keep_order() {
        let content = r#"<tt><body>
            <div><p begin="00:00:03.000" end="00:00:04.000"><span>a</span></p></div>
            <div><p begin="00:00:01.000" end="00:00:02.000"><span>b</span></p></div>
        </body></tt>"#;

        let subs = parse_ttml(content.as_bytes()).unwrap();
        let lines: Vec<_> = subs.items.iter().map(|s| s.text[0].as_str()).collect();
        assert_eq!(lines, vec!["a", "b"]);
        assert_eq!(subs.items[1].start_at, Duration::from_secs(1));
    }

    #[test]
    fn test_parse_ignores_cues_outside_div() {
        let content = r#"<tt><body>
            <p begin="00:00:00.000" end="00:00:01.000"><span>stray</span></p>
            <div><div><p begin="nonsense" end="nonsense"><span>deep</span></p></div></div>
        </body></tt>"#;

        let doc = parse(content).unwrap();
        assert!(doc.cues.is_empty());
    }

    #[test]
    fn test_invalid_timecode_carries_cue_context() {
        let content = r#"<tt><body><div>
            <p begin="00:00:00.000" end="00:00:01.000"><span>ok</span></p>
            <p begin="00:00:01.000" end="00:00:xx.000"><span>bad</span></p>
        </div></body></tt>"#;

        let err = parse(content).unwrap_err();
        assert!(matches!(
            err,
            TtmlError::Timecode {
                element: "p",
                index: 1,
                attribute: "end",
                source: TimecodeError::InvalidField { .. },
            }
        ));
    }

    #[test]
    fn test_missing_required_attribute() {
        let content = r#"<tt><body><div><p begin="00:00:00.000"><span>x</span></p></div></body></tt>"#;
        assert!(matches!(
            parse(content),
            Err(TtmlError::MissingAttribute {
                element: "p",
                attribute: "end"
            })
        ));
    }

    #[test]
    fn test_invalid_frame_rate() {
        let content = r#"<tt ttp:frameRate="fast"><body><div></div></body></tt>"#;
        assert!(matches!(
            parse(content),
            Err(TtmlError::InvalidAttribute {
                element: "tt",
                attribute: "ttp:frameRate",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_frame_rate_ignores_frames() {
        let content = r#"<tt ttp:frameRate="-25"><body><div>
            <p begin="00:00:01:10" end="00:75:00.000"><span>x</span></p>
        </div></body></tt>"#;

        let doc = parse(content).unwrap();
        assert_eq!(doc.frame_rate, None);

        let subs = doc.to_subtitles();
        assert_eq!(subs.items[0].start_at, Duration::from_secs(1));
        assert_eq!(subs.items[0].end_at, Duration::from_secs(4500));
    }

    #[test]
    fn test_malformed_documents() {
        assert!(matches!(parse(""), Err(TtmlError::MissingRoot)));
        assert!(matches!(parse("   "), Err(TtmlError::MissingRoot)));
        assert!(matches!(
            parse("<subtitles/>"),
            Err(TtmlError::UnexpectedRoot(name)) if name == "subtitles"
        ));
        assert!(matches!(
            parse("<tt><body><div></body></tt>"),
            Err(TtmlError::Xml(_))
        ));
        assert!(matches!(
            parse("<tt><body><div>"),
            Err(TtmlError::Xml(_) | TtmlError::UnclosedElement(_))
        ));
        assert!(matches!(
            parse(r#"<tt><body><div><p begin="00:00:00.000" end="00:00:01.000"><span>&bogus;</span></p></div></body></tt>"#),
            Err(TtmlError::UnknownEntity(name)) if name == "bogus"
        ));
    }

    #[test]
    fn test_prefixed_elements() {
        let content = r#"<tt:tt xmlns:tt="http://www.w3.org/ns/ttml"><tt:body><tt:div>
            <tt:p begin="00:00:00.000" end="00:00:01.000"><tt:span>prefixed</tt:span></tt:p>
        </tt:div></tt:body></tt:tt>"#;

        let subs = parse_ttml(content.as_bytes()).unwrap();
        assert_eq!(subs.items[0].text, vec!["prefixed"]);
    }
}
