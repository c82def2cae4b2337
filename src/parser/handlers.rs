//! # TTML 解析器 - 事件处理器
//!
//! 元素是否被识别完全取决于 [`crate::schema`] 中的路径表，
//! 属性则按表中的绑定写入对应的结构体。

use std::str;

use quick_xml::{
    Reader,
    encoding::EncodingError,
    events::{BytesCData, BytesRef, BytesStart, BytesText},
};

use super::state::TtmlParserState;
use crate::{
    error::TtmlError,
    schema::{CUE, ElementSchema, REGION, ROOT, SPAN, STYLE, ValueError},
    types::{CueElement, TextSpan, TtmlRegion, TtmlStyle},
};

/// 处理开始标签。
pub(super) fn handle_start(
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    state: &mut TtmlParserState,
) -> Result<(), TtmlError> {
    let local_name = e.local_name();
    let name = local_name.as_ref();

    if state.stack.is_empty() {
        if name != ROOT.tag().as_bytes() {
            return Err(TtmlError::UnexpectedRoot(
                String::from_utf8_lossy(name).into_owned(),
            ));
        }
        state.seen_root = true;
        read_attributes(&ROOT, e, reader, &mut state.document, 0)?;
        state.stack.push(name.to_vec());
        return Ok(());
    }

    state.stack.push(name.to_vec());

    if STYLE.matches(&state.stack) {
        let mut style = TtmlStyle::default();
        read_attributes(&STYLE, e, reader, &mut style, state.document.styles.len())?;
        state.document.styles.push(style);
    } else if REGION.matches(&state.stack) {
        let mut region = TtmlRegion::default();
        read_attributes(&REGION, e, reader, &mut region, state.document.regions.len())?;
        state.document.regions.push(region);
    } else if CUE.matches(&state.stack) {
        let mut cue = CueElement::default();
        read_attributes(&CUE, e, reader, &mut cue, state.document.cues.len())?;
        state.current_cue = Some(cue);
    } else if SPAN.matches(&state.stack)
        && let Some(cue) = state.current_cue.as_ref()
    {
        let mut span = TextSpan::default();
        read_attributes(&SPAN, e, reader, &mut span, cue.spans.len())?;
        state.current_span = Some(span);
    }

    Ok(())
}

/// 处理结束标签。
///
/// 结束标签与栈顶是否匹配由 `quick-xml` 负责检查。
pub(super) fn handle_end(state: &mut TtmlParserState) {
    if SPAN.matches(&state.stack) {
        if let (Some(span), Some(cue)) = (state.current_span.take(), state.current_cue.as_mut()) {
            cue.spans.push(span);
        }
    } else if CUE.matches(&state.stack)
        && let Some(cue) = state.current_cue.take()
    {
        state.document.cues.push(cue);
    }

    state.stack.pop();
    if state.stack.is_empty() {
        state.root_closed = true;
    }
}

/// 处理文本节点。`<span>` 之外的文本（包括缩进）都会被丢弃。
pub(super) fn handle_text(e: &BytesText, state: &mut TtmlParserState) -> Result<(), TtmlError> {
    if state.current_span.is_some() {
        let text = e.xml_content()?;
        state.push_text(&text);
    }
    Ok(())
}

/// 处理 CDATA 节点，内容按原样作为文本。
pub(super) fn handle_cdata(e: &BytesCData, state: &mut TtmlParserState) -> Result<(), TtmlError> {
    if state.current_span.is_some() {
        let text = str::from_utf8(e.as_ref()).map_err(EncodingError::Utf8)?;
        state.push_text(text);
    }
    Ok(())
}

/// 处理实体引用，例如 `&amp;` 和 `&#x4E2D;`。
pub(super) fn handle_general_ref(
    e: &BytesRef,
    state: &mut TtmlParserState,
) -> Result<(), TtmlError> {
    let entity_name = str::from_utf8(e.as_ref()).map_err(EncodingError::Utf8)?;
    let decoded_char = decode_entity(entity_name)
        .ok_or_else(|| TtmlError::UnknownEntity(entity_name.to_owned()))?;

    let mut utf8_buf = [0u8; 4];
    state.push_text(decoded_char.encode_utf8(&mut utf8_buf));
    Ok(())
}

fn decode_entity(entity_name: &str) -> Option<char> {
    if let Some(num_str) = entity_name.strip_prefix('#') {
        let (radix, code_point_str) = num_str
            .strip_prefix('x')
            .map_or((10, num_str), |stripped| (16, stripped));
        return u32::from_str_radix(code_point_str, radix)
            .ok()
            .and_then(char::from_u32);
    }

    match entity_name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => None,
    }
}

/// 按映射表读取一个元素的属性。
///
/// 属性按本地名匹配，表中没有的属性和命名空间声明会被忽略；
/// 缺少必需属性时返回错误。
fn read_attributes<T>(
    schema: &ElementSchema<T>,
    e: &BytesStart,
    reader: &Reader<&[u8]>,
    target: &mut T,
    index: usize,
) -> Result<(), TtmlError> {
    let mut seen = vec![false; schema.attributes.len()];

    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let Some((slot, binding)) = schema.find(attr.key.local_name().as_ref()) else {
            continue;
        };

        let value = attr.decode_and_unescape_value(reader.decoder())?;
        (binding.set)(target, &value).map_err(|err| match err {
            ValueError::Timecode(source) => TtmlError::Timecode {
                element: schema.tag(),
                index,
                attribute: binding.name,
                source,
            },
            ValueError::Invalid(reason) => TtmlError::InvalidAttribute {
                element: schema.tag(),
                attribute: binding.name,
                value: value.clone().into_owned(),
                reason,
            },
        })?;
        seen[slot] = true;
    }

    if let Some((binding, _)) = schema
        .attributes
        .iter()
        .zip(&seen)
        .find(|(binding, seen)| binding.required && !**seen)
    {
        return Err(TtmlError::MissingAttribute {
            element: schema.tag(),
            attribute: binding.name,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("amp"), Some('&'));
        assert_eq!(decode_entity("lt"), Some('<'));
        assert_eq!(decode_entity("apos"), Some('\''));
        assert_eq!(decode_entity("#65"), Some('A'));
        assert_eq!(decode_entity("#x4E2D"), Some('中'));
        assert_eq!(decode_entity("nbsp"), None);
        assert_eq!(decode_entity("#xZZ"), None);
        assert_eq!(decode_entity("#xD800"), None);
    }
}
