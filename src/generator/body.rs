//! # TTML 生成器 - Body 处理模块
//!
//! 所有字幕写在同一个 `<div>` 中，每条字幕一个 `<p>`，每行文本一个 `<span>`。

use std::io::{self, Write};

use quick_xml::{Writer, events::BytesText};

use super::utils::schema_element;
use crate::{
    schema::{CUE, SPAN},
    types::{CueElement, TtmlDocument},
};

pub(super) fn write_ttml_body<W: Write>(
    writer: &mut Writer<W>,
    document: &TtmlDocument,
) -> io::Result<()> {
    writer.create_element("body").write_inner_content(|writer| {
        let div = writer.create_element("div");
        if document.cues.is_empty() {
            div.write_empty()?;
            return Ok(());
        }

        div.write_inner_content(|writer| {
            for cue in &document.cues {
                write_cue(writer, cue, document.frame_rate)?;
            }
            Ok(())
        })?;
        Ok(())
    })?;

    Ok(())
}

/// 写入一个 `<p>`。时间码总是以 `hh:mm:ss.mmm` 输出，帧偏移按文档帧率折算。
fn write_cue<W: Write>(
    writer: &mut Writer<W>,
    cue: &CueElement,
    frame_rate: Option<u32>,
) -> io::Result<()> {
    let p = schema_element(writer, &CUE, cue, frame_rate);
    if cue.spans.is_empty() {
        p.write_empty()?;
        return Ok(());
    }

    p.write_inner_content(|writer| {
        for span in &cue.spans {
            schema_element(writer, &SPAN, span, frame_rate)
                .write_text_content(BytesText::new(&span.sentence))?;
        }
        Ok(())
    })?;
    Ok(())
}
