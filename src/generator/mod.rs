//! # Timed Text Markup Language 字幕生成器
//!
//! 输出只包含时钟时间形式的时间码；帧偏移在生成时已经按文档帧率折算。
//! 属性顺序固定，缩进固定，同样的输入总是得到逐字节相同的输出。

mod body;
mod head;
mod utils;

use std::{
    collections::BTreeMap,
    io::{Cursor, Write},
};

use quick_xml::Writer;
use tracing::debug;

use crate::{
    config::TtmlGenerationOptions,
    error::TtmlError,
    schema::{ElementSchema, NS_TTML, PREFIX_DECLARATIONS, REGION, ROOT, STYLE},
    types::{Subtitles, TtmlDocument},
};

/// 把文档树序列化为 TTML。
///
/// 与 [`generate_ttml`] 不同，空文档是允许的，会得到只有空 `<div/>` 的 `<body>`。
///
/// # Errors
///
/// 写入 XML 失败时返回 `TtmlError::Io`。
pub fn generate_document(
    document: &TtmlDocument,
    options: &TtmlGenerationOptions,
) -> Result<Vec<u8>, TtmlError> {
    let mut buffer = Vec::new();

    if options.format {
        let mut writer =
            Writer::new_with_indent(Cursor::new(&mut buffer), b' ', options.indent_size);
        generate_document_inner(&mut writer, document, options)?;
    } else {
        let mut writer = Writer::new(Cursor::new(&mut buffer));
        generate_document_inner(&mut writer, document, options)?;
    }

    debug!(
        cues = document.cues.len(),
        bytes = buffer.len(),
        "TTML 文档生成完成"
    );
    Ok(buffer)
}

/// 把字幕列表序列化为 TTML。
///
/// 每条字幕写为一个 `<p>`，每行文本一个 `<span>`。
/// 不输出帧率、区域和样式，时间码总是 `hh:mm:ss.mmm`。
///
/// # Errors
///
/// * `TtmlError::NoSubtitlesToWrite` - 字幕列表为空
/// * `TtmlError::Io` - 写入 XML 失败
pub fn generate_ttml(
    subtitles: &Subtitles,
    options: &TtmlGenerationOptions,
) -> Result<Vec<u8>, TtmlError> {
    if subtitles.is_empty() {
        return Err(TtmlError::NoSubtitlesToWrite);
    }

    let mut document = TtmlDocument::from_subtitles(subtitles);
    document.lang.clone_from(&options.language);
    generate_document(&document, options)
}

/// 把字幕列表以 TTML 写入 `output`。
///
/// 先在内存中完整生成，成功后才写入，失败时 `output` 不会收到任何内容。
///
/// # Errors
///
/// 与 [`generate_ttml`] 相同，另外写入 `output` 失败时返回 `TtmlError::Io`。
pub fn write_ttml<W: Write>(
    subtitles: &Subtitles,
    mut output: W,
    options: &TtmlGenerationOptions,
) -> Result<(), TtmlError> {
    let bytes = generate_ttml(subtitles, options)?;
    output.write_all(&bytes)?;
    output.flush()?;
    Ok(())
}

fn generate_document_inner<W: Write>(
    writer: &mut Writer<W>,
    document: &TtmlDocument,
    options: &TtmlGenerationOptions,
) -> Result<(), TtmlError> {
    // 命名空间声明按键排序以保证输出稳定
    let namespace_attrs = if options.declare_namespaces {
        namespace_declarations(document)
    } else {
        BTreeMap::new()
    };
    let root_attrs = ROOT.collect(document, None);

    writer
        .create_element(ROOT.tag())
        .with_attributes(namespace_attrs.iter().map(|(key, value)| (*key, *value)))
        .with_attributes(root_attrs.iter().map(|(key, value)| (*key, value.as_ref())))
        .write_inner_content(|writer| {
            head::write_ttml_head(writer, document)?;
            body::write_ttml_body(writer, document)?;
            Ok(())
        })?;

    Ok(())
}

/// 收集文档中实际用到的属性前缀对应的命名空间声明。
fn namespace_declarations(document: &TtmlDocument) -> BTreeMap<&'static str, &'static str> {
    let mut used_prefixes = Vec::new();
    collect_prefixes(&ROOT, std::slice::from_ref(document), &mut used_prefixes);
    collect_prefixes(&STYLE, &document.styles, &mut used_prefixes);
    collect_prefixes(&REGION, &document.regions, &mut used_prefixes);

    let mut declarations = BTreeMap::new();
    declarations.insert("xmlns", NS_TTML);
    for (prefix, key, uri) in PREFIX_DECLARATIONS {
        if used_prefixes.contains(prefix) {
            declarations.insert(*key, *uri);
        }
    }
    declarations
}

fn collect_prefixes<T>(
    schema: &ElementSchema<T>,
    items: &[T],
    used_prefixes: &mut Vec<&'static str>,
) {
    for item in items {
        for binding in schema.attributes {
            if let Some(prefix) = binding.prefix()
                && !used_prefixes.contains(&prefix)
                && (binding.get)(item, None).is_some()
            {
                used_prefixes.push(prefix);
            }
        }
    }
}
