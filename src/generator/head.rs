//! # TTML 生成器 - Head 处理模块
//!
//! 写入 `<head>` 中的 `<styling>` 和 `<layout>`，两者都为空时不输出 `<head>`。

use std::io::{self, Write};

use quick_xml::Writer;

use super::utils::write_schema_element;
use crate::{
    schema::{REGION, STYLE},
    types::TtmlDocument,
};

pub(super) fn write_ttml_head<W: Write>(
    writer: &mut Writer<W>,
    document: &TtmlDocument,
) -> io::Result<()> {
    if document.styles.is_empty() && document.regions.is_empty() {
        return Ok(());
    }

    writer.create_element("head").write_inner_content(|writer| {
        if !document.styles.is_empty() {
            writer.create_element("styling").write_inner_content(|writer| {
                for style in &document.styles {
                    write_schema_element(writer, &STYLE, style, None)?;
                }
                Ok(())
            })?;
        }

        if !document.regions.is_empty() {
            writer.create_element("layout").write_inner_content(|writer| {
                for region in &document.regions {
                    write_schema_element(writer, &REGION, region, None)?;
                }
                Ok(())
            })?;
        }

        Ok(())
    })?;

    Ok(())
}
