//! # TTML 生成器 - 工具函数模块

use std::io::{self, Write};

use quick_xml::{Writer, writer::ElementWriter};

use crate::schema::ElementSchema;

/// 按映射表创建元素，属性顺序与表一致。
pub(super) fn schema_element<'w, W: Write, T>(
    writer: &'w mut Writer<W>,
    schema: &ElementSchema<T>,
    item: &T,
    frame_rate: Option<u32>,
) -> ElementWriter<'w, W> {
    let attributes = schema.collect(item, frame_rate);
    writer
        .create_element(schema.tag())
        .with_attributes(attributes.iter().map(|(key, value)| (*key, value.as_ref())))
}

/// 按映射表写入一个没有子节点的元素。
pub(super) fn write_schema_element<W: Write, T>(
    writer: &mut Writer<W>,
    schema: &ElementSchema<T>,
    item: &T,
    frame_rate: Option<u32>,
) -> io::Result<()> {
    schema_element(writer, schema, item, frame_rate).write_empty()?;
    Ok(())
}
