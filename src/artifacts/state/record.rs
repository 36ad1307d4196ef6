use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::state::checksum::Checksum;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use std::io::{Read, Write};

pub fn write_u32<W: Write>(writer: &mut Checksum<W>, value: u32) -> anyhow::Result<()> {
    let mut bytes = Vec::with_capacity(4);
    bytes.write_u32::<byteorder::NetworkEndian>(value)?;
    writer.write(&bytes)
}

pub fn write_bytes<W: Write>(writer: &mut Checksum<W>, data: &[u8]) -> anyhow::Result<()> {
    let length = u32::try_from(data.len())
        .map_err(|_| anyhow::anyhow!("Record of {} bytes is too large", data.len()))?;
    write_u32(writer, length)?;
    writer.write(data)
}

pub fn write_str<W: Write>(writer: &mut Checksum<W>, value: &str) -> anyhow::Result<()> {
    write_bytes(writer, value.as_bytes())
}

pub fn write_oid<W: Write>(writer: &mut Checksum<W>, oid: &ObjectId) -> anyhow::Result<()> {
    write_str(writer, oid.as_ref())
}

pub fn read_u32<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<u32> {
    let bytes = reader.read(4)?;
    Ok(byteorder::NetworkEndian::read_u32(&bytes))
}

pub fn read_bytes<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<Bytes> {
    let length = read_u32(reader)? as usize;
    reader.read(length)
}

pub fn read_string<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<String> {
    let bytes = read_bytes(reader)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| anyhow::anyhow!("Invalid UTF-8 in state record"))
}

pub fn read_oid<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<ObjectId> {
    ObjectId::try_parse(read_string(reader)?)
}
