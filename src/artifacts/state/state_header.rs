use crate::artifacts::state::{HEADER_SIZE, SIGNATURE, VERSION};
use anyhow::anyhow;
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
}

impl StateHeader {
    pub(crate) fn current() -> Self {
        StateHeader {
            marker: String::from(SIGNATURE),
            version: VERSION,
        }
    }

    pub(crate) fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;

        Ok(Bytes::from(bytes))
    }

    pub(crate) fn deserialize(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(anyhow!("Invalid header size"));
        }

        let marker = String::from_utf8(bytes[0..4].to_vec())
            .map_err(|_| anyhow!("Invalid marker in state header"))?;
        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);

        Ok(StateHeader { marker, version })
    }
}
