//! Hand-written fixture records used across the integration tests. These exist to exercise
//! `crate::codec`, `crate::wire`, and `crate::varint` independently of the emitter — a record
//! someone wrote by hand should behave identically to one the emitter would have produced from
//! the equivalent `schema::Record` descriptor (see `tests/emit.rs`).

use colfer::{wire, varint, Decode, DecodeError, Encode, Timestamp};

/// Mirrors the worked example from the format description: `{key:uint64, host:text,
/// port:uint16->uint32, route:bool}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Demo {
    pub key: u64,
    pub host: String,
    pub port: u32,
    pub route: bool,
}

impl Encode for Demo {
    fn encoded_len(&self) -> usize {
        let mut n = 1;
        if self.key != 0 {
            n += 1 + varint::uvarint_size64(self.key);
        }
        if !self.host.is_empty() {
            n += 1 + varint::uvarint_size32(self.host.len() as u32) + self.host.len();
        }
        if self.port != 0 {
            n += 1 + varint::uvarint_size32(self.port);
        }
        if self.route {
            n += 1;
        }
        n
    }

    fn encode_to(&self, buf: &mut [u8]) -> usize {
        buf[0] = wire::MAGIC;
        let mut i = 1;
        if self.key != 0 {
            buf[i] = 0;
            i += 1;
            i = varint::write_uvarint64(buf, i, self.key);
        }
        if !self.host.is_empty() {
            buf[i] = 1;
            i += 1;
            let bytes = self.host.as_bytes();
            i = varint::write_uvarint32(buf, i, bytes.len() as u32);
            buf[i..i + bytes.len()].copy_from_slice(bytes);
            i += bytes.len();
        }
        if self.port != 0 {
            buf[i] = 2;
            i += 1;
            i = varint::write_uvarint32(buf, i, self.port);
        }
        if self.route {
            buf[i] = 3;
            i += 1;
        }
        i
    }
}

impl Decode for Demo {
    fn decode_from(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut value = Self::default();
        let consumed = wire::decode_frame(buf, |header, i| match wire::header_index(header) {
            0 => {
                let (x, i) = varint::read_uvarint64(buf, i)?;
                value.key = x;
                Ok(i)
            }
            1 => {
                let (len, i) = varint::read_uvarint32(buf, i)?;
                let (bytes, i) = wire::take(buf, i, len as usize)?;
                value.host = String::from_utf8_lossy(bytes).into_owned();
                Ok(i)
            }
            2 => {
                let (x, i) = varint::read_uvarint32(buf, i)?;
                value.port = x;
                Ok(i)
            }
            3 => {
                value.route = true;
                Ok(i)
            }
            other => Err(DecodeError::UnknownField { index: other }),
        })?;
        Ok((value, consumed))
    }
}

/// Exercises the signed-integer and timestamp corner cases: `int32_field`, `int64_field`, `ts`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Corners {
    pub int32_field: i32,
    pub int64_field: i64,
    pub ts: Timestamp,
}

impl Encode for Corners {
    fn encoded_len(&self) -> usize {
        let mut n = 1;
        if self.int32_field != 0 {
            n += 1 + varint::uvarint_size32(varint::int32_to_wire(self.int32_field).1);
        }
        if self.int64_field != 0 {
            n += 1 + varint::uvarint_size64(varint::int64_to_wire(self.int64_field).1);
        }
        if !self.ts.is_zero() {
            n += if self.ts.nsec != 0 { 13 } else { 9 };
        }
        n
    }

    fn encode_to(&self, buf: &mut [u8]) -> usize {
        buf[0] = wire::MAGIC;
        let mut i = 1;
        if self.int32_field != 0 {
            let (negative, magnitude) = varint::int32_to_wire(self.int32_field);
            buf[i] = wire::make_header(0, negative);
            i += 1;
            i = varint::write_uvarint32(buf, i, magnitude);
        }
        if self.int64_field != 0 {
            let (negative, magnitude) = varint::int64_to_wire(self.int64_field);
            buf[i] = wire::make_header(1, negative);
            i += 1;
            i = varint::write_uvarint64(buf, i, magnitude);
        }
        if !self.ts.is_zero() {
            let nsec = self.ts.nsec;
            buf[i] = wire::make_header(2, nsec != 0);
            i += 1;
            i = wire::write_be_i64(buf, i, self.ts.sec);
            if nsec != 0 {
                i = wire::write_be_u32(buf, i, nsec);
            }
        }
        i
    }
}

impl Decode for Corners {
    fn decode_from(buf: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut value = Self::default();
        let consumed = wire::decode_frame(buf, |header, i| match wire::header_index(header) {
            0 => {
                let (magnitude, i) = varint::read_uvarint32(buf, i)?;
                value.int32_field = varint::wire_to_int32(wire::header_modifier(header), magnitude);
                Ok(i)
            }
            1 => {
                let (magnitude, i) = varint::read_uvarint64(buf, i)?;
                value.int64_field = varint::wire_to_int64(wire::header_modifier(header), magnitude);
                Ok(i)
            }
            2 => {
                let (sec, i) = wire::read_be_i64(buf, i)?;
                let (nsec, i) = if wire::header_modifier(header) {
                    wire::read_be_u32(buf, i)?
                } else {
                    (0, i)
                };
                value.ts = Timestamp::new(sec, nsec);
                Ok(i)
            }
            other => Err(DecodeError::UnknownField { index: other }),
        })?;
        Ok((value, consumed))
    }
}
