//! Inbound key/value messages from the paired phone.
//!
//! A [`Message`] is an ordered set of integer tuples. On the wire it is a
//! dictionary frame:
//!
//! ```text
//! u8 count
//! count × { u32 key (LE), u8 type, u16 length (LE), value[length] }
//! ```
//!
//! Type `0` is a byte array, `1` a C string, `2` an unsigned integer and `3`
//! a signed integer. Integers are little-endian with a width of 1, 2 or 4
//! bytes. Byte arrays and strings carry nothing this device uses and are
//! skipped while decoding.

extern crate alloc;

use alloc::vec::Vec as AllocVec;

use heapless::Vec;
use log::debug;
use thiserror_no_std::Error;

use crate::metrics::{MetricId, MetricStore};
use crate::settings::Units;
use crate::zone::{TargetKind, TargetSpec};

/// Inbound message keys.
pub mod keys {
    pub const HEART_RATE: u32 = 1;
    pub const PACE: u32 = 2;
    pub const CADENCE: u32 = 3;
    pub const DISTANCE: u32 = 4;
    /// Reserved, ignored
    pub const STATUS: u32 = 5;
    pub const UNITS: u32 = 6;
    pub const POWER: u32 = 7;
    pub const TARGET_KIND: u32 = 8;
    pub const TARGET_LOW: u32 = 9;
    pub const TARGET_HIGH: u32 = 10;
}

/// Maximum number of tuples accepted in one message.
pub const MAX_TUPLES: usize = 16;

const TYPE_BYTES: u8 = 0;
const TYPE_CSTRING: u8 = 1;
const TYPE_UINT: u8 = 2;
const TYPE_INT: u8 = 3;

/// Errors raised while decoding a wire frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The frame ended before the announced data
    #[error("Frame truncated at byte {offset}")]
    Truncated { offset: usize },

    /// Tuple type byte is not one of the known types
    #[error("Unsupported tuple type {type_code} for key {key}")]
    UnsupportedType { key: u32, type_code: u8 },

    /// Integer tuple with a width other than 1, 2 or 4
    #[error("Unsupported integer width {width} for key {key}")]
    UnsupportedWidth { key: u32, width: u16 },

    /// More tuples than a message can hold
    #[error("Too many tuples (max: {max})")]
    TooManyTuples { max: usize },
}

/// Integer payload of one tuple, tagged with its wire width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TupleValue {
    U8(u8),
    U16(u16),
    U32(u32),
    I8(i8),
    I16(i16),
    I32(i32),
}

impl TupleValue {
    /// Raw bits as `u32`; signed values are sign-extended first.
    pub fn bits(self) -> u32 {
        match self {
            Self::U8(v) => u32::from(v),
            Self::U16(v) => u32::from(v),
            Self::U32(v) => v,
            Self::I8(v) => i32::from(v) as u32,
            Self::I16(v) => i32::from(v) as u32,
            Self::I32(v) => v as u32,
        }
    }

    /// Value truncated to a `u8` field.
    pub fn as_u8(self) -> u8 {
        self.bits() as u8
    }

    /// Value truncated to a `u16` field.
    pub fn as_u16(self) -> u16 {
        self.bits() as u16
    }

    fn type_code(self) -> u8 {
        match self {
            Self::U8(_) | Self::U16(_) | Self::U32(_) => TYPE_UINT,
            Self::I8(_) | Self::I16(_) | Self::I32(_) => TYPE_INT,
        }
    }

    fn width(self) -> u16 {
        match self {
            Self::U8(_) | Self::I8(_) => 1,
            Self::U16(_) | Self::I16(_) => 2,
            Self::U32(_) | Self::I32(_) => 4,
        }
    }

    fn decode(key: u32, type_code: u8, raw: &[u8]) -> Result<Self, ProtocolError> {
        let value = match (type_code, raw) {
            (TYPE_UINT, [b]) => Self::U8(*b),
            (TYPE_UINT, [a, b]) => Self::U16(u16::from_le_bytes([*a, *b])),
            (TYPE_UINT, [a, b, c, d]) => Self::U32(u32::from_le_bytes([*a, *b, *c, *d])),
            (TYPE_INT, [b]) => Self::I8(*b as i8),
            (TYPE_INT, [a, b]) => Self::I16(i16::from_le_bytes([*a, *b])),
            (TYPE_INT, [a, b, c, d]) => Self::I32(i32::from_le_bytes([*a, *b, *c, *d])),
            _ => {
                return Err(ProtocolError::UnsupportedWidth {
                    key,
                    width: raw.len() as u16,
                });
            }
        };
        Ok(value)
    }

    fn encode_into(self, out: &mut AllocVec<u8>) {
        match self {
            Self::U8(v) => out.push(v),
            Self::U16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I8(v) => out.push(v as u8),
            Self::I16(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::I32(v) => out.extend_from_slice(&v.to_le_bytes()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuple {
    pub key: u32,
    pub value: TupleValue,
}

/// What applying a message changed, beyond the metric channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Applied {
    /// Units carried by the message, to be applied and persisted
    pub units: Option<Units>,
    /// Any of the target kind/low/high keys was present
    pub target_touched: bool,
    /// Number of metric channels updated
    pub metrics_updated: usize,
}

/// One inbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    tuples: Vec<Tuple, MAX_TUPLES>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tuple, builder style.
    pub fn with(mut self, key: u32, value: TupleValue) -> Result<Self, ProtocolError> {
        self.push(key, value)?;
        Ok(self)
    }

    pub fn push(&mut self, key: u32, value: TupleValue) -> Result<(), ProtocolError> {
        self.tuples
            .push(Tuple { key, value })
            .map_err(|_| ProtocolError::TooManyTuples { max: MAX_TUPLES })
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    /// First value stored under `key`.
    pub fn get(&self, key: u32) -> Option<TupleValue> {
        self.tuples.iter().find(|t| t.key == key).map(|t| t.value)
    }

    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Decode a dictionary frame.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = Reader::new(bytes);
        let count = reader.u8()? as usize;
        if count > MAX_TUPLES {
            return Err(ProtocolError::TooManyTuples { max: MAX_TUPLES });
        }

        let mut message = Self::new();
        for _ in 0..count {
            let key = reader.u32()?;
            let type_code = reader.u8()?;
            let length = reader.u16()?;
            let raw = reader.take(length as usize)?;

            match type_code {
                TYPE_UINT | TYPE_INT => {
                    let value = TupleValue::decode(key, type_code, raw)?;
                    message.push(key, value)?;
                }
                TYPE_BYTES | TYPE_CSTRING => {
                    debug!("Skipping non-integer tuple for key {}", key);
                }
                _ => return Err(ProtocolError::UnsupportedType { key, type_code }),
            }
        }

        if reader.remaining() > 0 {
            debug!("Ignoring {} trailing bytes after message", reader.remaining());
        }

        Ok(message)
    }

    /// Encode as a dictionary frame.
    pub fn to_bytes(&self) -> AllocVec<u8> {
        let mut out = AllocVec::with_capacity(1 + self.tuples.len() * 11);
        out.push(self.tuples.len() as u8);
        for tuple in &self.tuples {
            out.extend_from_slice(&tuple.key.to_le_bytes());
            out.push(tuple.value.type_code());
            out.extend_from_slice(&tuple.value.width().to_le_bytes());
            tuple.value.encode_into(&mut out);
        }
        out
    }

    /// Apply every known key to `metrics` and `target`.
    ///
    /// Keys not present leave state untouched. Values wider than their field
    /// are truncated to the field width. Unknown keys and the status key are
    /// ignored.
    pub fn apply(&self, metrics: &mut MetricStore, target: &mut TargetSpec) -> Applied {
        let mut applied = Applied::default();

        for tuple in &self.tuples {
            let value = tuple.value;
            let metric = match tuple.key {
                keys::HEART_RATE => Some((MetricId::HeartRate, u32::from(value.as_u16()))),
                keys::PACE => Some((MetricId::Pace, u32::from(value.as_u16()))),
                keys::CADENCE => Some((MetricId::Cadence, u32::from(value.as_u16()))),
                keys::DISTANCE => Some((MetricId::Distance, value.bits())),
                keys::POWER => Some((MetricId::Power, u32::from(value.as_u16()))),
                keys::UNITS => {
                    applied.units = Some(Units::from_wire(u32::from(value.as_u8())));
                    None
                }
                keys::TARGET_KIND => {
                    target.kind = TargetKind::from_wire(u32::from(value.as_u8()));
                    applied.target_touched = true;
                    None
                }
                keys::TARGET_LOW => {
                    target.lo = value.as_u16();
                    applied.target_touched = true;
                    None
                }
                keys::TARGET_HIGH => {
                    target.hi = value.as_u16();
                    applied.target_touched = true;
                    None
                }
                keys::STATUS => None,
                other => {
                    debug!("Ignoring unknown key {}", other);
                    None
                }
            };

            if let Some((id, raw)) = metric {
                metrics.set(id, raw);
                applied.metrics_updated += 1;
            }
        }

        applied
    }
}

/// Little-endian cursor over a frame.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        let end = self.offset.checked_add(len).filter(|&end| end <= self.bytes.len());
        let Some(end) = end else {
            return Err(ProtocolError::Truncated {
                offset: self.bytes.len(),
            });
        };
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ProtocolError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ProtocolError> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ProtocolError> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
