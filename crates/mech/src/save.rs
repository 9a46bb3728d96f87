//! Persisted game state in the save bank
//!
//! One fixed-size record lives at the start of the save bank:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 2 | magic `"MF"` |
//! | 2 | 1 | version |
//! | 3 | 1 | mech class |
//! | 4 | 4 | credits (BE) |
//! | 8 | 1 | mission |
//! | 9 | 1 | reserved |
//! | 10 | 4 | generation (BE) |
//! | 14 | 2 | checksum (BE) |
//!
//! The checksum is the 16-bit sum of the big-endian words before it.
//! Erased flash reads back as `0xFF` and fails the magic check.

use core::fmt;

use crate::assets::Bank;
use crate::entity::MechClass;
use crate::stream::{AssetStream, FlashDevice, StreamError};

/// Record identifier
pub const SAVE_MAGIC: [u8; 2] = *b"MF";

/// Current record layout version
pub const SAVE_VERSION: u8 = 1;

/// Encoded record size
pub const SAVE_RECORD_LEN: usize = 16;

const CHECKSUM_OFFSET: usize = SAVE_RECORD_LEN - 2;

/// Save record errors
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SaveError {
    /// No record here (erased or foreign data)
    BadMagic,
    /// Record written by a different layout version
    UnknownVersion(u8),
    /// Stored and computed checksums differ
    Checksum { stored: u16, computed: u16 },
    /// The flash could not be read or written
    Stream(StreamError),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::BadMagic => write!(f, "no save record"),
            SaveError::UnknownVersion(v) => write!(f, "unknown save version {}", v),
            SaveError::Checksum { stored, computed } => write!(
                f,
                "save checksum mismatch: stored {:#06x}, computed {:#06x}",
                stored, computed
            ),
            SaveError::Stream(e) => write!(f, "save bank: {}", e),
        }
    }
}

impl From<StreamError> for SaveError {
    fn from(e: StreamError) -> Self {
        SaveError::Stream(e)
    }
}

/// 16-bit sum of big-endian words; an odd trailing byte is padded with zero
pub fn checksum(data: &[u8]) -> u16 {
    let mut sum: u16 = 0;
    for chunk in data.chunks(2) {
        let word = match *chunk {
            [hi, lo] => u16::from_be_bytes([hi, lo]),
            [hi] => u16::from(hi) << 8,
            _ => 0,
        };
        sum = sum.wrapping_add(word);
    }
    sum
}

/// Progress that survives power-off
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SaveRecord {
    pub class: MechClass,
    pub credits: u32,
    pub mission: u8,
    /// Bumped on every store
    pub generation: u32,
}

impl SaveRecord {
    /// A fresh game
    pub const fn blank() -> Self {
        Self {
            class: MechClass::Light,
            credits: 0,
            mission: 0,
            generation: 0,
        }
    }

    pub fn encode(&self) -> [u8; SAVE_RECORD_LEN] {
        let mut out = [0u8; SAVE_RECORD_LEN];
        out[0..2].copy_from_slice(&SAVE_MAGIC);
        out[2] = SAVE_VERSION;
        out[3] = self.class as u8;
        out[4..8].copy_from_slice(&self.credits.to_be_bytes());
        out[8] = self.mission;
        out[10..14].copy_from_slice(&self.generation.to_be_bytes());
        let sum = checksum(&out[..CHECKSUM_OFFSET]);
        out[CHECKSUM_OFFSET..].copy_from_slice(&sum.to_be_bytes());
        out
    }

    pub fn decode(bytes: &[u8; SAVE_RECORD_LEN]) -> Result<Self, SaveError> {
        if bytes[0..2] != SAVE_MAGIC {
            return Err(SaveError::BadMagic);
        }
        if bytes[2] != SAVE_VERSION {
            return Err(SaveError::UnknownVersion(bytes[2]));
        }
        let stored = u16::from_be_bytes([bytes[CHECKSUM_OFFSET], bytes[CHECKSUM_OFFSET + 1]]);
        let computed = checksum(&bytes[..CHECKSUM_OFFSET]);
        if stored != computed {
            return Err(SaveError::Checksum { stored, computed });
        }
        // a checksummed record with a bad class was written by a bug, not by wear
        Ok(Self {
            class: MechClass::from_raw_or_default(bytes[3]),
            credits: u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            mission: bytes[8],
            generation: u32::from_be_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]),
        })
    }
}

/// Location of the record in the save bank
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SaveSlot {
    offset: u32,
}

impl SaveSlot {
    pub const fn new(offset: u32) -> Self {
        Self { offset }
    }

    /// Read and verify the stored record
    pub fn load<F: FlashDevice>(&self, stream: &mut AssetStream<F>) -> Result<SaveRecord, SaveError> {
        let mut bytes = [0u8; SAVE_RECORD_LEN];
        let mut handle = stream.open_read(Bank::Save, self.offset, SAVE_RECORD_LEN as u32)?;
        handle.read(&mut bytes)?;
        handle.close();
        SaveRecord::decode(&bytes)
    }

    /// Load the stored record, or a blank one if there is none
    ///
    /// Stream errors are still returned; only a missing or damaged record
    /// is replaced.
    pub fn load_or_blank<F: FlashDevice>(&self, stream: &mut AssetStream<F>) -> Result<SaveRecord, SaveError> {
        match self.load(stream) {
            Ok(record) => Ok(record),
            Err(SaveError::Stream(e)) => Err(SaveError::Stream(e)),
            Err(e) => {
                log::warn!("{}, starting fresh", e);
                Ok(SaveRecord::blank())
            }
        }
    }

    /// Bump the generation and write `record`
    pub fn store<F: FlashDevice>(&self, stream: &mut AssetStream<F>, record: &mut SaveRecord) -> Result<(), SaveError> {
        let device = stream.device();
        let end = self.offset.saturating_add(SAVE_RECORD_LEN as u32);
        if end > device.bank_size(Bank::Save) {
            return Err(StreamError::AssetNotFound {
                bank: Bank::Save,
                offset: self.offset,
                len: SAVE_RECORD_LEN as u32,
            }
            .into());
        }
        if device.is_busy() {
            return Err(StreamError::DeviceBusy.into());
        }
        let next = SaveRecord {
            generation: record.generation.wrapping_add(1),
            ..*record
        };
        device.write(Bank::Save, self.offset, &next.encode())?;
        *record = next;
        log::info!("saved generation {}", record.generation);
        Ok(())
    }
}
