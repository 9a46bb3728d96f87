//! Sequential reads from the external flash chip
//!
//! The flash is paged and streamed: a read is opened at an address and
//! then clocked forward byte by byte. There is no seeking inside an open
//! read, and the chip can serve only one read at a time.
//!
//! [`AssetStream::open_read`] hands out a [`ReadHandle`] that mutably
//! borrows the stream, so a second read cannot be opened while the first
//! one is alive.
//!
//! # Example
//!
//! ```no_run
//! use mech::assets::Bank;
//! use mech::stream::{AssetStream, FlashDevice};
//!
//! fn first_bytes<F: FlashDevice>(flash: &mut F) {
//!     let mut stream = AssetStream::new(flash);
//!     let mut buf = [0u8; 4];
//!     let mut handle = stream.open_read(Bank::Data, 0x78, 4).unwrap();
//!     handle.read(&mut buf).unwrap();
//!     handle.close();
//! }
//! ```

use core::fmt;

use crate::assets::Bank;

/// Asset stream errors
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StreamError {
    /// The requested range is outside the bank
    AssetNotFound { bank: Bank, offset: u32, len: u32 },
    /// The chip cannot be addressed right now; retry later
    DeviceBusy,
    /// Fewer bytes are available than requested
    Truncated { wanted: usize, available: usize },
    /// Writes are only accepted by the save bank
    ReadOnly,
}

impl StreamError {
    /// Whether the caller may try the same operation again
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, StreamError::DeviceBusy)
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::AssetNotFound { bank, offset, len } => write!(
                f,
                "no asset at {} bank {:#08x}..{:#08x}",
                bank,
                offset,
                offset.saturating_add(*len)
            ),
            StreamError::DeviceBusy => write!(f, "flash device busy"),
            StreamError::Truncated { wanted, available } => {
                write!(f, "truncated read: wanted {} bytes, {} available", wanted, available)
            }
            StreamError::ReadOnly => write!(f, "bank is read-only"),
        }
    }
}

/// External flash chip
///
/// Implemented by the board support code; tests use an in-memory fake.
pub trait FlashDevice {
    /// Total size of a bank in bytes
    fn bank_size(&self, bank: Bank) -> u32;

    /// Whether the chip is in the middle of another operation
    fn is_busy(&self) -> bool;

    /// Read `buf.len()` bytes starting at a bank-relative address
    ///
    /// Returns the number of bytes actually delivered.
    fn read(&mut self, bank: Bank, addr: u32, buf: &mut [u8]) -> usize;

    /// Program bytes into the save bank
    fn write(&mut self, bank: Bank, addr: u32, data: &[u8]) -> Result<(), StreamError>;
}

impl<F: FlashDevice + ?Sized> FlashDevice for &mut F {
    fn bank_size(&self, bank: Bank) -> u32 {
        (**self).bank_size(bank)
    }

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }

    fn read(&mut self, bank: Bank, addr: u32, buf: &mut [u8]) -> usize {
        (**self).read(bank, addr, buf)
    }

    fn write(&mut self, bank: Bank, addr: u32, data: &[u8]) -> Result<(), StreamError> {
        (**self).write(bank, addr, data)
    }
}

/// Single-cursor access to the flash chip
pub struct AssetStream<F: FlashDevice> {
    device: F,
}

impl<F: FlashDevice> AssetStream<F> {
    pub fn new(device: F) -> Self {
        Self { device }
    }

    /// Borrow the underlying device
    pub fn device(&mut self) -> &mut F {
        &mut self.device
    }

    /// Give the device back
    pub fn into_inner(self) -> F {
        self.device
    }

    /// Open a forward-only read over `[offset, offset + length)` of `bank`
    pub fn open_read(&mut self, bank: Bank, offset: u32, length: u32) -> Result<ReadHandle<'_, F>, StreamError> {
        let end = offset.checked_add(length);
        match end {
            Some(end) if end <= self.device.bank_size(bank) => {}
            _ => {
                return Err(StreamError::AssetNotFound {
                    bank,
                    offset,
                    len: length,
                });
            }
        }
        if self.device.is_busy() {
            return Err(StreamError::DeviceBusy);
        }
        Ok(ReadHandle {
            stream: self,
            bank,
            cursor: offset,
            remaining: length,
        })
    }
}

/// An open read; dropping it or calling [`ReadHandle::close`] ends it
pub struct ReadHandle<'a, F: FlashDevice> {
    stream: &'a mut AssetStream<F>,
    bank: Bank,
    cursor: u32,
    remaining: u32,
}

impl<F: FlashDevice> ReadHandle<'_, F> {
    /// Bytes left in the opened range
    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Fill `buf` from the current position and advance
    ///
    /// Asking for more than [`remaining`](Self::remaining) fails with
    /// [`StreamError::Truncated`] before touching the device, so no byte
    /// outside the opened range is ever returned.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, StreamError> {
        let available = self.remaining as usize;
        if buf.len() > available {
            return Err(StreamError::Truncated {
                wanted: buf.len(),
                available,
            });
        }
        if buf.is_empty() {
            return Ok(0);
        }

        let got = self.stream.device.read(self.bank, self.cursor, buf);
        self.cursor += got as u32;
        self.remaining -= got as u32;
        if got < buf.len() {
            return Err(StreamError::Truncated {
                wanted: buf.len(),
                available: got,
            });
        }
        Ok(got)
    }

    /// Skip forward without copying
    pub fn skip(&mut self, count: u32) -> Result<(), StreamError> {
        if count > self.remaining {
            return Err(StreamError::Truncated {
                wanted: count as usize,
                available: self.remaining as usize,
            });
        }
        self.cursor += count;
        self.remaining -= count;
        Ok(())
    }

    /// End the read
    pub fn close(self) {}
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    /// In-memory flash with both banks and a scripted busy flag
    pub struct MemFlash {
        pub data: Vec<u8>,
        pub save: Vec<u8>,
        /// Number of upcoming busy polls that report busy
        pub busy_polls: Cell<u32>,
        /// Bytes past this bank offset read back as missing
        pub short_after: Option<u32>,
        pub reads: u32,
    }

    impl MemFlash {
        pub fn new(data: Vec<u8>, save_len: usize) -> Self {
            Self {
                data,
                save: vec![0xFF; save_len],
                busy_polls: Cell::new(0),
                short_after: None,
                reads: 0,
            }
        }
    }

    impl FlashDevice for MemFlash {
        fn bank_size(&self, bank: Bank) -> u32 {
            match bank {
                Bank::Data => self.data.len() as u32,
                Bank::Save => self.save.len() as u32,
            }
        }

        fn is_busy(&self) -> bool {
            let left = self.busy_polls.get();
            self.busy_polls.set(left.saturating_sub(1));
            left > 0
        }

        fn read(&mut self, bank: Bank, addr: u32, buf: &mut [u8]) -> usize {
            self.reads += 1;
            let src = match bank {
                Bank::Data => &self.data,
                Bank::Save => &self.save,
            };
            let limit = self
                .short_after
                .map_or(src.len(), |s| (s as usize).min(src.len()));
            let start = (addr as usize).min(limit);
            let n = buf.len().min(limit - start);
            buf[..n].copy_from_slice(&src[start..start + n]);
            n
        }

        fn write(&mut self, bank: Bank, addr: u32, data: &[u8]) -> Result<(), StreamError> {
            if bank != Bank::Save {
                return Err(StreamError::ReadOnly);
            }
            let start = addr as usize;
            self.save[start..start + data.len()].copy_from_slice(data);
            Ok(())
        }
    }

    fn counting(len: usize) -> MemFlash {
        MemFlash::new((0..len).map(|i| i as u8).collect(), 16)
    }

    #[test]
    fn test_sequential_reads() {
        let mut stream = AssetStream::new(counting(64));
        let mut handle = stream.open_read(Bank::Data, 10, 6).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(handle.read(&mut buf).unwrap(), 4);
        assert_eq!(buf, [10, 11, 12, 13]);
        let mut rest = [0u8; 2];
        handle.read(&mut rest).unwrap();
        assert_eq!(rest, [14, 15]);
        assert_eq!(handle.remaining(), 0);
    }

    #[test]
    fn test_read_past_end_is_truncated() {
        let mut stream = AssetStream::new(counting(64));
        let mut handle = stream.open_read(Bank::Data, 60, 4).unwrap();
        let mut buf = [0xAAu8; 8];
        let err = handle.read(&mut buf).unwrap_err();
        assert_eq!(err, StreamError::Truncated { wanted: 8, available: 4 });
        // nothing was copied
        assert_eq!(buf, [0xAA; 8]);
    }

    #[test]
    fn test_open_outside_bank() {
        let mut stream = AssetStream::new(counting(64));
        assert!(matches!(
            stream.open_read(Bank::Data, 60, 5),
            Err(StreamError::AssetNotFound { offset: 60, len: 5, .. })
        ));
        assert!(matches!(
            stream.open_read(Bank::Data, u32::MAX, 2),
            Err(StreamError::AssetNotFound { .. })
        ));
    }

    #[test]
    fn test_busy_device() {
        let mut flash = counting(64);
        flash.busy_polls.set(1);
        let mut stream = AssetStream::new(flash);
        let err = stream.open_read(Bank::Data, 0, 4).err().unwrap();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_short_device_read() {
        let mut flash = counting(64);
        flash.short_after = Some(12);
        let mut stream = AssetStream::new(flash);
        let mut handle = stream.open_read(Bank::Data, 8, 8).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(
            handle.read(&mut buf).unwrap_err(),
            StreamError::Truncated { wanted: 8, available: 4 }
        );
        assert!(!StreamError::Truncated { wanted: 8, available: 4 }.is_retryable());
    }

    #[test]
    fn test_skip() {
        let mut stream = AssetStream::new(counting(64));
        let mut handle = stream.open_read(Bank::Data, 0, 10).unwrap();
        handle.skip(7).unwrap();
        let mut buf = [0u8; 3];
        handle.read(&mut buf).unwrap();
        assert_eq!(buf, [7, 8, 9]);
        assert!(handle.skip(1).is_err());
    }
}
