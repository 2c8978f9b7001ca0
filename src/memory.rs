/*!
Memory devices: the capability interface plus the two concrete endpoints
the core ships.

A device is anything with `read`/`write`; the bus routes 16-bit addresses
to devices without knowing what is behind them, which is how memory-mapped
I/O gets its side effects. Devices receive the full bus address (not an
offset into their range) so a device can key behavior off well-known
absolute addresses.

Concrete devices
================
- `Ram`: plain byte storage. Out-of-range reads return `0xFF`,
  out-of-range writes are dropped.
- `MonitoredRam`: power-of-two-sized storage addressed through a mask,
  with write side effects on three well-known addresses used by the
  standard 6502 functional-test ROMs. Status text goes to a shared host
  output queue handle supplied at construction.
*/

use std::sync::Arc;

use crate::error::CpuError;
use crate::queue::ByteQueue;

/// Write side effect: emit one character of serial output.
pub const MONITOR_OUTPUT_CHAR: u16 = 0x6000;
/// Write side effect: report overall functional-test status (0 = pass).
pub const MONITOR_TEST_STATUS: u16 = 0x6001;
/// Write side effect: report an extended status / error code.
pub const MONITOR_EXTENDED_STATUS: u16 = 0x6002;

/// Capability interface every bus endpoint implements.
///
/// `Send` is required so a `Cpu` (which owns its bus and devices) can be
/// moved onto a stepper thread.
pub trait MemoryDevice: Send {
    /// Read the byte the device exposes at `addr`.
    fn read(&mut self, addr: u16) -> u8;
    /// Write `data` at `addr`; side effects are device-defined.
    fn write(&mut self, addr: u16, data: u8);
}

/// Allocate a zeroed byte buffer, reporting allocation failure instead
/// of aborting.
fn alloc_backing(size: usize) -> Result<Vec<u8>, CpuError> {
    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .map_err(|_| CpuError::MemoryOverflow)?;
    data.resize(size, 0);
    Ok(data)
}

/// Plain RAM of a caller-chosen size.
pub struct Ram {
    data: Vec<u8>,
}

impl Ram {
    /// Create zero-filled RAM of `size` bytes. `size` must be nonzero.
    pub fn new(size: usize) -> Result<Self, CpuError> {
        if size == 0 {
            return Err(CpuError::InvalidArgument);
        }
        Ok(Self {
            data: alloc_backing(size)?,
        })
    }

    /// Backing size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl MemoryDevice for Ram {
    fn read(&mut self, addr: u16) -> u8 {
        match self.data.get(addr as usize) {
            Some(&byte) => byte,
            None => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, data: u8) {
        if let Some(slot) = self.data.get_mut(addr as usize) {
            *slot = data;
        }
    }
}

/// RAM that additionally reports functional-test progress through the
/// host output queue. Storage is addressed through a power-of-two mask,
/// so every bus address in the device's range aliases into the backing.
pub struct MonitoredRam {
    data: Vec<u8>,
    mask: usize,
    output: Arc<ByteQueue>,
}

impl MonitoredRam {
    /// Create monitored RAM of `size` bytes, wired to `output`. `size`
    /// must be a power of two (the read/write path masks with
    /// `size - 1`).
    pub fn new(size: usize, output: Arc<ByteQueue>) -> Result<Self, CpuError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(CpuError::InvalidArgument);
        }
        Ok(Self {
            data: alloc_backing(size)?,
            mask: size - 1,
            output,
        })
    }

    fn emit_str(&self, text: &str) {
        for byte in text.bytes() {
            if !self.output.enqueue(byte) {
                log::warn!("output queue full; dropping monitor message tail");
                break;
            }
        }
    }
}

impl MemoryDevice for MonitoredRam {
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize & self.mask]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.data[addr as usize & self.mask] = data;

        match addr {
            MONITOR_OUTPUT_CHAR => {
                if !self.output.enqueue(data) {
                    log::warn!("output queue full; dropping character 0x{data:02X}");
                }
            }
            MONITOR_TEST_STATUS => {
                if data == 0x00 {
                    self.emit_str("6502 FUNCTIONAL TEST PASSED\r\n");
                } else {
                    self.emit_str("6502 FUNCTIONAL TEST FAILED\r\n");
                }
            }
            MONITOR_EXTENDED_STATUS => {
                if data == 0x00 {
                    self.emit_str("ADDITIONAL TEST PASSED\r\n");
                } else {
                    self.emit_str(&format!(
                        "ADDITIONAL TEST FAILED AT ${MONITOR_EXTENDED_STATUS:04X}: CODE 0x{data:02X}\r\n"
                    ));
                }
            }
            _ => {}
        }
    }
}
