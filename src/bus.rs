/*!
Bus abstraction routing the 16-bit CPU address space to registered devices.

The bus owns an ordered list of bindings `{device, start, end}`. Reads and
writes scan the list and dispatch to the first binding whose inclusive
range contains the address; with at most 16 bindings the linear scan is
cheaper than anything fancier. Addresses no binding claims behave like an
open bus: reads float high (`0xFF`), writes vanish.

Bindings must not overlap; `connect` rejects an overlapping range so a
host cannot accidentally shadow a device. The 16-binding cap mirrors the
fixed device table of the reference hardware model: connections past the
cap are dropped (with a log) rather than treated as fatal.
*/

use crate::error::CpuError;
use crate::memory::MemoryDevice;

/// Maximum number of device bindings.
pub const MAX_DEVICES: usize = 16;

struct Binding {
    device: Box<dyn MemoryDevice>,
    start: u16,
    end: u16,
}

/// 16-bit address router. See the module docs for dispatch rules.
pub struct Bus {
    bindings: Vec<Binding>,
}

impl Bus {
    /// Create a bus with no devices attached.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Attach `device` to the inclusive address range `start..=end`.
    ///
    /// Fails with `InvalidArgument` when `start > end` or the range
    /// overlaps an existing binding. When the device table is full the
    /// connection is dropped silently (logged), matching the fixed-size
    /// table it models.
    pub fn connect(
        &mut self,
        device: Box<dyn MemoryDevice>,
        start: u16,
        end: u16,
    ) -> Result<(), CpuError> {
        if start > end {
            return Err(CpuError::InvalidArgument);
        }
        if self
            .bindings
            .iter()
            .any(|b| start <= b.end && b.start <= end)
        {
            return Err(CpuError::InvalidArgument);
        }
        if self.bindings.len() >= MAX_DEVICES {
            log::warn!("bus device table full; dropping binding ${start:04X}-${end:04X}");
            return Ok(());
        }
        self.bindings.push(Binding { device, start, end });
        Ok(())
    }

    /// Number of attached devices.
    pub fn device_count(&self) -> usize {
        self.bindings.len()
    }

    /// Read one byte. Unmapped addresses read as `0xFF`.
    pub fn read(&mut self, addr: u16) -> u8 {
        for binding in &mut self.bindings {
            if addr >= binding.start && addr <= binding.end {
                return binding.device.read(addr);
            }
        }
        0xFF
    }

    /// Write one byte. Unmapped addresses swallow the write.
    pub fn write(&mut self, addr: u16, data: u8) {
        for binding in &mut self.bindings {
            if addr >= binding.start && addr <= binding.end {
                binding.device.write(addr, data);
                return;
            }
        }
    }

    /// Read a little-endian 16-bit word at `addr`/`addr + 1` (used for
    /// the hardware vectors).
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Ram;

    fn ram(size: usize) -> Box<Ram> {
        Box::new(Ram::new(size).expect("alloc test ram"))
    }

    #[test]
    fn routes_to_first_matching_binding() {
        let mut bus = Bus::new();
        bus.connect(ram(0x10000), 0x0000, 0x7FFF).unwrap();
        bus.connect(ram(0x10000), 0x8000, 0xFFFF).unwrap();
        bus.write(0x1234, 0xAA);
        bus.write(0x9234, 0xBB);
        assert_eq!(bus.read(0x1234), 0xAA);
        assert_eq!(bus.read(0x9234), 0xBB);
    }

    #[test]
    fn unmapped_reads_float_high_and_writes_drop() {
        let mut bus = Bus::new();
        bus.connect(ram(0x100), 0x0000, 0x00FF).unwrap();
        assert_eq!(bus.read(0x4000), 0xFF);
        bus.write(0x4000, 0x55); // swallowed
        assert_eq!(bus.read(0x4000), 0xFF);
    }

    #[test]
    fn rejects_overlapping_ranges() {
        let mut bus = Bus::new();
        bus.connect(ram(0x1000), 0x1000, 0x1FFF).unwrap();
        assert!(bus.connect(ram(0x1000), 0x1800, 0x27FF).is_err());
        assert!(bus.connect(ram(0x1000), 0x0000, 0x1000).is_err());
        // Touching but disjoint ranges are fine.
        assert!(bus.connect(ram(0x1000), 0x2000, 0x2FFF).is_ok());
        assert_eq!(bus.device_count(), 2);
    }

    #[test]
    fn rejects_inverted_range() {
        let mut bus = Bus::new();
        assert!(bus.connect(ram(0x100), 0x2000, 0x1000).is_err());
    }

    #[test]
    fn capacity_overflow_drops_silently() {
        let mut bus = Bus::new();
        for i in 0..MAX_DEVICES as u16 {
            bus.connect(ram(0x100), i * 0x100, i * 0x100 + 0xFF).unwrap();
        }
        // Seventeenth device: accepted call, dropped binding.
        assert!(bus.connect(ram(0x100), 0xF000, 0xF0FF).is_ok());
        assert_eq!(bus.device_count(), MAX_DEVICES);
        assert_eq!(bus.read(0xF000), 0xFF);
    }

    #[test]
    fn read_word_is_little_endian() {
        let mut bus = Bus::new();
        bus.connect(ram(0x10000), 0x0000, 0xFFFF).unwrap();
        bus.write(0xFFFC, 0x34);
        bus.write(0xFFFD, 0x12);
        assert_eq!(bus.read_word(0xFFFC), 0x1234);
    }
}
