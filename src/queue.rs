/*!
Bounded thread-safe byte FIFO used for host<->CPU serial traffic.

Overview
========
`ByteQueue` is a fixed-capacity (1024) ring buffer guarded by a single
mutex. Two instances hang off every `Cpu`: the input queue carries host
keystrokes toward the `$D011` input port, the output queue carries bytes
written to `$D012` (or to monitored-RAM addresses) back to the host.

Contract
========
- `enqueue` never blocks; it reports `false` when the ring is full.
- `dequeue` never blocks; `None` means empty.
- Producers that want back-pressure implement it outside the core; the
  queue itself only ever takes its mutex for a few instructions.

All handles are `Arc<ByteQueue>`; cloning a handle is how the host wires
a reader/writer thread to the CPU.
*/

use std::sync::{Mutex, MutexGuard};

/// Ring capacity in bytes. Matches the serial buffering the reference
/// machines need; a full queue simply drops the newest byte.
pub const QUEUE_CAPACITY: usize = 1024;

struct Ring {
    data: [u8; QUEUE_CAPACITY],
    head: usize,
    tail: usize,
    count: usize,
}

/// Bounded, mutex-guarded FIFO of bytes.
pub struct ByteQueue {
    ring: Mutex<Ring>,
}

impl ByteQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            ring: Mutex::new(Ring {
                data: [0; QUEUE_CAPACITY],
                head: 0,
                tail: 0,
                count: 0,
            }),
        }
    }

    // The core never panics while holding the mutex, so a poisoned lock
    // only ever means a host thread died mid-operation; recover the
    // guard rather than cascading the panic into the stepper.
    fn lock(&self) -> MutexGuard<'_, Ring> {
        self.ring.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append one byte. Returns `false` (and drops the byte) when the
    /// queue is full. Never blocks beyond the mutex.
    pub fn enqueue(&self, byte: u8) -> bool {
        let mut ring = self.lock();
        if ring.count == QUEUE_CAPACITY {
            return false;
        }
        let tail = ring.tail;
        ring.data[tail] = byte;
        ring.tail = (tail + 1) % QUEUE_CAPACITY;
        ring.count += 1;
        true
    }

    /// Remove and return the oldest byte, or `None` when empty.
    pub fn dequeue(&self) -> Option<u8> {
        let mut ring = self.lock();
        if ring.count == 0 {
            return None;
        }
        let byte = ring.data[ring.head];
        ring.head = (ring.head + 1) % QUEUE_CAPACITY;
        ring.count -= 1;
        Some(byte)
    }

    /// Drop all buffered bytes.
    pub fn clear(&self) {
        let mut ring = self.lock();
        ring.head = 0;
        ring.tail = 0;
        ring.count = 0;
    }

    /// True when no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.lock().count == 0
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.lock().count
    }
}

impl Default for ByteQueue {
    fn default() -> Self {
        Self::new()
    }
}
