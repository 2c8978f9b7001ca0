/*!
Thread-safe IRQ/NMI latch.

Host and device threads post interrupt requests here; the stepper drains
the latch at the top of every instruction step. NMI is edge-triggered:
taking it clears the latch. IRQ is latched the same way but is only taken
(and cleared) while the CPU's interrupt-disable flag is clear, so a
request posted under `SEI` is serviced after the next `CLI`/`PLP`/`RTI`
that unmasks it.
*/

use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Pending {
    irq: bool,
    nmi: bool,
}

/// Pair of pending-interrupt flags behind one mutex. Posting is
/// idempotent; a request is consumed exactly once.
pub struct InterruptLatch {
    pending: Mutex<Pending>,
}

impl InterruptLatch {
    /// Create a latch with nothing pending.
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Pending::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Post a maskable interrupt request.
    pub fn post_irq(&self) {
        self.lock().irq = true;
    }

    /// Post a non-maskable interrupt request.
    pub fn post_nmi(&self) {
        self.lock().nmi = true;
    }

    /// Atomically decide what the CPU should service and clear those
    /// flags. Returns `(service_nmi, service_irq)`:
    /// - NMI is always taken when pending.
    /// - IRQ is taken only when pending and `irq_masked` is false; a
    ///   masked IRQ stays latched.
    ///
    /// NMI wins when both are pending; the IRQ remains latched for a
    /// later step in that case.
    pub fn take_pending(&self, irq_masked: bool) -> (bool, bool) {
        let mut pending = self.lock();
        let service_nmi = pending.nmi;
        if service_nmi {
            pending.nmi = false;
            return (true, false);
        }
        let service_irq = pending.irq && !irq_masked;
        if service_irq {
            pending.irq = false;
        }
        (false, service_irq)
    }

    /// Drop any pending requests (used by RESET).
    pub fn clear(&self) {
        let mut pending = self.lock();
        pending.irq = false;
        pending.nmi = false;
    }

    /// Snapshot of the flags, for host status displays.
    pub fn is_pending(&self) -> (bool, bool) {
        let pending = self.lock();
        (pending.nmi, pending.irq)
    }
}

impl Default for InterruptLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nmi_taken_once() {
        let latch = InterruptLatch::new();
        latch.post_nmi();
        assert_eq!(latch.take_pending(false), (true, false));
        assert_eq!(latch.take_pending(false), (false, false));
    }

    #[test]
    fn irq_respects_mask() {
        let latch = InterruptLatch::new();
        latch.post_irq();
        // Masked: not taken, still latched.
        assert_eq!(latch.take_pending(true), (false, false));
        // Unmasked: taken and cleared.
        assert_eq!(latch.take_pending(false), (false, true));
        assert_eq!(latch.take_pending(false), (false, false));
    }

    #[test]
    fn nmi_wins_over_irq() {
        let latch = InterruptLatch::new();
        latch.post_irq();
        latch.post_nmi();
        assert_eq!(latch.take_pending(false), (true, false));
        // IRQ survives for the next step.
        assert_eq!(latch.take_pending(false), (false, true));
    }

    #[test]
    fn posting_is_idempotent() {
        let latch = InterruptLatch::new();
        latch.post_irq();
        latch.post_irq();
        assert_eq!(latch.take_pending(false), (false, true));
        assert_eq!(latch.take_pending(false), (false, false));
    }

    #[test]
    fn clear_drops_everything() {
        let latch = InterruptLatch::new();
        latch.post_irq();
        latch.post_nmi();
        latch.clear();
        assert_eq!(latch.is_pending(), (false, false));
        assert_eq!(latch.take_pending(false), (false, false));
    }
}
