/*!
Instruction semantic helpers: ALU, stack choreography, shifts, and the
read-modify-write pattern.

Every dispatch family routes through these so the semantics live in one
place. Helpers take `&mut Cpu` because stack and memory operands travel
through the CPU's port-aware `read`/`write`; pure register/flag work is
delegated down to `CpuState`.

Decimal mode
============
When the D flag is set, ADC and SBC operate on packed BCD digits. The
addition adjusts nibble-wise (low digit over 9 carries into the high
digit, high digit over 9 sets carry out); the subtraction mirrors it with
a ripple borrow and C reporting "no borrow". N and Z follow the packed
result; V is still computed from the binary operation so the bit stays
deterministic even though NMOS hardware leaves it architecturally
meaningless in decimal mode.
*/

use crate::cpu::Cpu;
use crate::cpu::state::{CARRY, DECIMAL, NEGATIVE, OVERFLOW, ZERO};

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------
//
// The stack lives in page $01 with SP post-decrement on push and
// pre-increment on pull:
//   push: write $0100 | SP, then SP -= 1
//   pull: SP += 1, then read $0100 | SP

#[inline]
pub(crate) fn push(cpu: &mut Cpu, value: u8) {
    let addr = 0x0100u16 | cpu.state.sp as u16;
    cpu.write(addr, value);
    cpu.state.sp = cpu.state.sp.wrapping_sub(1);
}

#[inline]
pub(crate) fn pop(cpu: &mut Cpu) -> u8 {
    cpu.state.sp = cpu.state.sp.wrapping_add(1);
    let addr = 0x0100u16 | cpu.state.sp as u16;
    cpu.read(addr)
}

/// Push a word high byte first (6502 return-address layout).
#[inline]
pub(crate) fn push_word(cpu: &mut Cpu, value: u16) {
    push(cpu, (value >> 8) as u8);
    push(cpu, (value & 0xFF) as u8);
}

#[inline]
pub(crate) fn pop_word(cpu: &mut Cpu) -> u16 {
    let lo = pop(cpu) as u16;
    let hi = pop(cpu) as u16;
    (hi << 8) | lo
}

/// Push P with the B-bit discipline: B set for BRK/PHP images, clear for
/// hardware interrupt images; bit 5 always set.
pub(crate) fn push_status_with_break(cpu: &mut Cpu, set_break: bool) {
    let image = cpu.state.compose_status_for_push(set_break);
    push(cpu, image);
}

pub(crate) fn php(cpu: &mut Cpu) {
    push_status_with_break(cpu, true);
}

pub(crate) fn plp(cpu: &mut Cpu) {
    let image = pop(cpu);
    cpu.state.load_status_from_stack(image);
}

pub(crate) fn pha(cpu: &mut Cpu) {
    let a = cpu.state.a;
    push(cpu, a);
}

pub(crate) fn pla(cpu: &mut Cpu) {
    let value = pop(cpu);
    cpu.state.a = value;
    cpu.state.update_zn(value);
}

// ---------------------------------------------------------------------------
// Loads and transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda(cpu: &mut Cpu, value: u8) {
    cpu.state.a = value;
    cpu.state.update_zn(value);
}

#[inline]
pub(crate) fn ldx(cpu: &mut Cpu, value: u8) {
    cpu.state.x = value;
    cpu.state.update_zn(value);
}

#[inline]
pub(crate) fn ldy(cpu: &mut Cpu, value: u8) {
    cpu.state.y = value;
    cpu.state.update_zn(value);
}

pub(crate) fn tax(cpu: &mut Cpu) {
    cpu.state.x = cpu.state.a;
    cpu.state.update_zn(cpu.state.x);
}

pub(crate) fn tay(cpu: &mut Cpu) {
    cpu.state.y = cpu.state.a;
    cpu.state.update_zn(cpu.state.y);
}

pub(crate) fn txa(cpu: &mut Cpu) {
    cpu.state.a = cpu.state.x;
    cpu.state.update_zn(cpu.state.a);
}

pub(crate) fn tya(cpu: &mut Cpu) {
    cpu.state.a = cpu.state.y;
    cpu.state.update_zn(cpu.state.a);
}

pub(crate) fn tsx(cpu: &mut Cpu) {
    cpu.state.x = cpu.state.sp;
    cpu.state.update_zn(cpu.state.x);
}

// TXS is the one transfer that leaves the flags alone.
pub(crate) fn txs(cpu: &mut Cpu) {
    cpu.state.sp = cpu.state.x;
}

// ---------------------------------------------------------------------------
// Logical
// ---------------------------------------------------------------------------

pub(crate) fn and(cpu: &mut Cpu, value: u8) {
    cpu.state.a &= value;
    cpu.state.update_zn(cpu.state.a);
}

pub(crate) fn ora(cpu: &mut Cpu, value: u8) {
    cpu.state.a |= value;
    cpu.state.update_zn(cpu.state.a);
}

pub(crate) fn eor(cpu: &mut Cpu, value: u8) {
    cpu.state.a ^= value;
    cpu.state.update_zn(cpu.state.a);
}

/// BIT: Z from A & M; N and V copied from bits 7 and 6 of M.
pub(crate) fn bit(cpu: &mut Cpu, value: u8) {
    let masked = cpu.state.a & value;
    cpu.state.assign_flag(ZERO, masked == 0);
    cpu.state.assign_flag(NEGATIVE, (value & 0x80) != 0);
    cpu.state.assign_flag(OVERFLOW, (value & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

pub(crate) fn adc(cpu: &mut Cpu, value: u8) {
    if cpu.state.is_flag_set(DECIMAL) {
        adc_decimal(cpu, value);
    } else {
        adc_binary(cpu, value);
    }
}

pub(crate) fn sbc(cpu: &mut Cpu, value: u8) {
    if cpu.state.is_flag_set(DECIMAL) {
        sbc_decimal(cpu, value);
    } else {
        // Binary SBC is ADC of the one's complement (carry = not-borrow).
        adc_binary(cpu, value ^ 0xFF);
    }
}

fn adc_binary(cpu: &mut Cpu, value: u8) {
    let a = cpu.state.a;
    let carry_in = cpu.state.is_flag_set(CARRY) as u16;
    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    cpu.state.assign_flag(CARRY, sum > 0xFF);
    cpu.state
        .assign_flag(OVERFLOW, (!(a ^ value) & (a ^ result) & 0x80) != 0);
    cpu.state.a = result;
    cpu.state.update_zn(result);
}

fn adc_decimal(cpu: &mut Cpu, value: u8) {
    let a = cpu.state.a;
    let carry_in = cpu.state.is_flag_set(CARRY) as u8;

    // V from the binary sum; the packed-BCD path below owns A/C/N/Z.
    let bin = a as u16 + value as u16 + carry_in as u16;
    cpu.state
        .assign_flag(OVERFLOW, (!(a ^ value) & (a ^ bin as u8) & 0x80) != 0);

    let mut al = (a & 0x0F) + (value & 0x0F) + carry_in;
    let mut ah = (a >> 4) + (value >> 4);
    if al > 9 {
        al -= 10;
        ah += 1;
    }
    if ah > 9 {
        ah -= 10;
        cpu.state.assign_flag(CARRY, true);
    } else {
        cpu.state.assign_flag(CARRY, false);
    }

    let result = (ah << 4) | (al & 0x0F);
    cpu.state.a = result;
    cpu.state.update_zn(result);
}

fn sbc_decimal(cpu: &mut Cpu, value: u8) {
    let a = cpu.state.a;
    let borrow = (!cpu.state.is_flag_set(CARRY)) as i16;

    // V from the binary difference, mirroring the binary-mode rule.
    let bin = a.wrapping_sub(value).wrapping_sub(borrow as u8);
    cpu.state
        .assign_flag(OVERFLOW, ((a ^ value) & (a ^ bin) & 0x80) != 0);

    let mut al = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
    let mut ah = (a >> 4) as i16 - (value >> 4) as i16;
    if al < 0 {
        al += 10;
        ah -= 1;
    }
    if ah < 0 {
        ah += 10;
        cpu.state.assign_flag(CARRY, false);
    } else {
        cpu.state.assign_flag(CARRY, true);
    }

    let result = ((ah as u8) << 4) | (al as u8 & 0x0F);
    cpu.state.a = result;
    cpu.state.update_zn(result);
}

/// Shared compare: C = reg >= M, N/Z from the difference's low byte.
pub(crate) fn compare(cpu: &mut Cpu, reg: u8, value: u8) {
    cpu.state.assign_flag(CARRY, reg >= value);
    cpu.state.update_zn(reg.wrapping_sub(value));
}

// ---------------------------------------------------------------------------
// Register increments / decrements
// ---------------------------------------------------------------------------

pub(crate) fn inx(cpu: &mut Cpu) {
    cpu.state.x = cpu.state.x.wrapping_add(1);
    cpu.state.update_zn(cpu.state.x);
}

pub(crate) fn iny(cpu: &mut Cpu) {
    cpu.state.y = cpu.state.y.wrapping_add(1);
    cpu.state.update_zn(cpu.state.y);
}

pub(crate) fn dex(cpu: &mut Cpu) {
    cpu.state.x = cpu.state.x.wrapping_sub(1);
    cpu.state.update_zn(cpu.state.x);
}

pub(crate) fn dey(cpu: &mut Cpu) {
    cpu.state.y = cpu.state.y.wrapping_sub(1);
    cpu.state.update_zn(cpu.state.y);
}

// ---------------------------------------------------------------------------
// Shifts and rotates (value level; accumulator and memory variants share)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl_value(cpu: &mut Cpu, value: u8) -> u8 {
    cpu.state.assign_flag(CARRY, (value & 0x80) != 0);
    let result = value << 1;
    cpu.state.update_zn(result);
    result
}

#[inline]
pub(crate) fn lsr_value(cpu: &mut Cpu, value: u8) -> u8 {
    cpu.state.assign_flag(CARRY, (value & 0x01) != 0);
    let result = value >> 1;
    cpu.state.update_zn(result);
    result
}

#[inline]
pub(crate) fn rol_value(cpu: &mut Cpu, value: u8) -> u8 {
    let carry_in = cpu.state.is_flag_set(CARRY) as u8;
    cpu.state.assign_flag(CARRY, (value & 0x80) != 0);
    let result = (value << 1) | carry_in;
    cpu.state.update_zn(result);
    result
}

#[inline]
pub(crate) fn ror_value(cpu: &mut Cpu, value: u8) -> u8 {
    let carry_in = if cpu.state.is_flag_set(CARRY) { 0x80 } else { 0 };
    cpu.state.assign_flag(CARRY, (value & 0x01) != 0);
    let result = (value >> 1) | carry_in;
    cpu.state.update_zn(result);
    result
}

/// Read-modify-write pattern shared by the memory shift/rotate and
/// INC/DEC handlers. Returns the value written back.
pub(crate) fn modify<F>(cpu: &mut Cpu, addr: u16, transform: F) -> u8
where
    F: FnOnce(&mut Cpu, u8) -> u8,
{
    let old = cpu.read(addr);
    let new = transform(cpu, old);
    cpu.write(addr, new);
    new
}
