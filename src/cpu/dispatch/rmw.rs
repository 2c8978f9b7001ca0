/*!
Read-modify-write opcode family: shifts/rotates (ASL/LSR/ROL/ROR) in
their accumulator and memory variants, plus memory INC/DEC.

The accumulator variants transform A in place; the memory variants read
the operand, transform it, and write it back through the shared `modify`
pattern. Base cycle costs in the decode table already cover the extra
bus traffic, so no penalties apply here.
*/

use crate::cpu::Cpu;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{asl_value, lsr_value, modify, rol_value, ror_value};
use crate::cpu::table::ExecKind;

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind, operand: Operand) {
    match kind {
        ExecKind::Asl => shift(cpu, operand, asl_value),
        ExecKind::Lsr => shift(cpu, operand, lsr_value),
        ExecKind::Rol => shift(cpu, operand, rol_value),
        ExecKind::Ror => shift(cpu, operand, ror_value),
        ExecKind::Inc => {
            if let Operand::Address { addr, .. } = operand {
                let value = modify(cpu, addr, |_, old| old.wrapping_add(1));
                cpu.state.update_zn(value);
            }
        }
        ExecKind::Dec => {
            if let Operand::Address { addr, .. } = operand {
                let value = modify(cpu, addr, |_, old| old.wrapping_sub(1));
                cpu.state.update_zn(value);
            }
        }
        _ => unreachable!("non-RMW kind routed to rmw"),
    }
}

fn shift(cpu: &mut Cpu, operand: Operand, op: fn(&mut Cpu, u8) -> u8) {
    match operand {
        Operand::Accumulator => {
            let a = cpu.state.a;
            cpu.state.a = op(cpu, a);
        }
        Operand::Address { addr, .. } => {
            modify(cpu, addr, |cpu, old| op(cpu, old));
        }
        _ => {}
    }
}
