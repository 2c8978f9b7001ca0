/*!
Logical opcode family (AND/ORA/EOR/BIT).

All four read their operand and update flags through the shared helpers.
BIT is the odd one out: it never changes A and copies N/V straight from
the memory byte.
*/

use crate::cpu::Cpu;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::{and, bit, eor, ora};
use crate::cpu::table::ExecKind;

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind, operand: Operand) {
    let value = operand_value(cpu, operand);
    match kind {
        ExecKind::And => and(cpu, value),
        ExecKind::Ora => ora(cpu, value),
        ExecKind::Eor => eor(cpu, value),
        ExecKind::Bit => bit(cpu, value),
        _ => unreachable!("non-logical kind routed to logical"),
    }
}
