/*!
Load/store opcode family (LDA/LDX/LDY, STA/STX/STY).

Loads route through the shared helpers so N/Z update in one place;
stores write the register straight to the effective address and touch no
flags. Store operands are always addresses (the assembler has no
immediate store), so a non-address operand here would be a decode-table
bug and is ignored.
*/

use crate::cpu::Cpu;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::{lda, ldx, ldy};
use crate::cpu::table::ExecKind;

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind, operand: Operand) {
    match kind {
        ExecKind::Lda => {
            let value = operand_value(cpu, operand);
            lda(cpu, value);
        }
        ExecKind::Ldx => {
            let value = operand_value(cpu, operand);
            ldx(cpu, value);
        }
        ExecKind::Ldy => {
            let value = operand_value(cpu, operand);
            ldy(cpu, value);
        }
        ExecKind::Sta => store(cpu, operand, |cpu| cpu.state.a),
        ExecKind::Stx => store(cpu, operand, |cpu| cpu.state.x),
        ExecKind::Sty => store(cpu, operand, |cpu| cpu.state.y),
        _ => unreachable!("non-load/store kind routed to load_store"),
    }
}

fn store<F>(cpu: &mut Cpu, operand: Operand, reg: F)
where
    F: FnOnce(&Cpu) -> u8,
{
    if let Operand::Address { addr, .. } = operand {
        let value = reg(cpu);
        cpu.write(addr, value);
    }
}
