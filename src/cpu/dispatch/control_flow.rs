/*!
Control-flow opcode family (JMP/JSR/RTS/BRK/RTI).

Return-address conventions:
- JSR pushes PC-1 (high byte first); RTS pops and adds one back.
- BRK skips its padding byte, pushes the resulting PC, then pushes P
  with B=1, sets I, and vectors through $FFFE. The live status register
  never gets B set; the bit exists only in the pushed image.
- RTI pops P (B forced clear, bit 5 forced set) and then the return PC;
  unlike RTS there is no +1 adjustment.

The indirect JMP target was already resolved with the page-wrap quirk by
the addressing layer, so both JMP encodings land here as a plain
"set PC" operation.
*/

use crate::cpu::addressing::Operand;
use crate::cpu::execute::{plp, pop_word, push_status_with_break, push_word};
use crate::cpu::state::IRQ_DISABLE;
use crate::cpu::table::ExecKind;
use crate::cpu::{Cpu, IRQ_VECTOR};

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind, operand: Operand) {
    match kind {
        ExecKind::Jmp => {
            if let Operand::Address { addr, .. } = operand {
                cpu.state.pc = addr;
            }
        }
        ExecKind::Jsr => {
            if let Operand::Address { addr, .. } = operand {
                let ret = cpu.state.pc.wrapping_sub(1);
                push_word(cpu, ret);
                cpu.state.pc = addr;
            }
        }
        ExecKind::Rts => {
            cpu.state.pc = pop_word(cpu).wrapping_add(1);
        }
        ExecKind::Brk => {
            // Skip the padding byte, then push the return address.
            cpu.state.advance_pc(1);
            let pc = cpu.state.pc;
            push_word(cpu, pc);
            push_status_with_break(cpu, true);
            cpu.state.assign_flag(IRQ_DISABLE, true);
            cpu.state.pc = cpu.read_word(IRQ_VECTOR);
        }
        ExecKind::Rti => {
            plp(cpu);
            cpu.state.pc = pop_word(cpu);
        }
        _ => unreachable!("non-control-flow kind routed to control_flow"),
    }
}
