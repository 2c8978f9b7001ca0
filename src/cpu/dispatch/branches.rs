/*!
Relative branch opcode family (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ).

The relative operand was already resolved (target address + page-cross
flag computed against the PC after the displacement fetch). This handler
evaluates the condition and, when taken, moves PC and charges the timing
extras: +1 cycle taken, +1 more when the target sits on a different page
than the instruction's fall-through address.
*/

use crate::cpu::Cpu;
use crate::cpu::addressing::Operand;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::ExecKind;

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind, operand: Operand) {
    let Operand::Address { addr, page_crossed } = operand else {
        return;
    };
    let take = match kind {
        ExecKind::Bpl => !cpu.state.is_flag_set(NEGATIVE),
        ExecKind::Bmi => cpu.state.is_flag_set(NEGATIVE),
        ExecKind::Bvc => !cpu.state.is_flag_set(OVERFLOW),
        ExecKind::Bvs => cpu.state.is_flag_set(OVERFLOW),
        ExecKind::Bcc => !cpu.state.is_flag_set(CARRY),
        ExecKind::Bcs => cpu.state.is_flag_set(CARRY),
        ExecKind::Bne => !cpu.state.is_flag_set(ZERO),
        ExecKind::Beq => cpu.state.is_flag_set(ZERO),
        _ => unreachable!("non-branch kind routed to branches"),
    };
    if take {
        cpu.state.pc = addr;
        let extra = if page_crossed { 2 } else { 1 };
        cpu.clock().add_cycles(extra);
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{cpu_with_program, run};

    #[test]
    fn branch_not_taken_falls_through() {
        // BCS +2 with carry clear: PC lands on the next instruction.
        let mut cpu = cpu_with_program(&[0xB0, 0x02, 0xEA, 0xEA]);
        run(&mut cpu, 1);
        assert_eq!(cpu.pc(), 0x8002);
    }

    #[test]
    fn branch_taken_skips_forward() {
        // BCC +2 with carry clear jumps over the next byte pair.
        let mut cpu = cpu_with_program(&[0x90, 0x02, 0xEA, 0xEA, 0xEA]);
        run(&mut cpu, 1);
        assert_eq!(cpu.pc(), 0x8004);
    }

    #[test]
    fn branch_backward_offset() {
        // NOP; BEQ -3 with Z set re-enters the NOP.
        let mut cpu = cpu_with_program(&[0xEA, 0xA9, 0x00, 0xF0, 0xFB]);
        run(&mut cpu, 3); // NOP; LDA #$00 (Z set); BEQ
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn taken_branch_adds_one_cycle() {
        // BNE +1 with Z clear (taken, same page): base 2 + 1 extra.
        let mut cpu = cpu_with_program(&[0xD0, 0x01, 0xEA, 0xEA]);
        let before = cpu.cycle_count();
        run(&mut cpu, 1);
        // 1 pacing + 2 base + 1 taken.
        assert_eq!(cpu.cycle_count() - before, 4);
    }

    #[test]
    fn not_taken_branch_costs_base_only() {
        // BEQ with Z clear.
        let mut cpu = cpu_with_program(&[0xF0, 0x01, 0xEA, 0xEA]);
        let before = cpu.cycle_count();
        run(&mut cpu, 1);
        // 1 pacing + 2 base.
        assert_eq!(cpu.cycle_count() - before, 3);
    }

    #[test]
    fn overflow_branches_follow_v_flag() {
        // LDA #$7F; ADC #$01 sets V; BVS +1 is taken.
        let mut cpu = cpu_with_program(&[0xA9, 0x7F, 0x69, 0x01, 0x70, 0x01, 0xEA, 0xEA]);
        run(&mut cpu, 3);
        assert_eq!(cpu.pc(), 0x8007);
    }
}
