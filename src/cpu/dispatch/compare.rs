/*!
Compare opcode family (CMP/CPX/CPY).

All three share one helper: C = register >= operand, N/Z from the
wrapped difference. Only CMP has indexed modes (and therefore the
page-cross penalty, which the dispatcher applies centrally).
*/

use crate::cpu::Cpu;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::compare;
use crate::cpu::table::ExecKind;

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind, operand: Operand) {
    let value = operand_value(cpu, operand);
    let reg = match kind {
        ExecKind::Cmp => cpu.state.a,
        ExecKind::Cpx => cpu.state.x,
        ExecKind::Cpy => cpu.state.y,
        _ => unreachable!("non-compare kind routed to compare"),
    };
    compare(cpu, reg, value);
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, NEGATIVE, ZERO};
    use crate::test_utils::{cpu_with_program, run};

    #[test]
    fn cmp_equal_sets_carry_and_zero() {
        let mut cpu = cpu_with_program(&[0xA9, 0x42, 0xC9, 0x42]);
        run(&mut cpu, 2);
        assert!(cpu.state.is_flag_set(CARRY));
        assert!(cpu.state.is_flag_set(ZERO));
        // CMP never writes A.
        assert_eq!(cpu.a(), 0x42);
    }

    #[test]
    fn cmp_less_clears_carry() {
        let mut cpu = cpu_with_program(&[0xA9, 0x10, 0xC9, 0x20]);
        run(&mut cpu, 2);
        assert!(!cpu.state.is_flag_set(CARRY));
        assert!(cpu.state.is_flag_set(NEGATIVE)); // $10 - $20 = $F0
    }

    #[test]
    fn cpx_and_cpy_use_their_registers() {
        // LDX #$05; CPX #$03; LDY #$01; CPY #$02
        let mut cpu = cpu_with_program(&[0xA2, 0x05, 0xE0, 0x03, 0xA0, 0x01, 0xC0, 0x02]);
        run(&mut cpu, 2);
        assert!(cpu.state.is_flag_set(CARRY));
        run(&mut cpu, 2);
        assert!(!cpu.state.is_flag_set(CARRY));
    }

    #[test]
    fn cmp_zero_page() {
        let mut cpu = cpu_with_program(&[0xA9, 0x80, 0xC5, 0x10]);
        cpu.write(0x0010, 0x80);
        run(&mut cpu, 2);
        assert!(cpu.state.is_flag_set(ZERO));
    }
}
