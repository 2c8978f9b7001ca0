/*!
Arithmetic opcode family (ADC/SBC).

Both opcodes defer to the shared ALU helpers, which pick binary or BCD
behavior off the D flag. The page-cross penalty for the indexed modes is
applied centrally by the dispatcher, not here.
*/

use crate::cpu::Cpu;
use crate::cpu::addressing::Operand;
use crate::cpu::dispatch::operand_value;
use crate::cpu::execute::{adc, sbc};
use crate::cpu::table::ExecKind;

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind, operand: Operand) {
    let value = operand_value(cpu, operand);
    match kind {
        ExecKind::Adc => adc(cpu, value),
        ExecKind::Sbc => sbc(cpu, value),
        _ => unreachable!("non-arithmetic kind routed to arithmetic"),
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
    use crate::test_utils::{cpu_with_program, run};

    #[test]
    fn adc_immediate_signed_overflow() {
        // LDA #$7F; ADC #$01 -> $80 with V and N set.
        let mut cpu = cpu_with_program(&[0xA9, 0x7F, 0x69, 0x01]);
        run(&mut cpu, 2);
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.state.is_flag_set(OVERFLOW));
        assert!(cpu.state.is_flag_set(NEGATIVE));
        assert!(!cpu.state.is_flag_set(CARRY));
        assert!(!cpu.state.is_flag_set(ZERO));
    }

    #[test]
    fn adc_chains_carry_across_words() {
        // Low byte: $FF + $01 -> carry. High byte: $00 + $00 + C -> $01.
        // CLC; LDA #$FF; ADC #$01; LDA #$00; ADC #$00
        let mut cpu = cpu_with_program(&[0x18, 0xA9, 0xFF, 0x69, 0x01, 0xA9, 0x00, 0x69, 0x00]);
        run(&mut cpu, 3);
        assert_eq!(cpu.a(), 0x00);
        assert!(cpu.state.is_flag_set(CARRY));
        run(&mut cpu, 2);
        assert_eq!(cpu.a(), 0x01);
        assert!(!cpu.state.is_flag_set(CARRY));
    }

    #[test]
    fn sbc_with_borrow_clear() {
        // SEC; LDA #$50; SBC #$20 -> $30, carry still set.
        let mut cpu = cpu_with_program(&[0x38, 0xA9, 0x50, 0xE9, 0x20]);
        run(&mut cpu, 3);
        assert_eq!(cpu.a(), 0x30);
        assert!(cpu.state.is_flag_set(CARRY));
    }

    #[test]
    fn decimal_mode_add_through_memory_operand() {
        // SED; CLC; LDA #$58; ADC $10 (holding $46) -> $04 carry out.
        let mut cpu = cpu_with_program(&[0xF8, 0x18, 0xA9, 0x58, 0x65, 0x10]);
        cpu.write(0x0010, 0x46);
        run(&mut cpu, 4);
        assert_eq!(cpu.a(), 0x04);
        assert!(cpu.state.is_flag_set(CARRY));
    }

    #[test]
    fn decimal_mode_subtract() {
        // SED; SEC; LDA #$32; SBC #$14 -> $18 in BCD.
        let mut cpu = cpu_with_program(&[0xF8, 0x38, 0xA9, 0x32, 0xE9, 0x14]);
        run(&mut cpu, 4);
        assert_eq!(cpu.a(), 0x18);
        assert!(cpu.state.is_flag_set(CARRY));
    }
}
