/*!
Miscellaneous opcode family: register transfers, register
increments/decrements, stack push/pull, flag set/clear operations, and
NOP.

All fixed-cycle, no penalties, no operand bytes. TXS is the one transfer
that does not touch the flags; PHP/PLP carry the B-bit discipline through
the shared status push/pull helpers.
*/

use crate::cpu::Cpu;
use crate::cpu::execute::{dex, dey, inx, iny, pha, php, pla, plp, tax, tay, tsx, txa, txs, tya};
use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};
use crate::cpu::table::ExecKind;

pub(super) fn handle(cpu: &mut Cpu, kind: ExecKind) {
    match kind {
        // -------- Transfers --------
        ExecKind::Tax => tax(cpu),
        ExecKind::Tay => tay(cpu),
        ExecKind::Txa => txa(cpu),
        ExecKind::Tya => tya(cpu),
        ExecKind::Tsx => tsx(cpu),
        ExecKind::Txs => txs(cpu),

        // -------- Register increments / decrements --------
        ExecKind::Inx => inx(cpu),
        ExecKind::Iny => iny(cpu),
        ExecKind::Dex => dex(cpu),
        ExecKind::Dey => dey(cpu),

        // -------- Stack --------
        ExecKind::Pha => pha(cpu),
        ExecKind::Php => php(cpu),
        ExecKind::Pla => pla(cpu),
        ExecKind::Plp => plp(cpu),

        // -------- Flags --------
        ExecKind::Clc => cpu.state.assign_flag(CARRY, false),
        ExecKind::Sec => cpu.state.assign_flag(CARRY, true),
        ExecKind::Cli => cpu.state.assign_flag(IRQ_DISABLE, false),
        ExecKind::Sei => cpu.state.assign_flag(IRQ_DISABLE, true),
        ExecKind::Cld => cpu.state.assign_flag(DECIMAL, false),
        ExecKind::Sed => cpu.state.assign_flag(DECIMAL, true),
        ExecKind::Clv => cpu.state.assign_flag(OVERFLOW, false),

        ExecKind::Nop => {}

        _ => unreachable!("kind routed to misc without a handler"),
    }
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, NEGATIVE, ZERO};
    use crate::test_utils::{cpu_with_program, run};

    #[test]
    fn transfer_chain_moves_values() {
        // LDA #$05; TAX; TAY; TXA; TYA; TSX; TXS
        let mut cpu = cpu_with_program(&[0xA9, 0x05, 0xAA, 0xA8, 0x8A, 0x98, 0xBA, 0x9A]);
        run(&mut cpu, 4);
        assert_eq!(cpu.x(), 0x05);
        assert_eq!(cpu.y(), 0x05);
        assert_eq!(cpu.a(), 0x05);
        run(&mut cpu, 1); // TYA
        assert_eq!(cpu.a(), 0x05);
        run(&mut cpu, 1); // TSX copies SP ($FD) into X
        assert_eq!(cpu.x(), 0xFD);
        let flags_before = cpu.status();
        run(&mut cpu, 1); // TXS copies X into SP, flags untouched
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.status(), flags_before);
    }

    #[test]
    fn txs_does_not_update_flags() {
        // LDX #$00; TXS: a zero transfer that must NOT set Z.
        let mut cpu = cpu_with_program(&[0xA2, 0x00, 0x9A, 0xEA]);
        run(&mut cpu, 1);
        assert!(cpu.state.is_flag_set(ZERO));
        let status = cpu.status();
        run(&mut cpu, 1);
        assert_eq!(cpu.status(), status);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn register_inc_dec_wraps_and_flags() {
        // LDX #$FF; INX; DEX; LDY #$01; DEY
        let mut cpu = cpu_with_program(&[0xA2, 0xFF, 0xE8, 0xCA, 0xA0, 0x01, 0x88]);
        run(&mut cpu, 2);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.state.is_flag_set(ZERO));
        run(&mut cpu, 1); // DEX wraps back to $FF
        assert_eq!(cpu.x(), 0xFF);
        assert!(cpu.state.is_flag_set(NEGATIVE));
        run(&mut cpu, 2);
        assert_eq!(cpu.y(), 0x00);
        assert!(cpu.state.is_flag_set(ZERO));
    }

    #[test]
    fn pha_pla_identity_on_a() {
        // LDA #$AB; PHA; LDA #$00; PLA
        let mut cpu = cpu_with_program(&[0xA9, 0xAB, 0x48, 0xA9, 0x00, 0x68]);
        run(&mut cpu, 4);
        assert_eq!(cpu.a(), 0xAB);
        assert!(cpu.state.is_flag_set(NEGATIVE));
        assert!(!cpu.state.is_flag_set(ZERO));
    }

    #[test]
    fn php_plp_round_trip_restores_flags() {
        // SEC; SED; PHP; CLC; CLD; PLP
        let mut cpu = cpu_with_program(&[0x38, 0xF8, 0x08, 0x18, 0xD8, 0x28]);
        run(&mut cpu, 3);
        run(&mut cpu, 2);
        assert!(!cpu.state.is_flag_set(CARRY));
        assert!(!cpu.state.is_flag_set(DECIMAL));
        run(&mut cpu, 1); // PLP
        assert!(cpu.state.is_flag_set(CARRY));
        assert!(cpu.state.is_flag_set(DECIMAL));
    }

    #[test]
    fn flag_ops_set_and_clear() {
        // SEC; SEI; SED; CLC; CLI; CLD
        let mut cpu = cpu_with_program(&[0x38, 0x78, 0xF8, 0x18, 0x58, 0xD8]);
        run(&mut cpu, 3);
        assert!(cpu.state.is_flag_set(CARRY));
        assert!(cpu.state.is_flag_set(IRQ_DISABLE));
        assert!(cpu.state.is_flag_set(DECIMAL));
        run(&mut cpu, 3);
        assert!(!cpu.state.is_flag_set(CARRY));
        assert!(!cpu.state.is_flag_set(IRQ_DISABLE));
        assert!(!cpu.state.is_flag_set(DECIMAL));
    }

    #[test]
    fn clv_clears_overflow_from_adc() {
        // LDA #$7F; ADC #$01 sets V; CLV clears it.
        let mut cpu = cpu_with_program(&[0xA9, 0x7F, 0x69, 0x01, 0xB8]);
        run(&mut cpu, 3);
        assert!(!cpu.state.is_flag_set(crate::cpu::state::OVERFLOW));
    }

    #[test]
    fn nop_only_advances_pc() {
        let mut cpu = cpu_with_program(&[0xEA, 0xEA]);
        let snapshot = cpu.registers();
        run(&mut cpu, 1);
        assert_eq!(cpu.pc(), snapshot.pc.wrapping_add(1));
        assert_eq!(cpu.a(), snapshot.a);
        assert_eq!(cpu.status(), snapshot.status);
        assert_eq!(cpu.sp(), snapshot.sp);
    }
}
