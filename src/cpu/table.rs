/*!
Static 256-entry opcode decode table.

Each entry carries the display mnemonic, the addressing mode, the
semantic kind the dispatcher matches on, the base cycle cost, the encoded
instruction length, and whether the read-class page-cross penalty
applies. The table is built once at compile time; the 105 slots that are
not documented NMOS 6502 opcodes keep the `Illegal` placeholder and
decode to `InvalidOpcode` at run time.

Cycle columns follow the standard NMOS timing table. Stores and
read-modify-write opcodes never take the page-cross penalty (their base
cost already covers the dummy access); branches account for taken /
page-cross extras in their handler instead.
*/

/// Addressing modes of the documented instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
}

/// Semantic family member the dispatcher executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExecKind {
    // Loads / stores
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    // Transfers
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Logical
    And,
    Ora,
    Eor,
    Bit,
    // Arithmetic
    Adc,
    Sbc,
    // Shifts / rotates
    Asl,
    Lsr,
    Rol,
    Ror,
    // Compares
    Cmp,
    Cpx,
    Cpy,
    // Increments / decrements
    Inc,
    Dec,
    Inx,
    Iny,
    Dex,
    Dey,
    // Branches
    Bpl,
    Bmi,
    Bvc,
    Bvs,
    Bcc,
    Bcs,
    Bne,
    Beq,
    // Control flow
    Jmp,
    Jsr,
    Rts,
    Brk,
    Rti,
    // Flag operations
    Clc,
    Sec,
    Cli,
    Sei,
    Cld,
    Sed,
    Clv,
    // No-op and undocumented
    Nop,
    Illegal,
}

/// One decode-table row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpcodeEntry {
    pub mnemonic: &'static str,
    pub mode: AddrMode,
    pub kind: ExecKind,
    pub base_cycles: u8,
    pub bytes: u8,
    pub page_cross_penalty: bool,
}

impl OpcodeEntry {
    const fn new(
        mnemonic: &'static str,
        mode: AddrMode,
        kind: ExecKind,
        base_cycles: u8,
        bytes: u8,
        page_cross_penalty: bool,
    ) -> Self {
        Self {
            mnemonic,
            mode,
            kind,
            base_cycles,
            bytes,
            page_cross_penalty,
        }
    }

    const fn illegal() -> Self {
        Self::new("???", AddrMode::Implied, ExecKind::Illegal, 0, 1, false)
    }
}

pub(crate) static OPCODE_TABLE: [OpcodeEntry; 256] = {
    use AddrMode::*;
    use ExecKind::*;
    let mut t = [OpcodeEntry::illegal(); 256];

    // --------- Loads ---------
    t[0xA9] = OpcodeEntry::new("LDA", Immediate, Lda, 2, 2, false);
    t[0xA5] = OpcodeEntry::new("LDA", ZeroPage, Lda, 3, 2, false);
    t[0xB5] = OpcodeEntry::new("LDA", ZeroPageX, Lda, 4, 2, false);
    t[0xAD] = OpcodeEntry::new("LDA", Absolute, Lda, 4, 3, false);
    t[0xBD] = OpcodeEntry::new("LDA", AbsoluteX, Lda, 4, 3, true);
    t[0xB9] = OpcodeEntry::new("LDA", AbsoluteY, Lda, 4, 3, true);
    t[0xA1] = OpcodeEntry::new("LDA", IndirectX, Lda, 6, 2, false);
    t[0xB1] = OpcodeEntry::new("LDA", IndirectY, Lda, 5, 2, true);

    t[0xA2] = OpcodeEntry::new("LDX", Immediate, Ldx, 2, 2, false);
    t[0xA6] = OpcodeEntry::new("LDX", ZeroPage, Ldx, 3, 2, false);
    t[0xB6] = OpcodeEntry::new("LDX", ZeroPageY, Ldx, 4, 2, false);
    t[0xAE] = OpcodeEntry::new("LDX", Absolute, Ldx, 4, 3, false);
    t[0xBE] = OpcodeEntry::new("LDX", AbsoluteY, Ldx, 4, 3, true);

    t[0xA0] = OpcodeEntry::new("LDY", Immediate, Ldy, 2, 2, false);
    t[0xA4] = OpcodeEntry::new("LDY", ZeroPage, Ldy, 3, 2, false);
    t[0xB4] = OpcodeEntry::new("LDY", ZeroPageX, Ldy, 4, 2, false);
    t[0xAC] = OpcodeEntry::new("LDY", Absolute, Ldy, 4, 3, false);
    t[0xBC] = OpcodeEntry::new("LDY", AbsoluteX, Ldy, 4, 3, true);

    // --------- Stores ---------
    t[0x85] = OpcodeEntry::new("STA", ZeroPage, Sta, 3, 2, false);
    t[0x95] = OpcodeEntry::new("STA", ZeroPageX, Sta, 4, 2, false);
    t[0x8D] = OpcodeEntry::new("STA", Absolute, Sta, 4, 3, false);
    t[0x9D] = OpcodeEntry::new("STA", AbsoluteX, Sta, 5, 3, false);
    t[0x99] = OpcodeEntry::new("STA", AbsoluteY, Sta, 5, 3, false);
    t[0x81] = OpcodeEntry::new("STA", IndirectX, Sta, 6, 2, false);
    t[0x91] = OpcodeEntry::new("STA", IndirectY, Sta, 6, 2, false);

    t[0x86] = OpcodeEntry::new("STX", ZeroPage, Stx, 3, 2, false);
    t[0x96] = OpcodeEntry::new("STX", ZeroPageY, Stx, 4, 2, false);
    t[0x8E] = OpcodeEntry::new("STX", Absolute, Stx, 4, 3, false);

    t[0x84] = OpcodeEntry::new("STY", ZeroPage, Sty, 3, 2, false);
    t[0x94] = OpcodeEntry::new("STY", ZeroPageX, Sty, 4, 2, false);
    t[0x8C] = OpcodeEntry::new("STY", Absolute, Sty, 4, 3, false);

    // --------- Transfers ---------
    t[0xAA] = OpcodeEntry::new("TAX", Implied, Tax, 2, 1, false);
    t[0xA8] = OpcodeEntry::new("TAY", Implied, Tay, 2, 1, false);
    t[0x8A] = OpcodeEntry::new("TXA", Implied, Txa, 2, 1, false);
    t[0x98] = OpcodeEntry::new("TYA", Implied, Tya, 2, 1, false);
    t[0xBA] = OpcodeEntry::new("TSX", Implied, Tsx, 2, 1, false);
    t[0x9A] = OpcodeEntry::new("TXS", Implied, Txs, 2, 1, false);

    // --------- Stack ---------
    t[0x48] = OpcodeEntry::new("PHA", Implied, Pha, 3, 1, false);
    t[0x08] = OpcodeEntry::new("PHP", Implied, Php, 3, 1, false);
    t[0x68] = OpcodeEntry::new("PLA", Implied, Pla, 4, 1, false);
    t[0x28] = OpcodeEntry::new("PLP", Implied, Plp, 4, 1, false);

    // --------- Logical ---------
    t[0x29] = OpcodeEntry::new("AND", Immediate, And, 2, 2, false);
    t[0x25] = OpcodeEntry::new("AND", ZeroPage, And, 3, 2, false);
    t[0x35] = OpcodeEntry::new("AND", ZeroPageX, And, 4, 2, false);
    t[0x2D] = OpcodeEntry::new("AND", Absolute, And, 4, 3, false);
    t[0x3D] = OpcodeEntry::new("AND", AbsoluteX, And, 4, 3, true);
    t[0x39] = OpcodeEntry::new("AND", AbsoluteY, And, 4, 3, true);
    t[0x21] = OpcodeEntry::new("AND", IndirectX, And, 6, 2, false);
    t[0x31] = OpcodeEntry::new("AND", IndirectY, And, 5, 2, true);

    t[0x09] = OpcodeEntry::new("ORA", Immediate, Ora, 2, 2, false);
    t[0x05] = OpcodeEntry::new("ORA", ZeroPage, Ora, 3, 2, false);
    t[0x15] = OpcodeEntry::new("ORA", ZeroPageX, Ora, 4, 2, false);
    t[0x0D] = OpcodeEntry::new("ORA", Absolute, Ora, 4, 3, false);
    t[0x1D] = OpcodeEntry::new("ORA", AbsoluteX, Ora, 4, 3, true);
    t[0x19] = OpcodeEntry::new("ORA", AbsoluteY, Ora, 4, 3, true);
    t[0x01] = OpcodeEntry::new("ORA", IndirectX, Ora, 6, 2, false);
    t[0x11] = OpcodeEntry::new("ORA", IndirectY, Ora, 5, 2, true);

    t[0x49] = OpcodeEntry::new("EOR", Immediate, Eor, 2, 2, false);
    t[0x45] = OpcodeEntry::new("EOR", ZeroPage, Eor, 3, 2, false);
    t[0x55] = OpcodeEntry::new("EOR", ZeroPageX, Eor, 4, 2, false);
    t[0x4D] = OpcodeEntry::new("EOR", Absolute, Eor, 4, 3, false);
    t[0x5D] = OpcodeEntry::new("EOR", AbsoluteX, Eor, 4, 3, true);
    t[0x59] = OpcodeEntry::new("EOR", AbsoluteY, Eor, 4, 3, true);
    t[0x41] = OpcodeEntry::new("EOR", IndirectX, Eor, 6, 2, false);
    t[0x51] = OpcodeEntry::new("EOR", IndirectY, Eor, 5, 2, true);

    t[0x24] = OpcodeEntry::new("BIT", ZeroPage, Bit, 3, 2, false);
    t[0x2C] = OpcodeEntry::new("BIT", Absolute, Bit, 4, 3, false);

    // --------- Arithmetic ---------
    t[0x69] = OpcodeEntry::new("ADC", Immediate, Adc, 2, 2, false);
    t[0x65] = OpcodeEntry::new("ADC", ZeroPage, Adc, 3, 2, false);
    t[0x75] = OpcodeEntry::new("ADC", ZeroPageX, Adc, 4, 2, false);
    t[0x6D] = OpcodeEntry::new("ADC", Absolute, Adc, 4, 3, false);
    t[0x7D] = OpcodeEntry::new("ADC", AbsoluteX, Adc, 4, 3, true);
    t[0x79] = OpcodeEntry::new("ADC", AbsoluteY, Adc, 4, 3, true);
    t[0x61] = OpcodeEntry::new("ADC", IndirectX, Adc, 6, 2, false);
    t[0x71] = OpcodeEntry::new("ADC", IndirectY, Adc, 5, 2, true);

    t[0xE9] = OpcodeEntry::new("SBC", Immediate, Sbc, 2, 2, false);
    t[0xE5] = OpcodeEntry::new("SBC", ZeroPage, Sbc, 3, 2, false);
    t[0xF5] = OpcodeEntry::new("SBC", ZeroPageX, Sbc, 4, 2, false);
    t[0xED] = OpcodeEntry::new("SBC", Absolute, Sbc, 4, 3, false);
    t[0xFD] = OpcodeEntry::new("SBC", AbsoluteX, Sbc, 4, 3, true);
    t[0xF9] = OpcodeEntry::new("SBC", AbsoluteY, Sbc, 4, 3, true);
    t[0xE1] = OpcodeEntry::new("SBC", IndirectX, Sbc, 6, 2, false);
    t[0xF1] = OpcodeEntry::new("SBC", IndirectY, Sbc, 5, 2, true);

    // --------- Shifts / rotates ---------
    t[0x0A] = OpcodeEntry::new("ASL", Accumulator, Asl, 2, 1, false);
    t[0x06] = OpcodeEntry::new("ASL", ZeroPage, Asl, 5, 2, false);
    t[0x16] = OpcodeEntry::new("ASL", ZeroPageX, Asl, 6, 2, false);
    t[0x0E] = OpcodeEntry::new("ASL", Absolute, Asl, 6, 3, false);
    t[0x1E] = OpcodeEntry::new("ASL", AbsoluteX, Asl, 7, 3, false);

    t[0x4A] = OpcodeEntry::new("LSR", Accumulator, Lsr, 2, 1, false);
    t[0x46] = OpcodeEntry::new("LSR", ZeroPage, Lsr, 5, 2, false);
    t[0x56] = OpcodeEntry::new("LSR", ZeroPageX, Lsr, 6, 2, false);
    t[0x4E] = OpcodeEntry::new("LSR", Absolute, Lsr, 6, 3, false);
    t[0x5E] = OpcodeEntry::new("LSR", AbsoluteX, Lsr, 7, 3, false);

    t[0x2A] = OpcodeEntry::new("ROL", Accumulator, Rol, 2, 1, false);
    t[0x26] = OpcodeEntry::new("ROL", ZeroPage, Rol, 5, 2, false);
    t[0x36] = OpcodeEntry::new("ROL", ZeroPageX, Rol, 6, 2, false);
    t[0x2E] = OpcodeEntry::new("ROL", Absolute, Rol, 6, 3, false);
    t[0x3E] = OpcodeEntry::new("ROL", AbsoluteX, Rol, 7, 3, false);

    t[0x6A] = OpcodeEntry::new("ROR", Accumulator, Ror, 2, 1, false);
    t[0x66] = OpcodeEntry::new("ROR", ZeroPage, Ror, 5, 2, false);
    t[0x76] = OpcodeEntry::new("ROR", ZeroPageX, Ror, 6, 2, false);
    t[0x6E] = OpcodeEntry::new("ROR", Absolute, Ror, 6, 3, false);
    t[0x7E] = OpcodeEntry::new("ROR", AbsoluteX, Ror, 7, 3, false);

    // --------- Compares ---------
    t[0xC9] = OpcodeEntry::new("CMP", Immediate, Cmp, 2, 2, false);
    t[0xC5] = OpcodeEntry::new("CMP", ZeroPage, Cmp, 3, 2, false);
    t[0xD5] = OpcodeEntry::new("CMP", ZeroPageX, Cmp, 4, 2, false);
    t[0xCD] = OpcodeEntry::new("CMP", Absolute, Cmp, 4, 3, false);
    t[0xDD] = OpcodeEntry::new("CMP", AbsoluteX, Cmp, 4, 3, true);
    t[0xD9] = OpcodeEntry::new("CMP", AbsoluteY, Cmp, 4, 3, true);
    t[0xC1] = OpcodeEntry::new("CMP", IndirectX, Cmp, 6, 2, false);
    t[0xD1] = OpcodeEntry::new("CMP", IndirectY, Cmp, 5, 2, true);

    t[0xE0] = OpcodeEntry::new("CPX", Immediate, Cpx, 2, 2, false);
    t[0xE4] = OpcodeEntry::new("CPX", ZeroPage, Cpx, 3, 2, false);
    t[0xEC] = OpcodeEntry::new("CPX", Absolute, Cpx, 4, 3, false);

    t[0xC0] = OpcodeEntry::new("CPY", Immediate, Cpy, 2, 2, false);
    t[0xC4] = OpcodeEntry::new("CPY", ZeroPage, Cpy, 3, 2, false);
    t[0xCC] = OpcodeEntry::new("CPY", Absolute, Cpy, 4, 3, false);

    // --------- Increments / decrements ---------
    t[0xE6] = OpcodeEntry::new("INC", ZeroPage, Inc, 5, 2, false);
    t[0xF6] = OpcodeEntry::new("INC", ZeroPageX, Inc, 6, 2, false);
    t[0xEE] = OpcodeEntry::new("INC", Absolute, Inc, 6, 3, false);
    t[0xFE] = OpcodeEntry::new("INC", AbsoluteX, Inc, 7, 3, false);

    t[0xC6] = OpcodeEntry::new("DEC", ZeroPage, Dec, 5, 2, false);
    t[0xD6] = OpcodeEntry::new("DEC", ZeroPageX, Dec, 6, 2, false);
    t[0xCE] = OpcodeEntry::new("DEC", Absolute, Dec, 6, 3, false);
    t[0xDE] = OpcodeEntry::new("DEC", AbsoluteX, Dec, 7, 3, false);

    t[0xE8] = OpcodeEntry::new("INX", Implied, Inx, 2, 1, false);
    t[0xC8] = OpcodeEntry::new("INY", Implied, Iny, 2, 1, false);
    t[0xCA] = OpcodeEntry::new("DEX", Implied, Dex, 2, 1, false);
    t[0x88] = OpcodeEntry::new("DEY", Implied, Dey, 2, 1, false);

    // --------- Branches ---------
    t[0x10] = OpcodeEntry::new("BPL", Relative, Bpl, 2, 2, false);
    t[0x30] = OpcodeEntry::new("BMI", Relative, Bmi, 2, 2, false);
    t[0x50] = OpcodeEntry::new("BVC", Relative, Bvc, 2, 2, false);
    t[0x70] = OpcodeEntry::new("BVS", Relative, Bvs, 2, 2, false);
    t[0x90] = OpcodeEntry::new("BCC", Relative, Bcc, 2, 2, false);
    t[0xB0] = OpcodeEntry::new("BCS", Relative, Bcs, 2, 2, false);
    t[0xD0] = OpcodeEntry::new("BNE", Relative, Bne, 2, 2, false);
    t[0xF0] = OpcodeEntry::new("BEQ", Relative, Beq, 2, 2, false);

    // --------- Control flow ---------
    t[0x4C] = OpcodeEntry::new("JMP", Absolute, Jmp, 3, 3, false);
    t[0x6C] = OpcodeEntry::new("JMP", Indirect, Jmp, 5, 3, false);
    t[0x20] = OpcodeEntry::new("JSR", Absolute, Jsr, 6, 3, false);
    t[0x60] = OpcodeEntry::new("RTS", Implied, Rts, 6, 1, false);
    t[0x00] = OpcodeEntry::new("BRK", Implied, Brk, 7, 2, false);
    t[0x40] = OpcodeEntry::new("RTI", Implied, Rti, 6, 1, false);

    // --------- Flag operations ---------
    t[0x18] = OpcodeEntry::new("CLC", Implied, Clc, 2, 1, false);
    t[0x38] = OpcodeEntry::new("SEC", Implied, Sec, 2, 1, false);
    t[0x58] = OpcodeEntry::new("CLI", Implied, Cli, 2, 1, false);
    t[0x78] = OpcodeEntry::new("SEI", Implied, Sei, 2, 1, false);
    t[0xD8] = OpcodeEntry::new("CLD", Implied, Cld, 2, 1, false);
    t[0xF8] = OpcodeEntry::new("SED", Implied, Sed, 2, 1, false);
    t[0xB8] = OpcodeEntry::new("CLV", Implied, Clv, 2, 1, false);

    // --------- NOP ---------
    t[0xEA] = OpcodeEntry::new("NOP", Implied, Nop, 2, 1, false);

    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_opcode_count_is_151() {
        let mapped = OPCODE_TABLE
            .iter()
            .filter(|e| !matches!(e.kind, ExecKind::Illegal))
            .count();
        assert_eq!(mapped, 151);
    }

    #[test]
    fn undocumented_sbc_alias_stays_illegal() {
        assert!(matches!(OPCODE_TABLE[0xEB].kind, ExecKind::Illegal));
    }

    #[test]
    fn page_cross_penalty_only_on_read_class_indexed_modes() {
        for (opcode, entry) in OPCODE_TABLE.iter().enumerate() {
            if entry.page_cross_penalty {
                // Penalized entries must be indexed read-class modes.
                assert!(
                    matches!(
                        entry.mode,
                        AddrMode::AbsoluteX | AddrMode::AbsoluteY | AddrMode::IndirectY
                    ),
                    "opcode {opcode:#04X} penalized in mode {:?}",
                    entry.mode
                );
                assert!(
                    matches!(
                        entry.kind,
                        ExecKind::Lda
                            | ExecKind::Ldx
                            | ExecKind::Ldy
                            | ExecKind::And
                            | ExecKind::Ora
                            | ExecKind::Eor
                            | ExecKind::Adc
                            | ExecKind::Sbc
                            | ExecKind::Cmp
                    ),
                    "opcode {opcode:#04X} penalized for kind {:?}",
                    entry.kind
                );
            }
            // Stores never take the penalty.
            if matches!(entry.kind, ExecKind::Sta | ExecKind::Stx | ExecKind::Sty) {
                assert!(!entry.page_cross_penalty);
            }
        }
    }

    #[test]
    fn lengths_match_addressing_modes() {
        for (opcode, entry) in OPCODE_TABLE.iter().enumerate() {
            if matches!(entry.kind, ExecKind::Illegal) {
                continue;
            }
            let expected = match entry.mode {
                AddrMode::Implied | AddrMode::Accumulator => {
                    // BRK encodes a padding byte after the opcode.
                    if matches!(entry.kind, ExecKind::Brk) { 2 } else { 1 }
                }
                AddrMode::Immediate
                | AddrMode::ZeroPage
                | AddrMode::ZeroPageX
                | AddrMode::ZeroPageY
                | AddrMode::IndirectX
                | AddrMode::IndirectY
                | AddrMode::Relative => 2,
                AddrMode::Absolute
                | AddrMode::AbsoluteX
                | AddrMode::AbsoluteY
                | AddrMode::Indirect => 3,
            };
            assert_eq!(
                entry.bytes, expected,
                "opcode {opcode:#04X} length mismatch for {:?}",
                entry.mode
            );
        }
    }

    #[test]
    fn spot_check_cycle_columns() {
        assert_eq!(OPCODE_TABLE[0xA9].base_cycles, 2); // LDA #imm
        assert_eq!(OPCODE_TABLE[0xB1].base_cycles, 5); // LDA (zp),Y
        assert_eq!(OPCODE_TABLE[0x9D].base_cycles, 5); // STA abs,X
        assert_eq!(OPCODE_TABLE[0x1E].base_cycles, 7); // ASL abs,X
        assert_eq!(OPCODE_TABLE[0x20].base_cycles, 6); // JSR
        assert_eq!(OPCODE_TABLE[0x6C].base_cycles, 5); // JMP (ind)
        assert_eq!(OPCODE_TABLE[0x00].base_cycles, 7); // BRK
    }
}
