/*!
Orchestrator for a single CPU step.

One step, in order:
1. Block on the pause gate until the CPU is allowed to run.
2. Drain the interrupt latch; when a service is due, perform the
   7-cycle interrupt entry instead of executing an opcode.
3. Let the pacing clock schedule the step.
4. Fetch the opcode, record the debug trace, check breakpoints.
5. Decode through the static table; unmapped bytes are `InvalidOpcode`
   (PC stays where the fetch left it, one past the bad byte).
6. Resolve the addressing mode, charge the base cycle cost plus any
   page-cross penalty, and hand off to the family handler.

Cycle accounting: the clock's own `wait_next_cycle` counts one pacing
cycle per instruction; the base cost and penalties are folded in on top
so downstream pacing deadlines stretch with the emulated workload.
Branch extras are charged inside the branch handler (the taken/crossed
decision lives there); interrupt entry charges its flat 7.
*/

use crate::cpu::addressing::{Operand, fetch_byte, resolve_operand};
use crate::cpu::execute::{push_status_with_break, push_word};
use crate::cpu::state::IRQ_DISABLE;
use crate::cpu::table::{ExecKind, OPCODE_TABLE};
use crate::cpu::{Cpu, IRQ_VECTOR, InterruptKind, NMI_VECTOR, StepOutcome};
use crate::debug::BreakpointSet;
use crate::error::CpuError;

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

/// Execute one instruction (or one interrupt entry).
pub(crate) fn step(
    cpu: &mut Cpu,
    breakpoints: Option<&BreakpointSet>,
) -> Result<StepOutcome, CpuError> {
    // 1. Pause gate: a paused stepper sleeps here until resume().
    cpu.pause_gate().wait_while_paused();

    // 2. Interrupts beat the next opcode. NMI wins over IRQ; IRQ is
    //    only delivered when the I flag is clear.
    let irq_masked = cpu.state.is_flag_set(IRQ_DISABLE);
    let (service_nmi, service_irq) = cpu.interrupt_latch().take_pending(irq_masked);
    if service_nmi || service_irq {
        let kind = if service_nmi {
            InterruptKind::Nmi
        } else {
            InterruptKind::Irq
        };
        service_interrupt(cpu, kind);
        cpu.clock().add_cycles(7);
        return Ok(StepOutcome::Interrupt(kind));
    }

    // 3. Pacing.
    cpu.clock().wait_next_cycle();

    // 4. Fetch.
    let pc_before = cpu.state.pc;
    let opcode = fetch_byte(cpu);
    let entry = &OPCODE_TABLE[opcode as usize];

    if cpu.debug_mode() {
        cpu.record_trace(pc_before, opcode, entry.mnemonic);
        log::debug!(
            "PC: ${pc_before:04X}  opcode: ${opcode:02X} ({})",
            entry.mnemonic
        );
    }

    let breakpoint_hit = breakpoints.is_some_and(|bp| bp.contains(pc_before));
    if breakpoint_hit {
        log::debug!("breakpoint hit at PC: ${pc_before:04X}");
    }

    // 5. Decode.
    if matches!(entry.kind, ExecKind::Illegal) {
        log::warn!("invalid opcode 0x{opcode:02X} at PC: ${pc_before:04X}");
        return Err(CpuError::InvalidOpcode {
            opcode,
            pc: pc_before,
        });
    }

    // 6. Execute. Base cost first, then the read-class page-cross
    //    penalty once the operand is resolved.
    cpu.clock().add_cycles(entry.base_cycles as u64);
    let operand = resolve_operand(cpu, entry.mode);
    if entry.page_cross_penalty && operand.page_crossed() {
        cpu.clock().add_cycles(1);
    }

    match entry.kind {
        ExecKind::Lda
        | ExecKind::Ldx
        | ExecKind::Ldy
        | ExecKind::Sta
        | ExecKind::Stx
        | ExecKind::Sty => load_store::handle(cpu, entry.kind, operand),

        ExecKind::Adc | ExecKind::Sbc => arithmetic::handle(cpu, entry.kind, operand),

        ExecKind::And | ExecKind::Ora | ExecKind::Eor | ExecKind::Bit => {
            logical::handle(cpu, entry.kind, operand)
        }

        ExecKind::Asl
        | ExecKind::Lsr
        | ExecKind::Rol
        | ExecKind::Ror
        | ExecKind::Inc
        | ExecKind::Dec => rmw::handle(cpu, entry.kind, operand),

        ExecKind::Cmp | ExecKind::Cpx | ExecKind::Cpy => {
            compare::handle(cpu, entry.kind, operand)
        }

        ExecKind::Bpl
        | ExecKind::Bmi
        | ExecKind::Bvc
        | ExecKind::Bvs
        | ExecKind::Bcc
        | ExecKind::Bcs
        | ExecKind::Bne
        | ExecKind::Beq => branches::handle(cpu, entry.kind, operand),

        ExecKind::Jmp | ExecKind::Jsr | ExecKind::Rts | ExecKind::Brk | ExecKind::Rti => {
            control_flow::handle(cpu, entry.kind, operand)
        }

        ExecKind::Tax
        | ExecKind::Tay
        | ExecKind::Txa
        | ExecKind::Tya
        | ExecKind::Tsx
        | ExecKind::Txs
        | ExecKind::Inx
        | ExecKind::Iny
        | ExecKind::Dex
        | ExecKind::Dey
        | ExecKind::Pha
        | ExecKind::Php
        | ExecKind::Pla
        | ExecKind::Plp
        | ExecKind::Clc
        | ExecKind::Sec
        | ExecKind::Cli
        | ExecKind::Sei
        | ExecKind::Cld
        | ExecKind::Sed
        | ExecKind::Clv
        | ExecKind::Nop => misc::handle(cpu, entry.kind),

        ExecKind::Illegal => unreachable!("illegal kind filtered before execution"),
    }

    Ok(StepOutcome::Instruction { breakpoint_hit })
}

/// Interrupt entry: push PC and the B=0 status image, mask IRQs, load
/// the vector. The 7-cycle charge is the caller's job so the outcome
/// paths stay symmetric.
fn service_interrupt(cpu: &mut Cpu, kind: InterruptKind) {
    let pc = cpu.state.pc;
    push_word(cpu, pc);
    push_status_with_break(cpu, false);
    cpu.state.assign_flag(IRQ_DISABLE, true);
    let vector = match kind {
        InterruptKind::Nmi => NMI_VECTOR,
        InterruptKind::Irq => IRQ_VECTOR,
    };
    cpu.state.pc = cpu.read_word(vector);
    log::debug!("servicing {kind:?} -> ${:04X}", cpu.state.pc);
}

/// Fetch the value an instruction operates on: immediate bytes come
/// straight from the stream, addresses read through the CPU (ports
/// included), the accumulator variant reads A.
pub(super) fn operand_value(cpu: &mut Cpu, operand: Operand) -> u8 {
    match operand {
        Operand::Immediate(value) => value,
        Operand::Address { addr, .. } => cpu.read(addr),
        Operand::Accumulator => cpu.state.a,
        Operand::None => 0,
    }
}
