//! Chain emitter (spec section 4.5): turns a resolved offset list into
//! repeated probe-read sequences, with a null-check branch to a shared
//! failure label after every hop but the last.

use crate::isa::{Instructions, JumpCond, JumpTarget, Label, Op, Operand, RegisterId, Width};
use crate::options::CompileOptions;

/// Emits the probe-read trampoline for a single hop: load the dword width
/// into the size register, point the destination-address register at the
/// scratch stack slot, copy the chain cursor's current address into the
/// source-pointer register, call the probe-read helper, then load the dword
/// back into `work_reg`.
fn emit_probe_read(insns: &mut Instructions, opts: &CompileOptions, work_reg: RegisterId) {
    insns.push_op(Op::Mov { dst: opts.size_reg, src: Operand::Imm(8) });
    insns.push_op(Op::Mov { dst: opts.scratch_addr_reg, src: Operand::Reg(opts.stack_base_reg) });
    insns.push_op(Op::Add { dst: opts.scratch_addr_reg, src: Operand::Imm(opts.stack_slot_offset as i64) });
    insns.push_op(Op::Mov { dst: opts.probe_src_reg, src: Operand::Reg(work_reg) });
    insns.push_op(Op::Call { helper_id: opts.probe_read_helper_id });
    insns.push_op(Op::LoadMem {
        dst: work_reg,
        src: opts.stack_base_reg,
        offset: opts.stack_slot_offset,
        width: Width::Dword,
    });
}

/// Emits the chain: one probe-read sequence per offset, with a null check
/// after every hop except the last (the terminal value may legitimately be
/// zero). Returns whether any null check was emitted, so the caller knows
/// whether `fail_label` must be materialised.
pub fn emit_chain(
    insns: &mut Instructions,
    opts: &CompileOptions,
    offsets: &[u32],
    work_reg: RegisterId,
    fail_label: Label,
) -> bool {
    let mut label_used = false;
    let last = offsets.len().saturating_sub(1);
    for (i, offset) in offsets.iter().enumerate() {
        if *offset != 0 {
            insns.push_op(Op::Add { dst: work_reg, src: Operand::Imm(*offset as i64) });
        }
        emit_probe_read(insns, opts, work_reg);
        if i != last {
            insns.push_op(Op::Jump {
                cond: JumpCond::Eq,
                lhs: work_reg,
                rhs: Operand::Imm(0),
                target: JumpTarget::Label(fail_label.clone()),
            });
            label_used = true;
        }
    }
    label_used
}
