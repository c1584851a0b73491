//! Compile-time configuration (spec section 2's "ambient stack"
//! configuration layer): the register numbering, stack slot, and helper id
//! a caller's kernel-VM calling convention fixes, plus the toggle resolving
//! spec section 9's open question.

use crate::consts::{DEFAULT_PROBE_READ_HELPER_ID, DEFAULT_STACK_SLOT_OFFSET};
use crate::isa::RegisterId;

/// Parameters the driver and emitters need but which are properties of the
/// caller's kernel-VM calling convention, not of this compiler's logic.
#[derive(Debug, Clone, Copy)]
pub struct CompileOptions {
    /// Register holding the root pointer argument on entry.
    pub arg_reg: RegisterId,
    /// Working register: chain cursor, then loaded value.
    pub work_reg: RegisterId,
    /// Register the boolean result is written into.
    pub result_reg: RegisterId,
    /// Scratch register used as the probe-read helper's destination-address
    /// argument.
    pub scratch_addr_reg: RegisterId,
    /// Scratch register holding the byte count passed to the probe-read
    /// helper.
    pub size_reg: RegisterId,
    /// Scratch register holding the unsafe kernel source pointer passed to
    /// the probe-read helper: the chain cursor's current address, copied in
    /// before every call so the helper actually dereferences the walk.
    pub probe_src_reg: RegisterId,
    /// Register holding the frame/stack base the scratch slot is relative
    /// to.
    pub stack_base_reg: RegisterId,
    /// Frame-relative offset of the shared 8-byte probe-read scratch slot.
    pub stack_slot_offset: i16,
    /// Stable numeric id of the probe-read-kernel helper.
    pub probe_read_helper_id: u32,
    /// Resolves spec section 9's open question: `false` (default) matches
    /// the reference's zero-extending `LSH;RSH` normalization for 32-bit
    /// terminals of either signedness; `true` sign-extends signed 32-bit
    /// terminals instead.
    pub sign_extend_32bit_signed: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            arg_reg: RegisterId::new(1),
            work_reg: RegisterId::new(6),
            result_reg: RegisterId::new(0),
            scratch_addr_reg: RegisterId::new(2),
            size_reg: RegisterId::new(3),
            probe_src_reg: RegisterId::new(4),
            stack_base_reg: RegisterId::new(10),
            stack_slot_offset: DEFAULT_STACK_SLOT_OFFSET,
            probe_read_helper_id: DEFAULT_PROBE_READ_HELPER_ID,
            sign_extend_32bit_signed: false,
        }
    }
}
