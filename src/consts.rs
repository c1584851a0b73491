//! Fixed conventions of the kernel-VM ABI this compiler targets.
//!
//! These are not configurable per-call knobs (see [`crate::options::CompileOptions`]
//! for those); they are properties of the ABI itself that every compiled
//! program relies on.

/// Byte width of the dword the probe-read helper always copies, regardless of
/// the eventual field width. Narrower fields are masked/shifted down to size
/// by the normalizer after the load.
pub const PROBE_READ_WIDTH: u8 = 8;

/// Default stack slot (relative to the frame base) used as the destination
/// buffer for every probe-read in a compiled program. Fixed and shared across
/// all hops in a chain: each hop fully consumes the slot before the next
/// probe-read overwrites it.
pub const DEFAULT_STACK_SLOT_OFFSET: i16 = -8;

/// Stable numeric id, in the kernel helper ABI, of the probe-read-kernel
/// helper used for every indirection in a chain.
pub const DEFAULT_PROBE_READ_HELPER_ID: u32 = 113;

/// Pointer width on the targeted kernel VM. Pointer-typed terminal fields
/// compare at this width, unsigned.
pub const POINTER_SIZE: u8 = 8;
