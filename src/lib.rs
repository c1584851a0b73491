//! Compiles a C-like member-access predicate, evaluated against a BTF type
//! graph, into a kernel-VM (eBPF-like) instruction stream.
//!
//! See `SPEC_FULL.md` in the repository root for the full specification.
//! This crate emits no subscriber of its own: wire one up with
//! `tracing_subscriber` (or any other `tracing::Subscriber`) in the calling
//! binary if you want to see the phase-level spans/events this crate emits.

pub mod ast;
pub mod btf;
pub mod classify;
pub mod compile;
pub mod consts;
pub mod emit;
pub mod error;
pub mod isa;
pub mod literal;
pub mod options;
pub mod parser;
pub mod resolve;
pub mod validate;

pub mod prelude {
    pub use crate::btf::{BtfGraph, BtfGraphBuilder, BtfType, BtfTypeId, IntEncoding, Member};
    pub use crate::compile::{compile, compile_access_only};
    pub use crate::error::CompileError;
    pub use crate::isa::{Insn, JumpCond, Label, Op, Operand, RegisterId, ResolvedOp, Width};
    pub use crate::options::CompileOptions;
}
