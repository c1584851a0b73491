//! Type walker / offset resolver (spec section 4.3): walks a member-access
//! chain against a [`BtfGraph`], producing the ordered per-hop byte offsets,
//! the terminal field's type, and the big-endian flag.

use crate::ast::{AccessOp, Expr};
use crate::btf::{BtfGraph, BtfType, BtfTypeId};
use crate::error::{CompileError, ResolveError};

/// Output of [`resolve`]: per spec section 3's "offset resolution result".
#[derive(Debug, Clone)]
pub struct ResolveResult {
    /// One 32-bit byte offset per pointer hop (`->`), in chain order. Each
    /// entry is the offset of the next field *within the object the
    /// previous hop dereferenced into*.
    pub offsets: Vec<u32>,
    pub terminal_type: BtfTypeId,
    pub big_endian: bool,
    /// The terminal member's own `bitfield_size`, if the chain ends on a
    /// struct/union member (`None` for the bare-identifier form).
    pub terminal_bitfield_size: Option<u32>,
    /// `pending_offset_bits % 8` at the terminal hop: non-zero means the
    /// member starts mid-byte even if it declares no explicit bitfield
    /// size (spec section 4.3).
    pub terminal_bit_misalignment: u32,
}

fn flatten(expr: &Expr) -> Vec<(AccessOp, &str)> {
    fn go<'a>(expr: &'a Expr, out: &mut Vec<(AccessOp, &'a str)>) {
        if let Expr::Member { base, op, member } = expr {
            go(base, out);
            out.push((*op, member.as_str()));
        }
    }
    let mut out = Vec::new();
    go(expr, &mut out);
    out
}

fn is_big_endian_int(graph: &BtfGraph, id: BtfTypeId) -> bool {
    matches!(graph.get(graph.strip(id)), BtfType::Int { big_endian: true, .. })
}

fn as_struct_or_union(graph: &BtfGraph, id: BtfTypeId) -> Result<(BtfTypeId, &[crate::btf::Member]), CompileError> {
    let stripped = graph.strip(id);
    match graph.get(stripped) {
        BtfType::Struct { members, .. } | BtfType::Union { members, .. } => Ok((stripped, members)),
        other => Err(CompileError::TypeMismatch(ResolveError::NotAggregate { type_name: other.display_name() })),
    }
}

fn find_member<'a>(
    graph: &BtfGraph,
    parent: BtfTypeId,
    members: &'a [crate::btf::Member],
    name: &str,
) -> Result<&'a crate::btf::Member, CompileError> {
    members.iter().find(|m| m.name == name).ok_or_else(|| {
        CompileError::TypeMismatch(ResolveError::MemberNotFound {
            parent_type_name: graph.get(parent).display_name(),
            member: name.to_string(),
        })
    })
}

/// Walks `expr` (a bare identifier or member-access chain) against `graph`,
/// starting at `root_type` (always a `Pointer` on entry per spec section 3).
#[tracing::instrument(skip(graph), fields(root_type = root_type.0))]
pub fn resolve(expr: &Expr, root_type: BtfTypeId, graph: &BtfGraph) -> Result<ResolveResult, CompileError> {
    let steps = flatten(expr);
    if steps.is_empty() {
        tracing::debug!("bare identifier form, offsets empty");
        return Ok(ResolveResult {
            offsets: Vec::new(),
            terminal_type: root_type,
            big_endian: false,
            terminal_bitfield_size: None,
            terminal_bit_misalignment: 0,
        });
    }

    let mut cur_type = root_type;
    let mut pending_offset_bits: u32 = 0;
    let mut offsets = Vec::with_capacity(steps.len());
    let mut big_endian = false;
    let mut terminal_bitfield_size = None;
    // The root pointer's value is already in the work register from the
    // prologue, so the first `->` has nothing preceding it to emit a hop
    // for; only arrows after it close out the previous hop's offset.
    let mut seen_arrow = false;

    for (op, member) in steps {
        match op {
            AccessOp::Arrow => {
                let target = match graph.get(graph.strip(cur_type)) {
                    BtfType::Pointer { target } => *target,
                    other => {
                        return Err(CompileError::TypeMismatch(ResolveError::NotIndirectable {
                            type_name: other.display_name(),
                        }))
                    }
                };
                if seen_arrow {
                    offsets.push(pending_offset_bits / 8);
                }
                pending_offset_bits = 0;
                seen_arrow = true;

                let (parent, members) = as_struct_or_union(graph, target)?;
                let m = find_member(graph, parent, members, member)?;
                big_endian |= is_big_endian_int(graph, m.ty);
                pending_offset_bits = m.bit_offset;
                terminal_bitfield_size = m.bitfield_size;
                cur_type = m.ty;
            }
            AccessOp::Dot => {
                let (parent, members) = as_struct_or_union(graph, cur_type)?;
                let m = find_member(graph, parent, members, member)?;
                big_endian |= is_big_endian_int(graph, m.ty);
                pending_offset_bits += m.bit_offset;
                terminal_bitfield_size = m.bitfield_size;
                cur_type = m.ty;
            }
        }
    }

    let terminal_bit_misalignment = pending_offset_bits % 8;
    offsets.push(pending_offset_bits / 8);
    big_endian |= is_big_endian_int(graph, cur_type);

    tracing::debug!(?offsets, big_endian, "resolved access chain");
    Ok(ResolveResult {
        offsets,
        terminal_type: cur_type,
        big_endian,
        terminal_bitfield_size,
        terminal_bit_misalignment,
    })
}
