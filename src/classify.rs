//! Field classifier (spec section 4.4): verifies the terminal field is a
//! comparable integer or pointer of supported width, rejects bitfields, and
//! computes its in-kernel size and signedness.

use crate::btf::{BtfGraph, BtfType, BtfTypeId};
use crate::consts::POINTER_SIZE;
use crate::error::{ClassifyError, CompileError};

/// What the operator emitter needs to know about the terminal field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub size: u8,
    pub signed_compare: bool,
}

/// Classifies the terminal type of a resolved chain. `bitfield_size` must be
/// the last-hop member's bitfield marker, if any (bitfields are rejected
/// regardless of the wrapped type).
pub fn classify(
    graph: &BtfGraph,
    terminal_type: BtfTypeId,
    bitfield_size: Option<u32>,
    bit_misalignment: u32,
    member_name_for_errors: &str,
) -> Result<Classification, CompileError> {
    let is_bitfield = bitfield_size.map_or(false, |size| size > 0) || bit_misalignment != 0;
    if is_bitfield {
        return Err(CompileError::UnsupportedField(ClassifyError::UnexpectedBitfield {
            member: member_name_for_errors.to_string(),
        }));
    }

    let stripped = graph.strip(terminal_type);
    match graph.get(stripped) {
        BtfType::Pointer { .. } => Ok(Classification { size: POINTER_SIZE, signed_compare: false }),
        BtfType::Int { encoding, .. } if matches!(encoding.size, 1 | 2 | 4 | 8) => {
            Ok(Classification { size: encoding.size, signed_compare: encoding.signed })
        }
        BtfType::Enum { size, .. } if matches!(size, 1 | 2 | 4 | 8) => {
            Ok(Classification { size: *size, signed_compare: true })
        }
        other => Err(CompileError::UnsupportedField(ClassifyError::UnexpectedTerminalType {
            type_name: other.display_name(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::btf::{BtfGraphBuilder, IntEncoding};

    #[test]
    fn pointer_classifies_unsigned_8() {
        let mut b = BtfGraphBuilder::new();
        let target = b.add(Some("net_device"), BtfType::Struct { name: "net_device".into(), members: vec![] });
        let ptr = b.add(None, BtfType::Pointer { target });
        let graph = b.build();
        let c = classify(&graph, ptr, None, 0, "dev").unwrap();
        assert_eq!(c, Classification { size: 8, signed_compare: false });
    }

    #[test]
    fn bitfield_rejected() {
        let mut b = BtfGraphBuilder::new();
        let int_ty = b.add(None, BtfType::Int { name: "int".into(), encoding: IntEncoding { size: 4, signed: true }, big_endian: false });
        let graph = b.build();
        let err = classify(&graph, int_ty, Some(3), 0, "pkt_type").unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedField(ClassifyError::UnexpectedBitfield { .. })));
    }

    #[test]
    fn struct_terminal_rejected() {
        let mut b = BtfGraphBuilder::new();
        let s = b.add(Some("sock"), BtfType::Struct { name: "sock".into(), members: vec![] });
        let graph = b.build();
        let err = classify(&graph, s, None, 0, "users").unwrap_err();
        assert!(matches!(err, CompileError::UnsupportedField(ClassifyError::UnexpectedTerminalType { .. })));
    }
}
