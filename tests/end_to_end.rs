//! End-to-end scenarios from spec section 8, compiled against a small
//! embedded BTF fixture standing in for Linux v6.8's `sk_buff`.

use btf_predicate_compiler::prelude::*;

fn sk_buff_fixture() -> (BtfGraph, BtfTypeId) {
    let mut b = BtfGraphBuilder::new();

    let uint_ty = b.add(
        Some("unsigned int"),
        BtfType::Int { name: "unsigned int".into(), encoding: IntEncoding { size: 4, signed: false }, big_endian: false },
    );
    let int_ty = b.add(Some("int"), BtfType::Int { name: "int".into(), encoding: IntEncoding { size: 4, signed: true }, big_endian: false });
    let u16_ty = b.add(
        Some("short unsigned int"),
        BtfType::Int { name: "short unsigned int".into(), encoding: IntEncoding { size: 2, signed: false }, big_endian: false },
    );
    let be16_ty =
        b.add(Some("__be16"), BtfType::Int { name: "__be16".into(), encoding: IntEncoding { size: 2, signed: false }, big_endian: true });
    let u64_ty = b.add(
        Some("unsigned long"),
        BtfType::Int { name: "unsigned long".into(), encoding: IntEncoding { size: 8, signed: false }, big_endian: false },
    );

    let ns_common = b.add(
        Some("ns_common"),
        BtfType::Struct { name: "ns_common".into(), members: vec![Member { name: "inum".into(), bit_offset: 136 * 8, bitfield_size: None, ty: u64_ty }] },
    );
    let net = b.add(
        Some("net"),
        BtfType::Struct { name: "net".into(), members: vec![Member { name: "ns".into(), bit_offset: 0, bitfield_size: None, ty: ns_common }] },
    );
    let net_ptr = b.add(None, BtfType::Pointer { target: net });
    let possible_net_t = b.add(
        Some("possible_net_t"),
        BtfType::Struct { name: "possible_net_t".into(), members: vec![Member { name: "net".into(), bit_offset: 0, bitfield_size: None, ty: net_ptr }] },
    );

    let net_device = b.add(
        Some("net_device"),
        BtfType::Struct {
            name: "net_device".into(),
            members: vec![
                Member { name: "ifindex".into(), bit_offset: 224 * 8, bitfield_size: None, ty: int_ty },
                Member { name: "nd_net".into(), bit_offset: 280 * 8, bitfield_size: None, ty: possible_net_t },
            ],
        },
    );
    let net_device_ptr = b.add(None, BtfType::Pointer { target: net_device });

    let sock = b.add(Some("sock"), BtfType::Struct { name: "sock".into(), members: vec![] });

    let sk_buff = b.add(
        Some("sk_buff"),
        BtfType::Struct {
            name: "sk_buff".into(),
            members: vec![
                Member { name: "len".into(), bit_offset: 112 * 8, bitfield_size: None, ty: uint_ty },
                Member { name: "vlan_tci".into(), bit_offset: 158 * 8, bitfield_size: None, ty: u16_ty },
                Member { name: "protocol".into(), bit_offset: 180 * 8, bitfield_size: None, ty: be16_ty },
                Member { name: "dev".into(), bit_offset: 16 * 8, bitfield_size: None, ty: net_device_ptr },
                Member { name: "users".into(), bit_offset: 0, bitfield_size: None, ty: sock },
                Member { name: "pkt_type".into(), bit_offset: 202 * 8 + 5, bitfield_size: Some(3), ty: uint_ty },
            ],
        },
    );
    let sk_buff_ptr = b.add(None, BtfType::Pointer { target: sk_buff });
    (b.build(), sk_buff_ptr)
}

#[test]
fn scenario_1_bare_pointer_truthiness() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let insns = compile("skb != 0", &graph, root, &opts).unwrap();
    // prologue mov, 1 true-mov, 1 jump, fail-mov, return: 5 real instructions
    assert_eq!(insns.len(), 5);
}

#[test]
fn scenario_2_single_hop_32bit_unsigned() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let insns = compile("skb->len > 1024", &graph, root, &opts).unwrap();
    let add = insns.iter().find(|ResolvedOp(op)| matches!(op, Op::Add { .. }));
    assert!(matches!(add, Some(ResolvedOp(Op::Add { src: Operand::Imm(112), .. }))));
}

#[test]
fn scenario_3_vlan_tci_little_endian_16bit() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let insns = compile("skb->vlan_tci == 1000", &graph, root, &opts).unwrap();
    let jump = insns.iter().find_map(|ResolvedOp(op)| match op {
        Op::Jump { rhs: Operand::Imm(c), cond, .. } => Some((*c, *cond)),
        _ => None,
    });
    assert_eq!(jump, Some((1000, JumpCond::Eq)));
}

#[test]
fn scenario_4_protocol_big_endian_folds_constant() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let insns = compile("skb->protocol == 0x0008", &graph, root, &opts).unwrap();
    let jump = insns.iter().find_map(|ResolvedOp(op)| match op {
        Op::Jump { rhs: Operand::Imm(c), .. } => Some(*c),
        _ => None,
    });
    assert_eq!(jump, Some(0x0800));
}

#[test]
fn scenario_5_two_hop_chain_signed_terminal_unsigned_eq() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let insns = compile("skb->dev->ifindex == 1", &graph, root, &opts).unwrap();
    let calls = insns.iter().filter(|ResolvedOp(op)| matches!(op, Op::Call { .. })).count();
    assert_eq!(calls, 2);
    let null_checks = insns
        .iter()
        .filter(|ResolvedOp(op)| matches!(op, Op::Jump { cond: JumpCond::Eq, rhs: Operand::Imm(0), .. }))
        .count();
    assert_eq!(null_checks, 1);
}

#[test]
fn scenario_6_three_hop_dotted_chain() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let insns = compile("skb->dev->nd_net.net->ns.inum == 0xffffedcba987", &graph, root, &opts).unwrap();
    let calls = insns.iter().filter(|ResolvedOp(op)| matches!(op, Op::Call { .. })).count();
    assert_eq!(calls, 3);
    let null_checks = insns
        .iter()
        .filter(|ResolvedOp(op)| matches!(op, Op::Jump { cond: JumpCond::Eq, rhs: Operand::Imm(0), .. }))
        .count();
    assert_eq!(null_checks, 2);
}

#[test]
fn negative_unknown_member() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let err = compile("skb->xxx == 0", &graph, root, &opts).unwrap_err();
    assert!(matches!(err, CompileError::TypeMismatch(_)));
}

#[test]
fn negative_non_comparable_terminal() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let err = compile("skb->users == 0", &graph, root, &opts).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedField(_)));
}

#[test]
fn negative_bitfield_terminal() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let err = compile("skb->pkt_type == 0", &graph, root, &opts).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedField(_)));
}

#[test]
fn negative_unsupported_operator() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let err = compile("skb->len * 2", &graph, root, &opts).unwrap_err();
    assert!(matches!(err, CompileError::UnsupportedOperator(_)));
}

#[test]
fn negative_malformed_literal() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let err = compile("skb->len > 1024x", &graph, root, &opts).unwrap_err();
    assert!(matches!(err, CompileError::LiteralParse(_)));
}

#[test]
fn label_closure_every_jump_resolves() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    // finalize() itself enforces label closure; a successful compile is the
    // property holding.
    let insns = compile("skb->dev->nd_net.net->ns.inum == 0xffffedcba987", &graph, root, &opts).unwrap();
    assert!(!insns.is_empty());
}

#[test]
fn register_safety_prologue_writes_work_reg_first() {
    let (graph, root) = sk_buff_fixture();
    let opts = CompileOptions::default();
    let insns = compile("skb->len > 1024", &graph, root, &opts).unwrap();
    let ResolvedOp(first) = &insns[0];
    assert!(matches!(first, Op::Mov { dst, src: Operand::Reg(_), .. } if *dst == opts.work_reg));
}
