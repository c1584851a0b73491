//! The BTF type graph (spec section 3): an externally supplied, read-only
//! description of kernel types, indexed by name.
//!
//! Treated as an immutable, cheaply-shareable handle: cloning a [`BtfGraph`]
//! bumps a refcount rather than copying the graph.

use std::collections::HashMap;
use std::sync::Arc;

/// An opaque handle to a type within a [`BtfGraph`]. Stable for the lifetime
/// of the graph it was obtained from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BtfTypeId(pub(crate) usize);

/// One member of a `Struct`/`Union`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    /// Bit offset within the containing struct/union.
    pub bit_offset: u32,
    /// `Some(n)` for an `n`-bit bitfield; `None` for a byte-aligned member.
    pub bitfield_size: Option<u32>,
    pub ty: BtfTypeId,
}

/// Integer encoding: signed or unsigned, with its byte size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntEncoding {
    pub size: u8,
    pub signed: bool,
}

/// One BTF type. Kind list per spec section 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BtfType {
    Pointer { target: BtfTypeId },
    Struct { name: String, members: Vec<Member> },
    Union { name: String, members: Vec<Member> },
    Typedef { name: String, underlying: BtfTypeId },
    Const { underlying: BtfTypeId },
    Volatile { underlying: BtfTypeId },
    Restrict { underlying: BtfTypeId },
    /// Treated as a signed integer of `size` bytes (spec section 3).
    Enum { name: String, size: u8 },
    Int { name: String, encoding: IntEncoding, big_endian: bool },
}

impl BtfType {
    pub fn kind_name(&self) -> &'static str {
        match self {
            BtfType::Pointer { .. } => "pointer",
            BtfType::Struct { .. } => "struct",
            BtfType::Union { .. } => "union",
            BtfType::Typedef { .. } => "typedef",
            BtfType::Const { .. } => "const",
            BtfType::Volatile { .. } => "volatile",
            BtfType::Restrict { .. } => "restrict",
            BtfType::Enum { .. } => "enum",
            BtfType::Int { .. } => "int",
        }
    }

    /// Best-effort human name, used only in error messages.
    pub fn display_name(&self) -> String {
        match self {
            BtfType::Pointer { .. } => "<pointer>".to_string(),
            BtfType::Struct { name, .. }
            | BtfType::Union { name, .. }
            | BtfType::Typedef { name, .. }
            | BtfType::Enum { name, .. }
            | BtfType::Int { name, .. } => name.clone(),
            BtfType::Const { .. } => "<const>".to_string(),
            BtfType::Volatile { .. } => "<volatile>".to_string(),
            BtfType::Restrict { .. } => "<restrict>".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct BtfGraphInner {
    types: Vec<BtfType>,
    by_name: HashMap<String, BtfTypeId>,
}

/// A read-only, `Arc`-backed BTF type graph. Shared freely across any number
/// of concurrent compilations (spec section 5); the compiler never mutates
/// it.
#[derive(Debug, Clone, Default)]
pub struct BtfGraph {
    inner: Arc<BtfGraphInner>,
}

impl BtfGraph {
    pub fn get(&self, id: BtfTypeId) -> &BtfType {
        &self.inner.types[id.0]
    }

    pub fn lookup_name(&self, name: &str) -> Option<BtfTypeId> {
        self.inner.by_name.get(name).copied()
    }

    /// Strips `Typedef`/`Const`/`Volatile`/`Restrict` wrappers, returning
    /// the underlying type id and whether any wrapper on the path carried
    /// the big-endian annotation (BTF has no such annotation on these
    /// transparent kinds today, but the walk is kept generic per spec
    /// section 4.3's "after stripping Typedef/Const/Volatile/Restrict").
    pub fn strip(&self, mut id: BtfTypeId) -> BtfTypeId {
        loop {
            match self.get(id) {
                BtfType::Typedef { underlying, .. }
                | BtfType::Const { underlying }
                | BtfType::Volatile { underlying }
                | BtfType::Restrict { underlying } => id = *underlying,
                _ => return id,
            }
        }
    }
}

/// Builder for tests and embedded fixtures: BTF graphs in production come
/// from loading a kernel BTF blob, out of scope here (spec section 1).
#[derive(Debug, Default)]
pub struct BtfGraphBuilder {
    types: Vec<BtfType>,
    by_name: HashMap<String, BtfTypeId>,
}

impl BtfGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type, optionally registering it under `name` for
    /// [`BtfGraph::lookup_name`]. Returns its id for use as a `target`/`ty`
    /// reference in later additions.
    pub fn add(&mut self, name: Option<&str>, ty: BtfType) -> BtfTypeId {
        let id = BtfTypeId(self.types.len());
        self.types.push(ty);
        if let Some(name) = name {
            self.by_name.insert(name.to_string(), id);
        }
        id
    }

    pub fn build(self) -> BtfGraph {
        BtfGraph { inner: Arc::new(BtfGraphInner { types: self.types, by_name: self.by_name }) }
    }
}
