use std::fmt;

/// A kernel-VM register, identified by its ABI-assigned number.
///
/// | Operation   | opaque register handle      |
/// | Syntax      | `r<N>`                       |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(pub u8);

impl RegisterId {
    pub const fn new(n: u8) -> Self {
        Self(n)
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

impl From<u8> for RegisterId {
    fn from(n: u8) -> Self {
        Self(n)
    }
}
