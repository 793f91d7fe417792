//! Script consensus check adapter
//!
//! The script interpreter itself is out of scope; the validator only needs
//! a pure `check_consensus` function and the flag bitset it is parameterized
//! by. Consumers plug in a real interpreter via [`ScriptChecker`].

use crate::types::{Script, Transaction};

/// Named consensus-rule bits passed to the script interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyFlags(pub u8);

impl VerifyFlags {
    pub const BIP16: VerifyFlags = VerifyFlags(1 << 0);
    pub const BIP65: VerifyFlags = VerifyFlags(1 << 1);
    pub const BIP66: VerifyFlags = VerifyFlags(1 << 2);
    pub const ATTENUATION_ENABLED: VerifyFlags = VerifyFlags(1 << 3);

    /// The flag set the validator always uses for mempool admission.
    pub const ALL_ENABLED: VerifyFlags =
        VerifyFlags(Self::BIP16.0 | Self::BIP65.0 | Self::BIP66.0 | Self::ATTENUATION_ENABLED.0);

    pub fn contains(self, bit: VerifyFlags) -> bool {
        self.0 & bit.0 == bit.0
    }
}

/// A pluggable script interpreter. `verify` is consumed as a pure function:
/// no side effects, no shared mutable state.
pub trait ScriptChecker: Send + Sync {
    fn check_consensus(
        &self,
        prev_script: &Script,
        tx: &Transaction,
        input_index: usize,
        flags: VerifyFlags,
    ) -> bool;
}
