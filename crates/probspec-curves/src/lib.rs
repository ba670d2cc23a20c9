//! Curve registry shared by the problem builder and the CLI.
//!
//! Every scoped parameter name (`MNT4753.q`, `MNT6753.r`, ...) is derived from a
//! [`Curve`] value so that no caller has to assemble scope labels by hand.

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Curve {
    Mnt4,
    Mnt6,
}

/// Bit length of the base field modulus shared by both curves of the cycle.
pub const MODULUS_BITS: u32 = 753;

impl Curve {
    pub const ALL: [Curve; 2] = [Curve::Mnt4, Curve::Mnt6];

    pub fn as_str(self) -> &'static str {
        match self {
            Curve::Mnt4 => "mnt4",
            Curve::Mnt6 => "mnt6",
        }
    }

    /// Accepts the short id (`mnt4`) or the scope label (`MNT4753`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "mnt4" | "MNT4" | "MNT4753" => Some(Curve::Mnt4),
            "mnt6" | "MNT6" | "MNT6753" => Some(Curve::Mnt6),
            _ => None,
        }
    }

    /// Scope label used to qualify parameter names (e.g. `MNT4753`).
    pub fn scope_label(self) -> &'static str {
        match self {
            Curve::Mnt4 => "MNT4753",
            Curve::Mnt6 => "MNT6753",
        }
    }

    pub fn embedding_degree(self) -> u32 {
        match self {
            Curve::Mnt4 => 4,
            Curve::Mnt6 => 6,
        }
    }

    /// Degree of the extension of `q` over which the G2 twist is defined.
    pub fn twist_degree(self) -> u32 {
        self.embedding_degree() / 2
    }

    /// The other curve of the cycle: its base field is this curve's scalar field.
    pub fn cycle_partner(self) -> Self {
        match self {
            Curve::Mnt4 => Curve::Mnt6,
            Curve::Mnt6 => Curve::Mnt4,
        }
    }

    /// Recovers the curve from a scope label produced by [`Curve::scope_label`].
    pub fn from_scope_label(label: &str) -> Option<Self> {
        Curve::ALL.into_iter().find(|c| c.scope_label() == label)
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.scope_label())
    }
}
