//! Behaviour flags for a copy.

use std::{fmt, ops};

/// Bit set of copy behaviour flags.
///
/// Flags combine with `|` and are tested with [`CopyFlags::contains`].
///
/// # Examples
///
/// ```
/// use xcopy::CopyFlags;
///
/// let flags = CopyFlags::OVERWRITE_EXISTING | CopyFlags::ERROR_IF_STRUCT_FIELD_MISSING;
/// assert!(flags.contains(CopyFlags::OVERWRITE_EXISTING));
/// assert!(!flags.contains(CopyFlags::ALLOW_DUPLICATING_IF_NOT_SETTABLE));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CopyFlags(u32);

impl CopyFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Write into existing values instead of duplicating them first.
    pub const OVERWRITE_EXISTING: Self = Self(1);
    /// Duplicate shared composites that would otherwise be written in place.
    pub const ALLOW_DUPLICATING_IF_NOT_SETTABLE: Self = Self(1 << 1);
    /// Refuse to duplicate shared primitives that would otherwise be written
    /// in place.
    pub const DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE: Self = Self(1 << 2);
    /// Fail when a source field has no destination counterpart.
    pub const ERROR_IF_STRUCT_FIELD_MISSING: Self = Self(1 << 3);
    /// Keep `any`-valued mapping entries opaque instead of building them with
    /// the mapping's own type.
    pub const DISABLE_MAP_OF_ANY_TARGET_RECURSION: Self = Self(1 << 4);

    const NAMES: [(Self, &'static str); 5] = [
        (Self::OVERWRITE_EXISTING, "OVERWRITE_EXISTING"),
        (
            Self::ALLOW_DUPLICATING_IF_NOT_SETTABLE,
            "ALLOW_DUPLICATING_IF_NOT_SETTABLE",
        ),
        (
            Self::DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE,
            "DENY_DUPLICATING_PRIMITIVE_IF_NOT_SETTABLE",
        ),
        (
            Self::ERROR_IF_STRUCT_FIELD_MISSING,
            "ERROR_IF_STRUCT_FIELD_MISSING",
        ),
        (
            Self::DISABLE_MAP_OF_ANY_TARGET_RECURSION,
            "DISABLE_MAP_OF_ANY_TARGET_RECURSION",
        ),
    ];

    const ALL_BITS: u32 = 0b1_1111;

    /// Raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Builds flags from raw bits, dropping unknown ones.
    #[must_use]
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    /// Whether every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags set in either operand.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl ops::BitOr for CopyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl ops::BitOrAssign for CopyFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Debug for CopyFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("CopyFlags(NONE)");
        }
        let names: Vec<&str> = Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "CopyFlags({})", names.join(" | "))
    }
}
