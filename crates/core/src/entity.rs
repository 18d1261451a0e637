//! Entity trait: identity + continuity across snapshots.

/// Entity marker + minimal interface.
///
/// Records are read-only snapshots; two snapshots with the same id describe the
/// same entity even when their other fields differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
