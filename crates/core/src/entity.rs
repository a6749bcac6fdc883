//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities start out transient (no identity) and receive their identifier
/// from the storage layer on first save.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Whether the storage layer has assigned an identifier.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
