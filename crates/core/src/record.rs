//! Record trait: a read-only snapshot fetched from the CRM.

/// A CRM record with a stable identifier.
///
/// Records are never created or mutated here; the trait only gives generic
/// code (lookups, error reporting) access to the identity and the kind name.
pub trait Record {
    /// Strongly-typed record identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Human-readable kind used in logs and not-found errors.
    const KIND: &'static str;

    /// Returns the record identifier.
    fn id(&self) -> Self::Id;
}
