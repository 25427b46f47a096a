// -----------------------------------------------------------------------------
// Modules

mod bound;
mod compiled;

// -----------------------------------------------------------------------------
// Exports

pub use bound::BoundAccessor;
pub use compiled::CompiledAccessor;

/// How a [`CompiledAccessor`] writes its member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetStrategy {
    /// The typed setter of a public member of the root, called directly.
    Direct,
    /// The parent of the member is borrowed mutably along the path, then the
    /// member is assigned in place.
    Compound,
    /// A setter supplied by the caller.
    Explicit,
}
