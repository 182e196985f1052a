//! Collision response policy

/// How a component reacts to another component it touches
///
/// Currently derived from a single per-component flag: components that
/// generate hit events block, everything else overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum CollisionResponse {
    /// Report begin/end overlap events
    #[default]
    Overlap,
    /// Report hit events
    Block,
}

impl CollisionResponse {
    /// Response for a component with the given hit-event flag
    pub fn from_generate_hit_events(generate_hit_events: bool) -> Self {
        if generate_hit_events {
            Self::Block
        } else {
            Self::Overlap
        }
    }

    /// Response for a pair: blocks if either side blocks
    pub fn for_pair(a: Self, b: Self) -> Self {
        a.max(b)
    }

    /// True for [`CollisionResponse::Block`]
    pub fn is_blocking(self) -> bool {
        self == Self::Block
    }
}
