use crate::address::Hemisphere;

/// Errors raised while constructing a [`crate::TerrainGenerator`].
///
/// These correspond to spec §7's "Configuration error" and "Template
/// parse error" categories: both are fatal to the generator instance
/// and are always reported at construction, never mid-generation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// One or more fields of the supplied [`crate::config::TerrainConfig`]
    /// failed validation (persistence out of `(0, 1)`, a non-positive
    /// ellipsoid radius, or a depth too large to shift into a `u32`).
    #[error("invalid terrain configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The embedded base glTF template failed to parse as JSON. This
    /// would indicate a corrupted build, not a caller mistake.
    #[error("failed to parse embedded glTF base template: {0}")]
    TemplateParse(#[source] serde_json::Error),
}

/// Errors raised by a per-call operation on an already-constructed
/// [`crate::TerrainGenerator`] (spec §7's "Domain error on inputs").
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// Surfaced only if construction-time validation is bypassed by
    /// calling code that builds a generator some other way.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The tile's content generation depth implies a vertex grid larger
    /// than the u16 index space can address.
    #[error(
        "tile {hemisphere:?}:{index} at content generation depth {content_generation_depth} \
         would need {vertex_count} vertices, exceeding the u16 index limit (65536)"
    )]
    VertexOverflow {
        hemisphere: Hemisphere,
        index: u64,
        content_generation_depth: u32,
        vertex_count: u64,
    },
}
