use super::face::FaceId;

slotmap::new_key_type! {
    /// Unique identifier for a shell in the entity store.
    pub struct ShellId;
}

/// A connected set of faces forming a surface boundary.
///
/// Face order is the traversal order used when discretizing a solid.
#[derive(Debug, Clone)]
pub struct ShellData {
    /// The faces that make up this shell.
    pub faces: Vec<FaceId>,
    /// Whether this shell is closed (watertight).
    pub is_closed: bool,
}
