use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to the static mesh instances render with.
///
/// The baked textures only replace vertex positions/normals; index buffers,
/// UVs and other attributes still come from this mesh.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle {
    pub uuid: Uuid,
    pub name: String,
}

impl MeshHandle {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
        }
    }
}
