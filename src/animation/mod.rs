//! Animation evaluation
//!
//! - [`AnimationEvaluator`]: the seam the bake drives
//! - [`SkinnedEvaluator`]: offline linear-blend skinning over keyframed bones

pub mod clip;
pub mod evaluator;
pub mod skinned;
pub mod tracks;
pub mod values;

pub use clip::{BoneChannel, SkeletalClip};
pub use evaluator::{AnimationEvaluator, ClipInfo, EvaluatorPause, MeshInfo, VertexFrame};
pub use skinned::{Bone, Skeleton, SkinnedEvaluator, SkinnedMesh};
pub use tracks::{InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
