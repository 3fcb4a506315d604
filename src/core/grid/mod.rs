pub mod intensity;
pub mod mask;


// 재수출
pub use intensity::{clip_unit, IntensityGrid};
pub use mask::OcclusionMask;
