//! 이미지 정규화기

pub mod loader;
pub mod normalize;

// 테스트 모듈
#[cfg(test)]
mod __tests__;

// 재수출
pub use loader::{dynamic_to_samples, load_image, load_intensity_grid};
pub use normalize::{normalize, normalize_gray};
