//! 스펙트럼 변환 쌍과 위상 수차 생성

pub mod perturbation;
pub mod spectrum;
pub mod transform;

// 테스트 모듈
#[cfg(test)]
mod __tests__;

// 재수출
pub use perturbation::{phase_perturbation, seeded_phase_perturbation};
pub use spectrum::{half_width, phase_of, Spectrum};
pub use transform::SpectralTransform;
