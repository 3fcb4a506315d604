//! # 코로나그래프 시뮬레이션 핵심 모듈
//!
//! 정규화 → 가림 → 스펙트럼 변환 → 위상 복원 반복의 선형 파이프라인

pub mod config;
pub mod error;
pub mod grid;
pub mod normalizer;
pub mod occlusion;
pub mod pipeline;
pub mod retrieval;
pub mod spectral;

// 주요 타입들 재수출
pub use config::SimulationConfig;
pub use error::CoronagraphError;
pub use grid::{IntensityGrid, OcclusionMask};
pub use normalizer::{load_intensity_grid, normalize};
pub use occlusion::{CircularOcclusion, Occluder, OcclusionShape, SquareOcclusion};
pub use pipeline::{Coronagraph, SimulationOutput};
pub use retrieval::{GerchbergSaxton, IterationTrace, Observation, OpticalSystem, TraceFrame, TraceSummary};
pub use spectral::{SpectralTransform, Spectrum};
