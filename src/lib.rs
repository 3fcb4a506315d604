//! 코로나그래프 / 게르히베르크-색스턴 위상 복원 시뮬레이터
//!
//! 영상을 정규화하고 중심부를 가린 뒤, 스펙트럼 크기는 고정한 채 위상 보정을
//! 단계적으로 주입하며 재구성 영상과 가림 오차를 기록한다.

pub mod core;
pub mod render;

// 핵심 모듈들 재수출
pub use self::core::{
    // 데이터 구조
    IntensityGrid, OcclusionMask, Spectrum, IterationTrace, TraceFrame, TraceSummary,
    // 파이프라인 단계
    Occluder, OcclusionShape, SquareOcclusion, CircularOcclusion,
    SpectralTransform, OpticalSystem, Observation, GerchbergSaxton,
    Coronagraph, SimulationOutput,
    // 구성 및 에러
    SimulationConfig, CoronagraphError,
};
pub use render::{FrameConfig, FrameRenderer};
