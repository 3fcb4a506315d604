//! 위상 복원: 광학계 시뮬레이션, 반복기, 가림 오차, 반복 기록

pub mod gerchberg_saxton;
pub mod occult_error;
pub mod optical_system;
pub mod trace;


// 재수출
pub use gerchberg_saxton::{blend_fraction, corrected_phase, GerchbergSaxton};
pub use occult_error::occult_error;
pub use optical_system::{Observation, OpticalSystem};
pub use trace::{IterationTrace, TraceFrame, TraceSummary};
