//! 코로나그래프 시뮬레이션 에러 분류
//!
//! 라이브러리 함수는 `anyhow::Result`를 반환하고, 호출자가 원인을 구분해야 하는
//! 경우에는 `downcast_ref::<CoronagraphError>()`로 꺼내 볼 수 있다.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoronagraphError {
    /// 반복 횟수, 가림 크기 등 인자 자체가 잘못됨
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 격자/스펙트럼/마스크 형태 불일치
    #[error("shape mismatch for {what}: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// 이미지 디코딩 실패 (재시도 없음)
    #[error("failed to decode image {path}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl CoronagraphError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::ShapeMismatch { .. })
    }
}

/// anyhow 에러가 인자 오류(형태 불일치 포함)인지 판별
pub fn is_invalid_argument(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CoronagraphError>()
        .map(CoronagraphError::is_invalid_argument)
        .unwrap_or(false)
}
