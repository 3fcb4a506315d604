//! 가림 연산자 (사각형 / 원형)
//!
//! 두 변형 모두 `(grid, extent) -> (가려진 grid, mask)` 계약을 따른다.
//! 입력 격자는 변경하지 않고, 격자 범위를 넘는 영역은 조용히 잘라낸다.

pub mod circle;
pub mod square;


use crate::core::error::CoronagraphError;
use crate::core::grid::{IntensityGrid, OcclusionMask};
use anyhow::Result;
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use circle::CircularOcclusion;
pub use square::SquareOcclusion;

/// 가림 연산 공통 인터페이스
pub trait Occluder {
    /// 가릴 셀 마스크 계산
    fn mask(&self, height: usize, width: usize) -> OcclusionMask;

    /// 가려진 새 격자와 마스크 반환
    fn occlude(&self, grid: &IntensityGrid) -> (IntensityGrid, OcclusionMask) {
        let (height, width) = grid.shape();
        let mask = self.mask(height, width);
        let occluded = apply_mask(grid, &mask);
        (occluded, mask)
    }

    fn name(&self) -> &'static str;
}

/// 마스크가 true인 셀을 0으로 만든 복사본
pub fn apply_mask(grid: &IntensityGrid, mask: &OcclusionMask) -> IntensityGrid {
    let mut data = grid.as_array().clone();
    Zip::from(&mut data)
        .and(mask.as_array())
        .for_each(|value, &hidden| {
            if hidden {
                *value = 0.0;
            }
        });
    IntensityGrid::from_array_clipped(data)
}

/// 설정 파일용 가림 형태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum OcclusionShape {
    Square { width: usize },
    Circle { diameter: usize },
}

impl OcclusionShape {
    pub fn extent(&self) -> usize {
        match *self {
            Self::Square { width } => width,
            Self::Circle { diameter } => diameter,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.extent() == 0 {
            return Err(CoronagraphError::invalid(format!(
                "occlusion extent must be positive ({self})"
            ))
            .into());
        }
        Ok(())
    }

    /// 검증 후 가림 연산자 생성
    pub fn build(&self) -> Result<Box<dyn Occluder + Send + Sync>> {
        Ok(match *self {
            Self::Square { width } => Box::new(SquareOcclusion::new(width)?),
            Self::Circle { diameter } => Box::new(CircularOcclusion::new(diameter)?),
        })
    }
}

impl fmt::Display for OcclusionShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Square { width } => write!(f, "square(width={width})"),
            Self::Circle { diameter } => write!(f, "circle(diameter={diameter})"),
        }
    }
}

/// 축 방향 구간을 [0, len)로 잘라낸 반열린 구간
///
/// `usize` 전 범위의 폭을 넘치지 않도록 `i128`로 계산한다.
pub(crate) fn clipped_span(start: i128, extent: usize, len: usize) -> (usize, usize) {
    let end = start + extent as i128;
    let lo = start.clamp(0, len as i128) as usize;
    let hi = end.clamp(0, len as i128) as usize;
    (lo, hi)
}

pub(crate) fn mask_from_fn(
    height: usize,
    width: usize,
    hidden: impl Fn(usize, usize) -> bool,
) -> OcclusionMask {
    OcclusionMask::new(Array2::from_shape_fn((height, width), |(r, c)| hidden(r, c)))
}
