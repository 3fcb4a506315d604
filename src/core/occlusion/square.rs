use super::{clipped_span, mask_from_fn, Occluder};
use crate::core::error::CoronagraphError;
use crate::core::grid::OcclusionMask;
use anyhow::Result;

/// 중심 정렬 사각형 가림
///
/// 각 축에서 `[center - w/2, center - w/2 + w)` 구간을 가린다 (정수 나눗셈).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareOcclusion {
    width: usize,
}

impl SquareOcclusion {
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(CoronagraphError::invalid("square occlusion width must be positive").into());
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// 가려지는 (행 구간, 열 구간)
    pub fn spans(&self, height: usize, width: usize) -> ((usize, usize), (usize, usize)) {
        let half = (self.width / 2) as i128;
        let row_start = (height / 2) as i128 - half;
        let col_start = (width / 2) as i128 - half;
        (
            clipped_span(row_start, self.width, height),
            clipped_span(col_start, self.width, width),
        )
    }
}

impl Occluder for SquareOcclusion {
    fn mask(&self, height: usize, width: usize) -> OcclusionMask {
        let ((r0, r1), (c0, c1)) = self.spans(height, width);
        mask_from_fn(height, width, |r, c| (r0..r1).contains(&r) && (c0..c1).contains(&c))
    }

    fn name(&self) -> &'static str {
        "square"
    }
}
