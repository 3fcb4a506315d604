use crate::core::error::CoronagraphError;
use crate::core::grid::{IntensityGrid, OcclusionMask};
use anyhow::Result;

/// 가림 오차: 마스크 영역 안의 밝기 제곱합
///
/// 가려진 영역으로 새어 나온 빛의 양이다. 0이면 완전한 차폐.
pub fn occult_error(grid: &IntensityGrid, mask: &OcclusionMask) -> Result<f64> {
    if grid.shape() != mask.shape() {
        return Err(CoronagraphError::ShapeMismatch {
            what: "occlusion mask",
            expected: grid.shape(),
            got: mask.shape(),
        }
        .into());
    }
    Ok(grid
        .as_array()
        .iter()
        .zip(mask.as_array().iter())
        .filter(|(_, &hidden)| hidden)
        .map(|(&value, _)| value * value)
        .sum())
}
