//! 다채널 샘플 → 단일 채널 밝기 격자

use crate::core::error::CoronagraphError;
use crate::core::grid::IntensityGrid;
use anyhow::Result;
use ndarray::{s, Array2, Array3, Axis};

/// 디코딩된 샘플을 밝기 격자로 변환
///
/// 입력 형태는 (height, width, channels)이고 각 샘플은 [0, 1] 범위여야 한다
/// (디코더 쪽에서 보장). 채널이 3개 이상이면 앞의 세 채널을 가중치 없이
/// 평균하고, 1~2채널이면 첫 채널만 사용한다. 마지막에 [0, 1]로 잘라낸다.
pub fn normalize(samples: &Array3<f64>) -> Result<IntensityGrid> {
    let (height, width, channels) = samples.dim();
    if height == 0 || width == 0 || channels == 0 {
        return Err(CoronagraphError::invalid(format!(
            "image samples must be non-empty, got {height}x{width}x{channels}"
        ))
        .into());
    }

    let collapsed: Array2<f64> = if channels >= 3 {
        samples
            .slice(s![.., .., 0..3])
            .mean_axis(Axis(2))
            .ok_or_else(|| CoronagraphError::invalid("empty channel axis"))?
    } else {
        samples.index_axis(Axis(2), 0).to_owned()
    };

    Ok(IntensityGrid::from_array_clipped(collapsed))
}

/// 단일 채널 2차원 샘플을 바로 정규화
pub fn normalize_gray(samples: &Array2<f64>) -> Result<IntensityGrid> {
    let (height, width) = samples.dim();
    let expanded = samples
        .to_owned()
        .into_shape((height, width, 1))
        .map_err(|e| CoronagraphError::invalid(format!("cannot reshape grayscale samples: {e}")))?;
    normalize(&expanded)
}
