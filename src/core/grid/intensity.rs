//! 단일 채널 밝기 격자 ([0, 1] 범위 보장)

use crate::core::error::CoronagraphError;
use anyhow::Result;
use ndarray::{Array2, ArrayView2};

/// 밝기 격자
///
/// 모든 값은 유한하고 [0, 1] 범위에 있다. 각 단계는 입력 격자를 변경하지 않고
/// 새 격자를 반환한다.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGrid {
    data: Array2<f64>,
}

impl IntensityGrid {
    /// 범위를 벗어난 값은 잘라내고, NaN은 0으로 취급
    pub fn from_array_clipped(mut data: Array2<f64>) -> Self {
        data.mapv_inplace(clip_unit);
        Self { data }
    }

    /// 범위 검증 후 생성 (벗어나면 인자 오류)
    pub fn try_from_array(data: Array2<f64>) -> Result<Self> {
        if let Some(((row, col), value)) = data
            .indexed_iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0 || **v > 1.0)
        {
            return Err(CoronagraphError::invalid(format!(
                "intensity at ({row}, {col}) is {value}, expected a finite value in [0, 1]"
            ))
            .into());
        }
        Ok(Self { data })
    }

    pub fn filled(height: usize, width: usize, value: f64) -> Self {
        Self {
            data: Array2::from_elem((height, width), clip_unit(value)),
        }
    }

    pub fn zeros(height: usize, width: usize) -> Self {
        Self::filled(height, width, 0.0)
    }

    /// 행 우선 순서의 값 벡터로 생성
    pub fn from_row_major(height: usize, width: usize, values: Vec<f64>) -> Result<Self> {
        let got = values.len();
        let data = Array2::from_shape_vec((height, width), values).map_err(|_| {
            CoronagraphError::invalid(format!(
                "{height}x{width} grid needs {} values, got {got}",
                height * width
            ))
        })?;
        Self::try_from_array(data)
    }

    /// (height, width)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get((row, col)).copied()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn as_array(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn into_array(self) -> Array2<f64> {
        self.data
    }

    /// 두 격자 사이 최대 절대 오차
    pub fn max_abs_diff(&self, other: &IntensityGrid) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }
        Some(
            self.data
                .iter()
                .zip(other.data.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max),
        )
    }
}

/// [0, 1] 클리핑
pub fn clip_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
