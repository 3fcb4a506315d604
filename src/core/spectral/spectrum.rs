//! 크기/위상 스펙트럼 표현

use crate::core::error::CoronagraphError;
use anyhow::Result;
use ndarray::{Array2, Zip};
use rustfft::num_complex::Complex;

/// 실수 입력의 비중복 반쪽 스펙트럼 (크기, 위상)
///
/// 형태는 `height × (width / 2 + 1)`. 원래 실수 폭 `width`를 함께 보관해
/// 홀수 폭도 같은 형태로 복원된다. 크기가 0인 빈의 위상은 0으로 둔다.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    magnitude: Array2<f64>,
    phase: Array2<f64>,
    width: usize,
}

impl Spectrum {
    pub fn new(magnitude: Array2<f64>, phase: Array2<f64>, width: usize) -> Result<Self> {
        if magnitude.dim() != phase.dim() {
            return Err(CoronagraphError::ShapeMismatch {
                what: "spectrum phase",
                expected: magnitude.dim(),
                got: phase.dim(),
            }
            .into());
        }
        let expected_cols = half_width(width);
        if magnitude.ncols() != expected_cols || width == 0 {
            return Err(CoronagraphError::ShapeMismatch {
                what: "half-spectrum columns",
                expected: (magnitude.nrows(), expected_cols),
                got: magnitude.dim(),
            }
            .into());
        }
        if magnitude.iter().any(|&m| !m.is_finite() || m < 0.0) {
            return Err(CoronagraphError::invalid("spectral magnitude must be finite and non-negative").into());
        }
        Ok(Self { magnitude, phase, width })
    }

    /// 복소 반쪽 스펙트럼에서 분해
    pub fn from_complex(bins: &Array2<Complex<f64>>, width: usize) -> Result<Self> {
        let magnitude = bins.mapv(|z| z.norm());
        let phase = bins.mapv(phase_of);
        Self::new(magnitude, phase, width)
    }

    /// `magnitude * (cos(phase) + i sin(phase))`
    pub fn to_complex(&self) -> Array2<Complex<f64>> {
        let mut bins = Array2::from_elem(self.magnitude.dim(), Complex::new(0.0, 0.0));
        Zip::from(&mut bins)
            .and(&self.magnitude)
            .and(&self.phase)
            .for_each(|z, &m, &p| *z = Complex::new(m * p.cos(), m * p.sin()));
        bins
    }

    /// 같은 크기에 다른 위상을 붙인 스펙트럼
    pub fn with_phase(&self, phase: Array2<f64>) -> Result<Self> {
        Self::new(self.magnitude.clone(), phase, self.width)
    }

    pub fn magnitude(&self) -> &Array2<f64> {
        &self.magnitude
    }

    pub fn phase(&self) -> &Array2<f64> {
        &self.phase
    }

    /// 스펙트럼 형태 (height, width / 2 + 1)
    pub fn shape(&self) -> (usize, usize) {
        self.magnitude.dim()
    }

    /// 복원될 실수 격자 형태
    pub fn real_shape(&self) -> (usize, usize) {
        (self.magnitude.nrows(), self.width)
    }
}

/// 실수 폭에 대한 반쪽 스펙트럼 열 수
pub fn half_width(width: usize) -> usize {
    width / 2 + 1
}

/// 복소수 위상 (크기 0이면 0, NaN 방지)
pub fn phase_of(z: Complex<f64>) -> f64 {
    if z.re == 0.0 && z.im == 0.0 {
        0.0
    } else {
        z.im.atan2(z.re)
    }
}
