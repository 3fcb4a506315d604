//! 2차원 실수 DFT 정/역변환 쌍
//!
//! 행 방향 FFT 후 비중복 절반 열만 남기고 열 방향 FFT를 수행한다.
//! 역변환은 열 방향 역FFT 후 행마다 에르미트 대칭으로 전체 행을 복원해
//! 역FFT의 실수부를 취한다. 같은 입력에는 항상 같은 결과를 낸다.

use super::spectrum::{half_width, Spectrum};
use crate::core::error::CoronagraphError;
use crate::core::grid::IntensityGrid;
use anyhow::Result;
use ndarray::Array2;
use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

/// 스펙트럼 변환기 (FFT 플래너 재사용)
pub struct SpectralTransform {
    planner: FftPlanner<f64>,
}

impl Default for SpectralTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralTransform {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    /// 밝기 격자의 (크기, 위상) 반쪽 스펙트럼
    pub fn forward(&mut self, grid: &IntensityGrid) -> Result<Spectrum> {
        self.forward_real(grid.as_array())
    }

    /// 임의 실수 격자의 정변환 (범위 제한 없음)
    pub fn forward_real(&mut self, data: &Array2<f64>) -> Result<Spectrum> {
        let (height, width) = data.dim();
        if height == 0 || width == 0 {
            return Err(CoronagraphError::invalid(format!(
                "cannot transform an empty {height}x{width} grid"
            ))
            .into());
        }
        let half = half_width(width);

        let row_fft = self.planner.plan_fft_forward(width);
        let mut row_buf = vec![Complex::new(0.0, 0.0); width];
        let mut bins = Array2::from_elem((height, half), Complex::new(0.0, 0.0));

        for (r, row) in data.rows().into_iter().enumerate() {
            for (dst, &value) in row_buf.iter_mut().zip(row.iter()) {
                *dst = Complex::new(value, 0.0);
            }
            row_fft.process(&mut row_buf);
            for (c, bin) in row_buf.iter().take(half).enumerate() {
                bins[[r, c]] = *bin;
            }
        }

        self.transform_columns(&mut bins, FftDirection::Forward);
        Spectrum::from_complex(&bins, width)
    }

    /// 역변환 후 [0, 1]로 클리핑
    pub fn inverse(&mut self, spectrum: &Spectrum) -> Result<IntensityGrid> {
        Ok(IntensityGrid::from_array_clipped(self.inverse_unclipped(spectrum)?))
    }

    /// 클리핑 없는 역변환
    pub fn inverse_unclipped(&mut self, spectrum: &Spectrum) -> Result<Array2<f64>> {
        let (height, width) = spectrum.real_shape();
        let half = half_width(width);

        let mut bins = spectrum.to_complex();
        self.transform_columns(&mut bins, FftDirection::Inverse);

        let row_ifft = self.planner.plan_fft_inverse(width);
        let mut row_buf = vec![Complex::new(0.0, 0.0); width];
        let scale = 1.0 / (height * width) as f64;
        let mut out = Array2::zeros((height, width));

        for r in 0..height {
            for (c, slot) in row_buf.iter_mut().enumerate() {
                *slot = if c < half {
                    bins[[r, c]]
                } else {
                    bins[[r, width - c]].conj()
                };
            }
            row_ifft.process(&mut row_buf);
            for (c, z) in row_buf.iter().enumerate() {
                out[[r, c]] = z.re * scale;
            }
        }

        if out.iter().any(|v: &f64| !v.is_finite()) {
            return Err(CoronagraphError::invalid("inverse transform produced non-finite values").into());
        }
        Ok(out)
    }

    /// 각 열에 길이 height FFT 적용 (정규화 없음)
    fn transform_columns(&mut self, bins: &mut Array2<Complex<f64>>, direction: FftDirection) {
        let height = bins.nrows();
        let fft = self.planner.plan_fft(height, direction);
        let mut col_buf = vec![Complex::new(0.0, 0.0); height];

        for mut col in bins.columns_mut() {
            for (dst, src) in col_buf.iter_mut().zip(col.iter()) {
                *dst = *src;
            }
            fft.process(&mut col_buf);
            for (dst, src) in col.iter_mut().zip(col_buf.iter()) {
                *dst = *src;
            }
        }
    }
}
