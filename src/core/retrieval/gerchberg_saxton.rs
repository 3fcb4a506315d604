//! 게르히베르크-색스턴 위상 복원 반복기
//!
//! 가려진 격자의 스펙트럼 크기는 고정하고, 위상에 Δφ를 단계적으로 주입하며
//! 매 단계 역변환한다. 고정 반복 횟수 시뮬레이션이라 조기 종료는 없다.
//!
//! - k = 0: 원래 위상 그대로
//! - 0 < k < N: `(1 - α)·φ + α·(φ + Δφ)`, `α = k / N`
//! - k = N: `φ + Δφ`

use super::occult_error::occult_error;
use super::trace::{IterationTrace, TraceFrame};
use crate::core::error::CoronagraphError;
use crate::core::grid::{IntensityGrid, OcclusionMask};
use crate::core::spectral::{SpectralTransform, Spectrum};
use anyhow::Result;
use log::{debug, info};
use ndarray::{Array2, Zip};
use rayon::prelude::*;

pub struct GerchbergSaxton {
    max_iters: usize,
    transform: SpectralTransform,
}

impl GerchbergSaxton {
    /// `max_iters`는 1 이상이어야 한다 (보간 비율의 분모)
    pub fn new(max_iters: usize) -> Result<Self> {
        if max_iters < 1 {
            return Err(CoronagraphError::invalid(format!(
                "max_iters must be at least 1, got {max_iters}"
            ))
            .into());
        }
        Ok(Self {
            max_iters,
            transform: SpectralTransform::new(),
        })
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    pub fn run(
        &mut self,
        grid: &IntensityGrid,
        phase_correction: &Array2<f64>,
        mask: Option<&OcclusionMask>,
    ) -> Result<IterationTrace> {
        self.run_with(grid, phase_correction, mask, |_| {})
    }

    /// 매 단계가 끝날 때마다 `on_step`을 반복 순서대로 호출
    pub fn run_with<F>(
        &mut self,
        grid: &IntensityGrid,
        phase_correction: &Array2<f64>,
        mask: Option<&OcclusionMask>,
        mut on_step: F,
    ) -> Result<IterationTrace>
    where
        F: FnMut(&TraceFrame),
    {
        let reference = self.transform.forward(grid)?;
        validate_inputs(grid, &reference, phase_correction, mask)?;
        info!(
            "위상 복원 시작: {}x{} 격자, {}회 반복",
            grid.height(),
            grid.width(),
            self.max_iters
        );

        let mut trace = IterationTrace::new(self.max_iters);
        for k in 0..=self.max_iters {
            let frame = reconstruct_step(
                &mut self.transform,
                &reference,
                phase_correction,
                k,
                self.max_iters,
                mask,
            )?;
            on_step(&frame);
            trace.push(frame);
        }

        log_outcome(&trace);
        Ok(trace)
    }

    /// 단계별 재구성을 rayon으로 병렬 수행 (결과는 순차 실행과 동일)
    pub fn run_parallel(
        &mut self,
        grid: &IntensityGrid,
        phase_correction: &Array2<f64>,
        mask: Option<&OcclusionMask>,
    ) -> Result<IterationTrace> {
        let reference = self.transform.forward(grid)?;
        validate_inputs(grid, &reference, phase_correction, mask)?;
        info!(
            "위상 복원 시작 (병렬): {}x{} 격자, {}회 반복",
            grid.height(),
            grid.width(),
            self.max_iters
        );

        let max_iters = self.max_iters;
        let frames: Vec<TraceFrame> = (0..=max_iters)
            .into_par_iter()
            .map_init(SpectralTransform::new, |transform, k| {
                reconstruct_step(transform, &reference, phase_correction, k, max_iters, mask)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut trace = IterationTrace::new(max_iters);
        for frame in frames {
            trace.push(frame);
        }

        log_outcome(&trace);
        Ok(trace)
    }
}

/// 보간 비율 α = k / N
pub fn blend_fraction(k: usize, max_iters: usize) -> f64 {
    k as f64 / max_iters as f64
}

/// k 단계의 보정 위상
pub fn corrected_phase(
    phase: &Array2<f64>,
    phase_correction: &Array2<f64>,
    k: usize,
    max_iters: usize,
) -> Array2<f64> {
    if k == 0 {
        phase.clone()
    } else if k >= max_iters {
        phase + phase_correction
    } else {
        let alpha = blend_fraction(k, max_iters);
        Zip::from(phase)
            .and(phase_correction)
            .map_collect(|&p, &d| (1.0 - alpha) * p + alpha * (p + d))
    }
}

fn validate_inputs(
    grid: &IntensityGrid,
    reference: &Spectrum,
    phase_correction: &Array2<f64>,
    mask: Option<&OcclusionMask>,
) -> Result<()> {
    if phase_correction.dim() != reference.shape() {
        return Err(CoronagraphError::ShapeMismatch {
            what: "phase correction",
            expected: reference.shape(),
            got: phase_correction.dim(),
        }
        .into());
    }
    if phase_correction.iter().any(|p| !p.is_finite()) {
        return Err(CoronagraphError::invalid("phase correction contains non-finite values").into());
    }
    if let Some(mask) = mask {
        if mask.shape() != grid.shape() {
            return Err(CoronagraphError::ShapeMismatch {
                what: "occlusion mask",
                expected: grid.shape(),
                got: mask.shape(),
            }
            .into());
        }
    }
    Ok(())
}

fn reconstruct_step(
    transform: &mut SpectralTransform,
    reference: &Spectrum,
    phase_correction: &Array2<f64>,
    k: usize,
    max_iters: usize,
    mask: Option<&OcclusionMask>,
) -> Result<TraceFrame> {
    let phase = corrected_phase(reference.phase(), phase_correction, k, max_iters);
    let grid = transform.inverse(&reference.with_phase(phase)?)?;
    let error = mask.map(|m| occult_error(&grid, m)).transpose()?;

    debug!("Iteration {} of {}: error = {:?}", k, max_iters, error);
    Ok(TraceFrame {
        iteration: k,
        grid,
        error,
    })
}

fn log_outcome(trace: &IterationTrace) {
    match (trace.first().and_then(|f| f.error), trace.last().and_then(|f| f.error)) {
        (Some(initial), Some(last)) => {
            info!("위상 복원 완료: 가림 오차 {:.6} → {:.6}", initial, last)
        }
        _ => info!("위상 복원 완료: {} 프레임", trace.len()),
    }
}
