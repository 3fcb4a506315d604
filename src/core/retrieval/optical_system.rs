//! 광학계 시뮬레이션: 가림 → 위상 수차 주입
//!
//! 원본 영상을 가린 뒤 스펙트럼 위상에서 Δφ를 빼서 미지의 수차를 흉내 낸다.
//! 반복기는 이 수차 영상에서 출발해 Δφ를 다시 더해 나간다.

use crate::core::error::CoronagraphError;
use crate::core::grid::{IntensityGrid, OcclusionMask};
use crate::core::occlusion::OcclusionShape;
use crate::core::spectral::{phase_perturbation, SpectralTransform};
use anyhow::Result;
use log::info;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// 광학계 관측 결과
#[derive(Debug, Clone)]
pub struct Observation {
    /// 가림만 적용된 영상
    pub occluded: IntensityGrid,
    /// 가림 + 위상 수차가 적용된 영상 (반복기 입력)
    pub aberrated: IntensityGrid,
    /// Δφ (반쪽 스펙트럼 형태)
    pub phase_correction: Array2<f64>,
    pub mask: OcclusionMask,
}

#[derive(Debug, Clone, Copy)]
pub struct OpticalSystem {
    occlusion: OcclusionShape,
    seed: u64,
}

impl OpticalSystem {
    pub fn new(occlusion: OcclusionShape, seed: u64) -> Result<Self> {
        occlusion.validate()?;
        Ok(Self { occlusion, seed })
    }

    pub fn observe(&self, grid: &IntensityGrid, transform: &mut SpectralTransform) -> Result<Observation> {
        let (height, width) = grid.shape();
        if height == 0 || width == 0 {
            return Err(CoronagraphError::invalid("cannot observe an empty grid").into());
        }

        let occluder = self.occlusion.build()?;
        let (occluded, mask) = occluder.occlude(grid);
        info!(
            "{} 가림 적용: {}개 셀 차폐 ({}x{})",
            occluder.name(),
            mask.count(),
            height,
            width
        );

        let spectrum = transform.forward(&occluded)?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let phase_correction = phase_perturbation(&mut rng, height, width, transform)?;

        let aberrated_phase = spectrum.phase() - &phase_correction;
        let aberrated = transform.inverse(&spectrum.with_phase(aberrated_phase)?)?;

        Ok(Observation {
            occluded,
            aberrated,
            phase_correction,
            mask,
        })
    }
}
