use crate::core::error::CoronagraphError;
use crate::core::occlusion::OcclusionShape;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// 시뮬레이션 전체 구성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// 반복 횟수 (1 이상)
    pub max_iters: usize,
    /// 가림 형태
    pub occlusion: OcclusionShape,
    /// Δφ 난수 시드
    pub seed: u64,
    /// 단계별 재구성 병렬 수행
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_iters: 10,
            occlusion: OcclusionShape::Circle { diameter: 300 },
            seed: 12345,
            parallel: false,
        }
    }
}

impl SimulationConfig {
    /// 사각 가림 설정
    pub fn square(width: usize) -> Self {
        Self {
            occlusion: OcclusionShape::Square { width },
            ..Default::default()
        }
    }

    /// 원형 가림 설정
    pub fn circle(diameter: usize) -> Self {
        Self {
            occlusion: OcclusionShape::Circle { diameter },
            ..Default::default()
        }
    }

    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iters < 1 {
            return Err(CoronagraphError::invalid(format!(
                "max_iters must be at least 1, got {}",
                self.max_iters
            ))
            .into());
        }
        self.occlusion.validate()
    }

    /// JSON 설정 파일 로드 (누락 필드는 기본값)
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("설정 파일을 열 수 없습니다: {}", path.display()))?;
        let config: Self = serde_json::from_reader(file)
            .with_context(|| format!("설정 파일 파싱 실패: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }
}
