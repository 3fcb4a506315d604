//! 정규화된 영상 → 관측 → 위상 복원 전체 파이프라인

use crate::core::config::SimulationConfig;
use crate::core::grid::IntensityGrid;
use crate::core::retrieval::{GerchbergSaxton, IterationTrace, Observation, OpticalSystem, TraceFrame, TraceSummary};
use crate::core::spectral::SpectralTransform;
use anyhow::Result;
use std::time::Instant;

/// 한 번의 시뮬레이션 결과
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub observation: Observation,
    pub trace: IterationTrace,
    pub elapsed_ms: f64,
}

impl SimulationOutput {
    pub fn summary(&self, config: &SimulationConfig) -> TraceSummary {
        TraceSummary::from_trace(&self.trace).with_run_info(config.occlusion.to_string(), config.seed)
    }
}

/// 코로나그래프 시뮬레이터
pub struct Coronagraph {
    config: SimulationConfig,
    transform: SpectralTransform,
}

impl Coronagraph {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transform: SpectralTransform::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn simulate(&mut self, image: &IntensityGrid) -> Result<SimulationOutput> {
        self.simulate_with(image, |_| {})
    }

    /// 반복 단계마다 `on_step` 호출 (병렬 모드에서는 완료 후 순서대로)
    pub fn simulate_with<F>(&mut self, image: &IntensityGrid, mut on_step: F) -> Result<SimulationOutput>
    where
        F: FnMut(&TraceFrame),
    {
        let start = Instant::now();

        let system = OpticalSystem::new(self.config.occlusion, self.config.seed)?;
        let observation = system.observe(image, &mut self.transform)?;

        let mut retrieval = GerchbergSaxton::new(self.config.max_iters)?;
        let trace = if self.config.parallel {
            let trace = retrieval.run_parallel(
                &observation.aberrated,
                &observation.phase_correction,
                Some(&observation.mask),
            )?;
            trace.iter().for_each(&mut on_step);
            trace
        } else {
            retrieval.run_with(
                &observation.aberrated,
                &observation.phase_correction,
                Some(&observation.mask),
                on_step,
            )?
        };

        Ok(SimulationOutput {
            observation,
            trace,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}
