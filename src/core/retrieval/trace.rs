//! 반복 기록 (재구성 격자 + 오차)

use crate::core::grid::IntensityGrid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 한 반복 단계의 결과
#[derive(Debug, Clone, PartialEq)]
pub struct TraceFrame {
    pub iteration: usize,
    pub grid: IntensityGrid,
    /// 마스크가 주어졌을 때만 계산
    pub error: Option<f64>,
}

/// 반복 순서대로 쌓인 결과 (0..=max_iters)
#[derive(Debug, Clone, PartialEq)]
pub struct IterationTrace {
    max_iters: usize,
    frames: Vec<TraceFrame>,
}

impl IterationTrace {
    /// `max_iters + 1`개 프레임 자리를 미리 잡은 빈 기록
    pub fn new(max_iters: usize) -> Self {
        Self {
            max_iters,
            frames: Vec::with_capacity(max_iters + 1),
        }
    }

    /// 프레임은 반복 순서대로만 추가된다
    pub fn push(&mut self, frame: TraceFrame) {
        debug_assert_eq!(frame.iteration, self.frames.len());
        self.frames.push(frame);
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    pub fn get(&self, iteration: usize) -> Option<&TraceFrame> {
        self.frames.get(iteration)
    }

    pub fn first(&self) -> Option<&TraceFrame> {
        self.frames.first()
    }

    pub fn last(&self) -> Option<&TraceFrame> {
        self.frames.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceFrame> {
        self.frames.iter()
    }

    /// 오차 시계열 (마스크 없이 실행했다면 빈 벡터)
    pub fn errors(&self) -> Vec<f64> {
        self.frames.iter().filter_map(|f| f.error).collect()
    }

    pub fn has_errors(&self) -> bool {
        self.frames.iter().any(|f| f.error.is_some())
    }

    pub fn max_error(&self) -> Option<f64> {
        self.frames
            .iter()
            .filter_map(|f| f.error)
            .fold(None, |acc, e| Some(acc.map_or(e, |m: f64| m.max(e))))
    }
}

impl<'a> IntoIterator for &'a IterationTrace {
    type Item = &'a TraceFrame;
    type IntoIter = std::slice::Iter<'a, TraceFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// JSON으로 남기는 실행 요약
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceSummary {
    pub max_iters: usize,
    pub height: usize,
    pub width: usize,
    pub errors: Vec<f64>,
    pub initial_error: Option<f64>,
    pub final_error: Option<f64>,
    pub occlusion: Option<String>,
    pub seed: Option<u64>,
    pub created_at: DateTime<Utc>,
}

impl TraceSummary {
    pub fn from_trace(trace: &IterationTrace) -> Self {
        let (height, width) = trace.first().map(|f| f.grid.shape()).unwrap_or((0, 0));
        Self {
            max_iters: trace.max_iters(),
            height,
            width,
            errors: trace.errors(),
            initial_error: trace.first().and_then(|f| f.error),
            final_error: trace.last().and_then(|f| f.error),
            occlusion: None,
            seed: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_run_info(mut self, occlusion: impl Into<String>, seed: u64) -> Self {
        self.occlusion = Some(occlusion.into());
        self.seed = Some(seed);
        self
    }
}
