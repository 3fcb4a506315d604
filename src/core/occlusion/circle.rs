use super::{mask_from_fn, Occluder};
use crate::core::error::CoronagraphError;
use crate::core::grid::OcclusionMask;
use anyhow::Result;

/// 원형 가림 (코로나그래프 차폐판)
///
/// 반지름 `r = d / 2`, 중심 `(h / 2, w / 2)`. 중심과의 거리 제곱이 `r²` 이하인
/// 셀을 가린다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircularOcclusion {
    diameter: usize,
}

impl CircularOcclusion {
    pub fn new(diameter: usize) -> Result<Self> {
        if diameter == 0 {
            return Err(CoronagraphError::invalid("circular occlusion diameter must be positive").into());
        }
        Ok(Self { diameter })
    }

    pub fn diameter(&self) -> usize {
        self.diameter
    }

    pub fn radius(&self) -> usize {
        self.diameter / 2
    }
}

impl Occluder for CircularOcclusion {
    fn mask(&self, height: usize, width: usize) -> OcclusionMask {
        // 긴 변보다 큰 반지름은 전체를 가리므로 제곱 전에 잘라낸다
        let radius = self.radius().min(height.max(width)) as i128;
        let radius_sq = radius * radius;
        let center_r = (height / 2) as i128;
        let center_c = (width / 2) as i128;

        mask_from_fn(height, width, |r, c| {
            let dy = r as i128 - center_r;
            let dx = c as i128 - center_c;
            dx * dx + dy * dy <= radius_sq
        })
    }

    fn name(&self) -> &'static str {
        "circle"
    }
}
