//! 가림(occultation) 마스크

use ndarray::{Array2, ArrayView2};

/// 가려진 셀이 `true`인 불리언 격자. 생성 이후 변경되지 않는다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcclusionMask {
    cells: Array2<bool>,
}

impl OcclusionMask {
    pub fn new(cells: Array2<bool>) -> Self {
        Self { cells }
    }

    /// 아무 셀도 가리지 않는 마스크
    pub fn empty(height: usize, width: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// 가려진 셀 개수
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.get((row, col)).copied().unwrap_or(false)
    }

    pub fn view(&self) -> ArrayView2<'_, bool> {
        self.cells.view()
    }

    pub fn as_array(&self) -> &Array2<bool> {
        &self.cells
    }
}
