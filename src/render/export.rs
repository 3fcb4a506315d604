//! 밝기 격자 → image 크레이트 변환
//!
//! ndarray는 [row, col] = [y, x], image 크레이트는 (x, y) 좌표를 쓴다.

use crate::core::grid::IntensityGrid;
use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::Path;

/// 흑백 값을 3채널로 복제한 8비트 RGB 영상
pub fn grid_to_rgb_image(grid: &IntensityGrid) -> RgbImage {
    let (height, width) = grid.shape();
    let mut img = RgbImage::new(width as u32, height as u32);
    for ((y, x), &value) in grid.as_array().indexed_iter() {
        let level = unit_to_u8(value);
        img.put_pixel(x as u32, y as u32, Rgb([level, level, level]));
    }
    img
}

pub fn save_grid_png(grid: &IntensityGrid, path: &Path) -> Result<()> {
    grid_to_rgb_image(grid)
        .save(path)
        .with_context(|| format!("프레임 저장 실패: {}", path.display()))
}

pub(crate) fn unit_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
