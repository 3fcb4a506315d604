//! 래스터 이미지 디코딩 (image 크레이트)
//!
//! 디코더는 항상 [0, 1] 범위의 `f64` 샘플을 돌려준다. 흑백 이미지는 1채널,
//! 컬러 이미지는 알파를 버린 3채널이다.

use crate::core::error::CoronagraphError;
use crate::core::grid::IntensityGrid;
use anyhow::Result;
use image::DynamicImage;
use log::info;
use ndarray::Array3;
use std::path::Path;

use super::normalize::normalize;

/// 파일에서 이미지를 읽어 (height, width, channels) 샘플로 변환
pub fn load_image(path: &Path) -> Result<Array3<f64>> {
    let image = image::open(path).map_err(|source| CoronagraphError::ImageDecode {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "이미지 로드: {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    dynamic_to_samples(&image)
}

/// 메모리 상의 이미지를 샘플 배열로 변환
pub fn dynamic_to_samples(image: &DynamicImage) -> Result<Array3<f64>> {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let (channels, raw): (usize, Vec<f32>) = if image.color().has_color() {
        (3, image.to_rgb32f().into_raw())
    } else {
        (1, image.to_luma32f().into_raw())
    };

    let samples: Vec<f64> = raw.into_iter().map(f64::from).collect();
    let array = Array3::from_shape_vec((height, width, channels), samples).map_err(|e| {
        CoronagraphError::invalid(format!("decoded buffer does not match {height}x{width}x{channels}: {e}"))
    })?;
    Ok(array)
}

/// 로드 + 정규화를 한 번에
pub fn load_intensity_grid(path: &Path) -> Result<IntensityGrid> {
    let samples = load_image(path)?;
    normalize(&samples)
}
