use crate::core::error::{is_invalid_argument, CoronagraphError};
use crate::core::normalizer::{dynamic_to_samples, load_image, load_intensity_grid, normalize, normalize_gray};
use approx::assert_abs_diff_eq;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use ndarray::{array, Array3};
use std::path::Path;

#[test]
fn 컬러_채널_단순_평균_테스트() {
    let mut samples = Array3::<f64>::zeros((2, 2, 3));
    samples[[0, 0, 0]] = 0.3;
    samples[[0, 0, 1]] = 0.6;
    samples[[0, 0, 2]] = 0.9;
    samples[[1, 1, 0]] = 1.0;

    let grid = normalize(&samples).unwrap();

    assert_eq!(grid.shape(), (2, 2));
    assert_abs_diff_eq!(grid.get(0, 0).unwrap(), 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(grid.get(1, 1).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
    assert_eq!(grid.get(0, 1), Some(0.0));
}

#[test]
fn 알파_채널_무시_테스트() {
    // RGBA: 알파는 평균에서 제외
    let mut samples = Array3::<f64>::from_elem((1, 1, 4), 0.5);
    samples[[0, 0, 3]] = 0.0;

    let grid = normalize(&samples).unwrap();
    assert_abs_diff_eq!(grid.get(0, 0).unwrap(), 0.5, epsilon = 1e-12);
}

#[test]
fn 범위_밖_샘플_클리핑_테스트() {
    let samples = array![[-0.2, 0.4], [1.7, 1.0]];
    let grid = normalize_gray(&samples).unwrap();

    assert_eq!(grid.get(0, 0), Some(0.0));
    assert_eq!(grid.get(0, 1), Some(0.4));
    assert_eq!(grid.get(1, 0), Some(1.0));
}

#[test]
fn 두_채널은_첫_채널만_사용_테스트() {
    let mut samples = Array3::<f64>::zeros((1, 2, 2));
    samples[[0, 0, 0]] = 0.25;
    samples[[0, 0, 1]] = 1.0;
    samples[[0, 1, 0]] = 0.75;

    let grid = normalize(&samples).unwrap();
    assert_eq!(grid.get(0, 0), Some(0.25));
    assert_eq!(grid.get(0, 1), Some(0.75));
}

#[test]
fn 빈_입력_거부_테스트() {
    let samples = Array3::<f64>::zeros((0, 4, 3));
    let err = normalize(&samples).unwrap_err();
    assert!(is_invalid_argument(&err));
}

#[test]
fn 동적_이미지_샘플_변환_테스트() {
    let mut rgb = RgbImage::new(3, 2);
    rgb.put_pixel(2, 1, Rgb([255, 0, 0]));
    let samples = dynamic_to_samples(&DynamicImage::ImageRgb8(rgb)).unwrap();

    assert_eq!(samples.dim(), (2, 3, 3));
    assert_abs_diff_eq!(samples[[1, 2, 0]], 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(samples[[1, 2, 1]], 0.0, epsilon = 1e-6);

    let gray = GrayImage::from_pixel(4, 1, Luma([51]));
    let samples = dynamic_to_samples(&DynamicImage::ImageLuma8(gray)).unwrap();
    assert_eq!(samples.dim(), (1, 4, 1));
    assert_abs_diff_eq!(samples[[0, 3, 0]], 0.2, epsilon = 1e-6);
}

#[test]
fn png_파일_로드_정규화_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.png");
    let mut rgb = RgbImage::from_pixel(5, 4, Rgb([255, 255, 255]));
    rgb.put_pixel(0, 0, Rgb([0, 0, 0]));
    rgb.save(&path).unwrap();

    let samples = load_image(&path).unwrap();
    assert_eq!(samples.dim(), (4, 5, 3));

    let grid = load_intensity_grid(&path).unwrap();
    assert_eq!(grid.shape(), (4, 5));
    assert_abs_diff_eq!(grid.get(0, 0).unwrap(), 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(grid.get(3, 4).unwrap(), 1.0, epsilon = 1e-6);
}

#[test]
fn 없는_파일은_디코딩_에러_테스트() {
    let err = load_image(Path::new("/definitely/not/here.png")).unwrap_err();
    match err.downcast_ref::<CoronagraphError>() {
        Some(CoronagraphError::ImageDecode { path, .. }) => {
            assert!(path.ends_with("here.png"));
        }
        other => panic!("ImageDecode 에러가 아님: {other:?}"),
    }
}
