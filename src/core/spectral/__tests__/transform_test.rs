use crate::core::error::is_invalid_argument;
use crate::core::grid::IntensityGrid;
use crate::core::spectral::{half_width, phase_of, SpectralTransform, Spectrum};
use approx::assert_abs_diff_eq;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

fn random_real(rows: usize, cols: usize, lo: f64, hi: f64, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((rows, cols), |_| rng.gen_range(lo..hi))
}

/// O(N²) 직접 DFT (반쪽 열만)
fn naive_half_dft(data: &Array2<f64>) -> Array2<Complex<f64>> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((h, half_width(w)), |(k1, k2)| {
        let mut acc = Complex::new(0.0, 0.0);
        for n1 in 0..h {
            for n2 in 0..w {
                let angle = -2.0 * PI * ((k1 * n1) as f64 / h as f64 + (k2 * n2) as f64 / w as f64);
                acc += Complex::new(angle.cos(), angle.sin()) * data[[n1, n2]];
            }
        }
        acc
    })
}

#[test]
fn 왕복_변환_복원_테스트() {
    let mut transform = SpectralTransform::new();

    // 짝수/홀수 폭과 높이 모두
    for &(rows, cols) in &[(8, 8), (7, 9), (6, 5), (1, 4), (5, 1)] {
        let data = random_real(rows, cols, -2.0, 3.0, 7);
        let spectrum = transform.forward_real(&data).unwrap();
        assert_eq!(spectrum.shape(), (rows, cols / 2 + 1));
        assert_eq!(spectrum.real_shape(), (rows, cols));

        let restored = transform.inverse_unclipped(&spectrum).unwrap();
        assert_eq!(restored.dim(), (rows, cols));
        for (a, b) in data.iter().zip(restored.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }
}

#[test]
fn 밝기_격자_왕복_클리핑_무영향_테스트() {
    let mut transform = SpectralTransform::new();
    let grid = IntensityGrid::from_array_clipped(random_real(16, 12, 0.0, 1.0, 11));

    let spectrum = transform.forward(&grid).unwrap();
    let restored = transform.inverse(&spectrum).unwrap();

    let diff = grid.max_abs_diff(&restored).unwrap();
    assert!(diff < 1e-9, "왕복 오차가 큼: {diff}");
}

#[test]
fn 직접_dft와_일치_테스트() {
    let mut transform = SpectralTransform::new();
    let data = random_real(3, 5, 0.0, 1.0, 3);

    let spectrum = transform.forward_real(&data).unwrap();
    let expected = naive_half_dft(&data);
    let actual = spectrum.to_complex();

    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(a.re, e.re, epsilon = 1e-9);
        assert_abs_diff_eq!(a.im, e.im, epsilon = 1e-9);
    }
}

#[test]
fn 상수_격자_dc_성분_테스트() {
    let mut transform = SpectralTransform::new();
    let grid = IntensityGrid::filled(4, 4, 1.0);
    let spectrum = transform.forward(&grid).unwrap();

    assert_abs_diff_eq!(spectrum.magnitude()[[0, 0]], 16.0, epsilon = 1e-12);
    assert_abs_diff_eq!(spectrum.phase()[[0, 0]], 0.0, epsilon = 1e-12);
    for (idx, &m) in spectrum.magnitude().indexed_iter() {
        if idx != (0, 0) {
            assert!(m < 1e-9, "{idx:?} 빈의 크기가 0이 아님: {m}");
        }
    }
    assert!(spectrum.phase().iter().all(|p| p.is_finite()));
}

#[test]
fn 영_격자_위상_nan_없음_테스트() {
    let mut transform = SpectralTransform::new();
    let spectrum = transform.forward(&IntensityGrid::zeros(6, 6)).unwrap();

    assert!(spectrum.phase().iter().all(|&p| p == 0.0));
    let restored = transform.inverse(&spectrum).unwrap();
    assert!(restored.as_array().iter().all(|&v| v == 0.0));
    assert_eq!(phase_of(Complex::new(0.0, 0.0)), 0.0);
}

#[test]
fn 역변환_클리핑_테스트() {
    let mut transform = SpectralTransform::new();
    let mut data = Array2::from_elem((4, 4), 2.0);
    data[[0, 0]] = -1.0;

    let spectrum = transform.forward_real(&data).unwrap();
    let grid = transform.inverse(&spectrum).unwrap();

    assert_eq!(grid.get(0, 0), Some(0.0));
    assert_eq!(grid.get(3, 3), Some(1.0));
}

#[test]
fn 결정적_변환_테스트() {
    let data = random_real(9, 10, 0.0, 1.0, 99);
    let a = SpectralTransform::new().forward_real(&data).unwrap();
    let b = SpectralTransform::new().forward_real(&data).unwrap();
    assert_eq!(a, b);
}

#[test]
fn 스펙트럼_형태_검증_테스트() {
    let magnitude = Array2::zeros((4, 3));

    let err = Spectrum::new(magnitude.clone(), Array2::zeros((4, 2)), 4).unwrap_err();
    assert!(is_invalid_argument(&err));

    let err = Spectrum::new(magnitude.clone(), Array2::zeros((4, 3)), 8).unwrap_err();
    assert!(is_invalid_argument(&err), "폭 8에는 5열이 필요");

    let err = Spectrum::new(Array2::from_elem((4, 3), -1.0), Array2::zeros((4, 3)), 4).unwrap_err();
    assert!(is_invalid_argument(&err));

    // 폭 4와 5 모두 반쪽 3열
    assert!(Spectrum::new(magnitude.clone(), Array2::zeros((4, 3)), 4).is_ok());
    assert!(Spectrum::new(magnitude, Array2::zeros((4, 3)), 5).is_ok());
}

#[test]
fn 빈_격자_변환_거부_테스트() {
    let err = SpectralTransform::new().forward_real(&Array2::zeros((0, 3))).unwrap_err();
    assert!(is_invalid_argument(&err));
}
