//! 위상 수차(Δφ) 생성

use super::transform::SpectralTransform;
use anyhow::Result;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 균일 난수 격자의 스펙트럼 위상을 Δφ로 사용
///
/// 난수원은 호출자가 주입한다. 같은 시드면 같은 Δφ가 나온다.
pub fn phase_perturbation<R: Rng + ?Sized>(
    rng: &mut R,
    height: usize,
    width: usize,
    transform: &mut SpectralTransform,
) -> Result<Array2<f64>> {
    let noise = Array2::from_shape_fn((height, width), |_| rng.gen::<f64>());
    let spectrum = transform.forward_real(&noise)?;
    Ok(spectrum.phase().clone())
}

pub fn seeded_phase_perturbation(
    seed: u64,
    height: usize,
    width: usize,
    transform: &mut SpectralTransform,
) -> Result<Array2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    phase_perturbation(&mut rng, height, width, transform)
}
