//! 파이프라인 전체 통합 테스트

use coronagraph::core::error::is_invalid_argument;
use coronagraph::core::normalizer::load_intensity_grid;
use coronagraph::render::frame_dimensions;
use coronagraph::{
    Coronagraph, FrameConfig, FrameRenderer, IntensityGrid, OcclusionShape, SimulationConfig,
};
use image::{Rgb, RgbImage};
use ndarray::Array2;

fn test_scene(size: usize) -> IntensityGrid {
    // 중앙의 밝은 별 + 완만한 배경
    let c = (size / 2) as f64;
    IntensityGrid::from_array_clipped(Array2::from_shape_fn((size, size), |(r, col)| {
        let d2 = (r as f64 - c).powi(2) + (col as f64 - c).powi(2);
        0.25 + 0.2 * (col as f64 / size as f64) + 0.5 * (-d2 / 8.0).exp()
    }))
}

#[test]
fn test_simulation_produces_full_trace() {
    let config = SimulationConfig::circle(10).with_max_iters(6).with_seed(12345);
    let mut coronagraph = Coronagraph::new(config.clone()).unwrap();

    let output = coronagraph.simulate(&test_scene(32)).unwrap();

    assert_eq!(output.trace.len(), 7);
    assert_eq!(output.observation.mask.shape(), (32, 32));
    let errors = output.trace.errors();
    assert_eq!(errors.len(), 7);
    assert!(errors.iter().all(|&e| e >= 0.0));
    assert!(
        errors[6] <= errors[0],
        "final error {} should not exceed initial error {}",
        errors[6],
        errors[0]
    );

    let summary = output.summary(&config);
    assert_eq!(summary.seed, Some(12345));
    assert_eq!(summary.occlusion.as_deref(), Some("circle(diameter=10)"));
}

#[test]
fn test_zero_iterations_rejected_before_running() {
    let config = SimulationConfig::square(4).with_max_iters(0);
    let err = Coronagraph::new(config).err().expect("max_iters = 0 must fail");
    assert!(is_invalid_argument(&err));
}

#[test]
fn test_seeded_runs_are_identical() {
    let scene = test_scene(24);
    let config = SimulationConfig::square(6).with_max_iters(4).with_seed(99);

    let a = Coronagraph::new(config.clone()).unwrap().simulate(&scene).unwrap();
    let b = Coronagraph::new(config).unwrap().simulate(&scene).unwrap();

    assert_eq!(a.trace, b.trace);
}

#[test]
fn test_parallel_mode_matches_sequential() {
    let scene = test_scene(24);
    let sequential_config = SimulationConfig::circle(8).with_max_iters(5);
    let parallel_config = SimulationConfig {
        parallel: true,
        ..sequential_config.clone()
    };

    let mut seen = Vec::new();
    let seq = Coronagraph::new(sequential_config).unwrap().simulate(&scene).unwrap();
    let par = Coronagraph::new(parallel_config)
        .unwrap()
        .simulate_with(&scene, |frame| seen.push(frame.iteration))
        .unwrap();

    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
    for (s, p) in seq.trace.iter().zip(par.trace.iter()) {
        assert!(s.grid.max_abs_diff(&p.grid).unwrap() < 1e-12);
    }
}

#[test]
fn test_image_file_to_frames_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("scene.png");
    let mut img = RgbImage::from_pixel(16, 12, Rgb([90, 120, 150]));
    img.put_pixel(8, 6, Rgb([255, 255, 255]));
    img.save(&input).unwrap();

    let image = load_intensity_grid(&input).unwrap();
    assert_eq!(image.shape(), (12, 16));

    let config = SimulationConfig::circle(4).with_max_iters(3);
    let output = Coronagraph::new(config.clone()).unwrap().simulate(&image).unwrap();

    let renderer = FrameRenderer::new(FrameConfig {
        output_dir: dir.path().join("frames"),
        panel_height: 24,
        plot_width: 30,
        ..Default::default()
    })
    .unwrap();
    let paths = renderer.render_trace(&output.trace, |_| {}).unwrap();
    let summary = renderer.write_summary(&output.summary(&config)).unwrap();

    assert_eq!(paths.len(), 4);
    assert!(paths[3].ends_with("coronagraph3.png"));
    assert_eq!(frame_dimensions(&paths[0]).unwrap(), (32 + 30, 24));
    assert!(summary.exists());
}

#[test]
fn test_occlusion_larger_than_image_is_clipped() {
    let config = SimulationConfig {
        occlusion: OcclusionShape::Square { width: 100 },
        max_iters: 2,
        ..Default::default()
    };
    let output = Coronagraph::new(config).unwrap().simulate(&test_scene(8)).unwrap();

    assert_eq!(output.observation.mask.count(), 64);
    // 전부 가려지면 재구성도 0
    assert!(output.trace.errors().iter().all(|&e| e < 1e-20));
}
