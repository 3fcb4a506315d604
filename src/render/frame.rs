//! 진단 프레임 렌더러 (plotters 비트맵 백엔드)
//!
//! 왼쪽: k 단계 재구성 영상, 오른쪽: 0..=k 단계 가림 오차 곡선.
//! 축 범위는 x ∈ [0, N], y ∈ [0, 최대 오차]로 모든 프레임에서 같다.
//! 글꼴은 실행 시점에 TTF 파일을 읽어 ab_glyph에 등록한다. 쓸 수 있는 글꼴이
//! 없으면 제목과 축 이름 없이 그린다 (단계 번호는 파일명에 남는다).

use super::export::{save_grid_png, unit_to_u8};
use crate::core::error::CoronagraphError;
use crate::core::grid::IntensityGrid;
use crate::core::retrieval::{IterationTrace, TraceSummary};
use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::fmt::Debug;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// 등록된 글꼴 이름
const FONT_FAMILY: &str = "sans-serif";

/// `font_path`가 없을 때 차례로 찾아보는 시스템 글꼴
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// 제목과 축 이름을 넣을 최소 패널 크기 (픽셀)
const MIN_LABELLED_PANEL: u32 = 120;

/// 프로세스 전체에서 한 번만 등록 (plotters 글꼴 표는 전역)
static FONT_READY: OnceLock<bool> = OnceLock::new();

/// 프레임 출력 구성
#[derive(Debug, Clone)]
pub struct FrameConfig {
    pub output_dir: PathBuf,
    /// 파일명 접두사 (`<prefix><k>.png`)
    pub prefix: String,
    /// 영상 패널 높이 (픽셀)
    pub panel_height: u32,
    /// 오차 그래프 패널 폭 (픽셀)
    pub plot_width: u32,
    /// 합성 프레임 외에 재구성 영상만 따로 저장
    pub raw_frames: bool,
    /// 제목과 축 이름 표시
    pub labels: bool,
    /// 제목용 TTF 글꼴 (없으면 시스템 글꼴 탐색)
    pub font_path: Option<PathBuf>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./frames"),
            prefix: "coronagraph".to_string(),
            panel_height: 480,
            plot_width: 480,
            raw_frames: false,
            labels: true,
            font_path: None,
        }
    }
}

pub struct FrameRenderer {
    config: FrameConfig,
    draws_text: bool,
}

impl FrameRenderer {
    pub fn new(config: FrameConfig) -> Result<Self> {
        if config.panel_height == 0 || config.plot_width == 0 {
            return Err(CoronagraphError::invalid("frame panel sizes must be positive").into());
        }
        fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("출력 디렉토리 생성 실패: {}", config.output_dir.display()))?;
        let draws_text = config.labels && ensure_font(config.font_path.as_deref());
        Ok(Self { config, draws_text })
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// 프레임에 제목과 축 이름을 그리는지 여부
    pub fn draws_text(&self) -> bool {
        self.draws_text
    }

    pub fn frame_path(&self, iteration: usize) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}{}.png", self.config.prefix, iteration))
    }

    pub fn raw_frame_path(&self, iteration: usize) -> PathBuf {
        self.config
            .output_dir
            .join(format!("{}{}_raw.png", self.config.prefix, iteration))
    }

    /// 모든 단계 프레임 저장 (단계 순서대로)
    pub fn render_trace<F>(&self, trace: &IterationTrace, mut on_frame: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(usize),
    {
        let mut paths = Vec::with_capacity(trace.len());
        for frame in trace {
            paths.push(self.render_frame(trace, frame.iteration)?);
            on_frame(frame.iteration);
        }
        Ok(paths)
    }

    /// k 단계 프레임 저장
    pub fn render_frame(&self, trace: &IterationTrace, iteration: usize) -> Result<PathBuf> {
        let frame = trace.get(iteration).ok_or_else(|| {
            CoronagraphError::invalid(format!(
                "iteration {iteration} is outside the trace (0..={})",
                trace.len().saturating_sub(1)
            ))
        })?;

        let path = self.frame_path(iteration);
        let (grid_h, grid_w) = frame.grid.shape();
        let panel_h = self.config.panel_height;
        let panel_w = ((panel_h as f64 * grid_w as f64 / grid_h as f64).round() as u32).max(1);

        let errors: Vec<f64> = trace.frames()[..=iteration]
            .iter()
            .filter_map(|f| f.error)
            .collect();
        let plot_w = if trace.has_errors() { self.config.plot_width } else { 0 };
        let labelled = self.draws_text && panel_h >= MIN_LABELLED_PANEL;

        {
            let root = BitMapBackend::new(&path, (panel_w + plot_w, panel_h)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (image_area, plot_area) = root.split_horizontally(panel_w);
            draw_grid(&image_area, &frame.grid, panel_w, panel_h)?;

            if plot_w > 0 {
                let y_max = trace.max_error().filter(|m| *m > 0.0).unwrap_or(1.0);
                let labelled = labelled && plot_w >= MIN_LABELLED_PANEL;
                draw_error_curve(&plot_area, &errors, trace.max_iters(), y_max, labelled)?;
            }
            if labelled {
                let title = format!("Iteration {} of {}", iteration, trace.max_iters());
                let size = (panel_h / 20).clamp(10, 24);
                root.draw_text(&title, &(FONT_FAMILY, size as f64).into_font().color(&RED), (6, 6))
                    .map_err(draw_err)?;
            }
            root.present().map_err(draw_err)?;
        }

        if self.config.raw_frames {
            save_grid_png(&frame.grid, &self.raw_frame_path(iteration))?;
        }

        debug!("Iteration {} of {} 프레임 저장: {}", iteration, trace.max_iters(), path.display());
        Ok(path)
    }

    /// 실행 요약을 `trace.json`으로 저장
    pub fn write_summary(&self, summary: &TraceSummary) -> Result<PathBuf> {
        let path = self.config.output_dir.join("trace.json");
        let file = File::create(&path)
            .with_context(|| format!("요약 파일 생성 실패: {}", path.display()))?;
        serde_json::to_writer_pretty(file, summary)
            .with_context(|| format!("요약 파일 쓰기 실패: {}", path.display()))?;
        Ok(path)
    }
}

/// 최근접 이웃 방식으로 패널 크기에 맞춰 그리기
fn draw_grid<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    grid: &IntensityGrid,
    panel_w: u32,
    panel_h: u32,
) -> Result<()> {
    let (grid_h, grid_w) = grid.shape();
    let data = grid.as_array();
    for py in 0..panel_h {
        let row = (py as usize * grid_h / panel_h as usize).min(grid_h - 1);
        for px in 0..panel_w {
            let col = (px as usize * grid_w / panel_w as usize).min(grid_w - 1);
            let level = unit_to_u8(data[[row, col]]);
            area.draw_pixel((px as i32, py as i32), &RGBColor(level, level, level))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_error_curve<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    errors: &[f64],
    max_iters: usize,
    y_max: f64,
    labelled: bool,
) -> Result<()> {
    let x_max = max_iters.max(1) as f64;
    let mut builder = ChartBuilder::on(area);
    builder.margin(20);
    if labelled {
        builder
            .caption("Occultation Error", (FONT_FAMILY, 18.0))
            .x_label_area_size(35)
            .y_label_area_size(55);
    }
    let mut chart = builder
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(draw_err)?;

    if labelled {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("Iteration")
            .y_desc("Error")
            .label_style((FONT_FAMILY, 12.0))
            .draw()
            .map_err(draw_err)?;
    } else {
        chart
            .plotting_area()
            .draw(&Rectangle::new([(0.0, 0.0), (x_max, y_max)], BLACK.stroke_width(1)))
            .map_err(draw_err)?;
    }

    chart
        .draw_series(LineSeries::new(
            errors.iter().enumerate().map(|(k, &e)| (k as f64, e)),
            &BLUE,
        ))
        .map_err(draw_err)?;
    chart
        .draw_series(
            errors
                .iter()
                .enumerate()
                .map(|(k, &e)| Circle::new((k as f64, e), 3, BLUE.filled())),
        )
        .map_err(draw_err)?;
    Ok(())
}

/// 글꼴을 한 번 등록하고 성공 여부를 돌려준다
fn ensure_font(preferred: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = preferred
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for path in candidates {
            let Ok(bytes) = fs::read(&path) else {
                continue;
            };
            // plotters는 'static 글꼴 데이터를 요구하므로 프로세스 수명 동안 유지
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
                Ok(()) => {
                    info!("프레임 글꼴 등록: {}", path.display());
                    return true;
                }
                Err(_) => warn!("글꼴 등록 실패 {}: 유효하지 않은 글꼴", path.display()),
            }
        }
        warn!("사용할 글꼴이 없어 프레임에 제목과 축 이름을 그리지 않습니다");
        false
    })
}

fn draw_err<E: Debug>(err: E) -> anyhow::Error {
    anyhow!("frame drawing failed: {err:?}")
}

/// 저장된 프레임 크기 확인용
pub fn frame_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).with_context(|| format!("프레임 읽기 실패: {}", path.display()))
}
