use anyhow::{anyhow, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use coronagraph::core::normalizer::load_intensity_grid;
use coronagraph::{Coronagraph, FrameConfig, FrameRenderer, OcclusionShape, SimulationConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    let matches = build_cli().get_matches();
    if let Err(e) = run(&matches) {
        eprintln!("❌ 오류: {:#}", e);
        process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("coronagraph")
        .version("0.1.0")
        .about("코로나그래프 가림 + 게르히베르크-색스턴 위상 복원 시뮬레이터")
        .arg(
            Arg::new("image")
                .required(true)
                .help("입력 래스터 이미지 경로 (PNG/JPEG)")
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("JSON 설정 파일 (명령행 옵션이 우선)")
        )
        .arg(
            Arg::new("iters")
                .long("iters")
                .short('n')
                .value_name("COUNT")
                .value_parser(value_parser!(usize))
                .help("위상 복원 반복 횟수 (기본 10)")
        )
        .arg(
            Arg::new("diameter")
                .long("diameter")
                .short('d')
                .value_name("PIXELS")
                .value_parser(value_parser!(usize))
                .conflicts_with("square")
                .help("원형 가림 지름 (기본 300)")
        )
        .arg(
            Arg::new("square")
                .long("square")
                .short('s')
                .value_name("PIXELS")
                .value_parser(value_parser!(usize))
                .help("사각형 가림 한 변 길이")
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .help("위상 수차 난수 시드 (기본 12345)")
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("단계별 재구성을 병렬로 수행")
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("DIR")
                .default_value("./frames")
                .help("프레임 출력 디렉토리")
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .value_name("NAME")
                .default_value("coronagraph")
                .help("프레임 파일명 접두사")
        )
        .arg(
            Arg::new("raw-frames")
                .long("raw-frames")
                .action(ArgAction::SetTrue)
                .help("재구성 영상만 담은 PNG도 함께 저장")
        )
        .arg(
            Arg::new("font")
                .long("font")
                .value_name("TTF")
                .help("프레임 제목용 TTF 글꼴 (기본: 시스템 글꼴 탐색)")
        )
        .arg(
            Arg::new("no-labels")
                .long("no-labels")
                .action(ArgAction::SetTrue)
                .help("프레임에 제목과 축 이름을 그리지 않음")
        )
        .arg(
            Arg::new("no-frames")
                .long("no-frames")
                .action(ArgAction::SetTrue)
                .help("프레임 저장 없이 오차만 출력")
        )
}

/// 설정 파일 → 명령행 옵션 순으로 덮어쓰기
fn resolve_config(matches: &ArgMatches) -> Result<SimulationConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SimulationConfig::from_json_file(&PathBuf::from(path))?,
        None => SimulationConfig::default(),
    };

    if let Some(&iters) = matches.get_one::<usize>("iters") {
        config.max_iters = iters;
    }
    if let Some(&diameter) = matches.get_one::<usize>("diameter") {
        config.occlusion = OcclusionShape::Circle { diameter };
    }
    if let Some(&width) = matches.get_one::<usize>("square") {
        config.occlusion = OcclusionShape::Square { width };
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.seed = seed;
    }
    if matches.get_flag("parallel") {
        config.parallel = true;
    }

    config.validate()?;
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(matches)?;
    let image_path = matches
        .get_one::<String>("image")
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("입력 이미지 경로가 필요합니다"))?;

    println!("🔭 코로나그래프 시뮬레이션 시작:");
    println!("   입력: {}", image_path.display());
    println!("   가림: {}", config.occlusion);
    println!("   반복: {}회 (시드 {})", config.max_iters, config.seed);

    let image = load_intensity_grid(&image_path)?;
    println!("   영상 크기: {}x{}", image.width(), image.height());

    let pb = ProgressBar::new((config.max_iters + 1) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} 단계 위상 복원 중 {msg}")?
    );

    let mut coronagraph = Coronagraph::new(config.clone())?;
    let output = coronagraph.simulate_with(&image, |frame| {
        if let Some(error) = frame.error {
            pb.set_message(format!("(오차 {:.4})", error));
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("완료");

    println!("\n📉 가림 오차:");
    for frame in &output.trace {
        if let Some(error) = frame.error {
            println!("   Iteration {:>3} of {}: {:.6}", frame.iteration, config.max_iters, error);
        }
    }
    println!("   소요 시간: {:.1}ms", output.elapsed_ms);

    if matches.get_flag("no-frames") {
        return Ok(());
    }

    let output_dir = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./frames"));
    let prefix = matches
        .get_one::<String>("prefix")
        .cloned()
        .unwrap_or_else(|| "coronagraph".to_string());

    let renderer = FrameRenderer::new(FrameConfig {
        output_dir,
        prefix,
        raw_frames: matches.get_flag("raw-frames"),
        labels: !matches.get_flag("no-labels"),
        font_path: matches.get_one::<String>("font").map(PathBuf::from),
        ..Default::default()
    })?;

    let frame_pb = ProgressBar::new(output.trace.len() as u64);
    frame_pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} 프레임 저장 중")?
    );
    let paths = renderer.render_trace(&output.trace, |_| frame_pb.inc(1))?;
    frame_pb.finish();

    let summary_path = renderer.write_summary(&output.summary(&config))?;

    println!("\n✅ 프레임 {}개 저장: {}", paths.len(), renderer.config().output_dir.display());
    println!("   요약: {}", summary_path.display());
    Ok(())
}
