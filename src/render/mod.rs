//! 진단 프레임 렌더링/내보내기 (계산 코어와 분리된 출력 계층)

pub mod export;
pub mod frame;


// 재수출
pub use export::{grid_to_rgb_image, save_grid_png};
pub use frame::{frame_dimensions, FrameConfig, FrameRenderer};
