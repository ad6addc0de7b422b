//! iclean - IMAGE METADATA CLEANER
//!
//! 이미지 파일의 메타데이터(EXIF/IPTC 등)를 제거한 깨끗한 사본을 만드는 CLI 도구입니다.
//! 픽셀 데이터를 디코딩한 뒤 메타데이터 없이 다시 인코딩하며, 원본은 절대 수정하지 않습니다.
//!
//! # 주요 기능
//!
//! - 🧹 **메타데이터 제거**: 재인코딩 방식으로 메타데이터 블록을 원천 차단
//! - 📂 **파일/폴더 혼합 입력**: 여러 경로를 한 번에 처리
//! - 🖼️ **7가지 형식 지원**: jpg, jpeg, png, tiff, tif, bmp, gif
//! - 🎨 **JPEG 알파 평탄화**: 알파 채널이 있는 이미지를 RGB로 자동 변환
//! - 📊 **리포트 모드**: PNG 청크 / JPEG 세그먼트 분석과 예상 절감량 표시
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - 🧪 **드라이런 모드**: 실제 정리 없이 처리될 파일 목록 미리 확인
//! - 📈 **상세 통계**: 성공/실패/건너뜀 수, 입출력 용량, 성공률 표시
//!
//! # 예제
//!
//! ```bash
//! # 기본 사용법
//! iclean --input photo.jpg
//!
//! # 폴더 전체를 별도 출력 폴더로
//! iclean --input ./photos/ --output-dir ./cleaned/
//!
//! # 메타데이터 리포트만
//! iclean --input photo.png --report
//! ```

pub mod cleaner;
pub mod cli;
pub mod error;
pub mod report;
pub mod resolver;
pub mod stats;

// Re-exports for convenient access
pub use cleaner::{clean_image, CleanOptions, CleanResult};
pub use cli::Args;
pub use error::{CleanError, Result};
pub use report::{analyze, MetadataReport, ReportEntry};
pub use resolver::{
    clean_destination, is_supported, resolve, ImageTask, PatternFilter, Resolution,
    ResolveOptions, SkipReason, SUPPORTED_EXTENSIONS,
};
pub use stats::{format_bytes, Statistics};
