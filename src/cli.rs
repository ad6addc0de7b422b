//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

/// iclean CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "iclean",
    author = "YourName <your@email.com>",
    version,
    about = "IMAGE METADATA CLEANER - 이미지 파일의 메타데이터(EXIF/IPTC)를 제거하는 CLI 도구",
    long_about = r#"
IMAGE METADATA CLEANER
======================

이미지 파일의 픽셀 데이터를 디코딩한 뒤 메타데이터 없이 다시 인코딩하여
'_clean' 접미사가 붙은 깨끗한 사본을 생성합니다.
원본 파일은 절대 수정하지 않습니다.

특징:
  • 파일/폴더 혼합 입력 지원
  • 지원 형식: jpg, jpeg, png, tiff, tif, bmp, gif
  • JPEG 저장 시 알파 채널 자동 평탄화 (RGB 변환)
  • 메타데이터 리포트 모드 (PNG 청크 / JPEG 세그먼트 분석)
  • 드라이런 모드로 처리 대상 미리 확인
  • 상세한 오류 보고 및 처리 통계

예제:
  iclean --input photo.jpg
  iclean --input image1.png image2.tiff
  iclean --input ./photos/ --output-dir ./cleaned/
  iclean --input ./photos/ --pattern "IMG_*" --dry-run
  iclean --input photo.png --report
"#
)]
pub struct Args {
    /// 정리할 이미지 파일 또는 폴더 경로 (복수 지정 가능)
    #[arg(short, long, num_args = 1.., required = true)]
    pub input: Vec<PathBuf>,

    /// 정리된 이미지를 저장할 폴더 (없으면 원본 옆에 저장)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// 파일 이름 패턴 필터 (glob 형식, 예: "IMG_*", "photo?.jpg")
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 폴더 탐색 깊이 (1이면 하위 폴더 미탐색)
    #[arg(long, default_value_t = 1)]
    pub max_depth: usize,

    /// JPEG 재인코딩 품질 (1-100)
    #[arg(short, long, default_value_t = 95, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// 메타데이터 리포트만 출력 (정리 없음)
    #[arg(long)]
    pub report: bool,

    /// 실제 정리 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,
}
