//! 이미지 정리 모듈
//!
//! 개별 이미지의 디코딩과 메타데이터 없는 재인코딩을 담당합니다.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{CleanError, Result};
use crate::resolver::ImageTask;

/// 이미지 정리 옵션
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// JPEG 재인코딩 품질 (1-100)
    pub jpeg_quality: u8,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CleanOptions {
    /// 기본 옵션 생성
    pub fn new() -> Self {
        Self { jpeg_quality: 95 }
    }

    /// JPEG 품질 설정
    pub fn with_jpeg_quality(mut self, jpeg_quality: u8) -> Self {
        self.jpeg_quality = jpeg_quality;
        self
    }
}

/// 단일 작업 처리 결과
#[derive(Debug)]
pub struct CleanResult {
    /// 원본 경로
    pub source: PathBuf,
    /// 출력 경로
    pub destination: PathBuf,
    /// 에러 메시지 (실패 시)
    pub error: Option<String>,
    /// 원본 파일 크기
    pub bytes_read: u64,
    /// 출력 파일 크기
    pub bytes_written: u64,
}

impl CleanResult {
    /// 성공 결과 생성
    pub fn success(task: &ImageTask, bytes_read: u64, bytes_written: u64) -> Self {
        Self {
            source: task.source.clone(),
            destination: task.destination.clone(),
            error: None,
            bytes_read,
            bytes_written,
        }
    }

    /// 실패 결과 생성
    pub fn failure(task: &ImageTask, error: String, bytes_read: u64) -> Self {
        Self {
            source: task.source.clone(),
            destination: task.destination.clone(),
            error: Some(error),
            bytes_read,
            bytes_written: 0,
        }
    }

    /// 정리 성공 여부
    pub fn is_cleaned(&self) -> bool {
        self.error.is_none()
    }
}

/// 경로의 확장자가 JPEG 계열인지 확인
fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false)
}

/// 단일 이미지 정리
///
/// 원본을 디코딩하여 픽셀 데이터만 얻고, 메타데이터 없이 출력 경로에
/// 다시 인코딩합니다. 원본은 읽기만 하며 절대 수정하지 않습니다.
/// 출력 경로에 파일이 이미 있으면 덮어씁니다.
///
/// # Arguments
/// * `task` - 처리할 작업 (원본/출력 경로)
/// * `options` - 정리 옵션
///
/// # Returns
/// 처리 결과를 담은 `CleanResult`. 디코딩/저장 실패는 결과에 기록될 뿐
/// 호출자에게 전파되지 않습니다.
pub fn clean_image(task: &ImageTask, options: &CleanOptions) -> CleanResult {
    let bytes_read = fs::metadata(&task.source).map(|m| m.len()).unwrap_or(0);

    match clean_image_internal(task, options) {
        Ok(bytes_written) => CleanResult::success(task, bytes_read, bytes_written),
        Err(e) => CleanResult::failure(task, e.to_string(), bytes_read),
    }
}

/// 내부 정리 로직
fn clean_image_internal(task: &ImageTask, options: &CleanOptions) -> Result<u64> {
    let img = image::open(&task.source).map_err(|e| CleanError::DecodeError {
        file: task.source.clone(),
        reason: e.to_string(),
    })?;

    if is_jpeg_path(&task.destination) {
        save_jpeg(&img, &task.destination, options.jpeg_quality)?;
    } else {
        // 확장자에 따른 포맷으로 저장. 디코딩된 픽셀 버퍼에는
        // 메타데이터가 없으므로 출력 파일도 메타데이터 없이 생성됨
        img.save(&task.destination)
            .map_err(|e| CleanError::WriteError {
                file: task.destination.clone(),
                reason: e.to_string(),
            })?;
    }

    Ok(fs::metadata(&task.destination).map(|m| m.len()).unwrap_or(0))
}

/// JPEG 저장
///
/// JPEG는 알파 채널을 지원하지 않으므로 RGB로 평탄화한 뒤 인코딩합니다.
fn save_jpeg(img: &DynamicImage, destination: &Path, quality: u8) -> Result<()> {
    let write_error = |reason: String| CleanError::WriteError {
        file: destination.to_path_buf(),
        reason,
    };

    let rgb = img.to_rgb8();

    let file = File::create(destination).map_err(|e| write_error(e.to_string()))?;
    let mut writer = BufWriter::new(file);

    let encoder = JpegEncoder::new_with_quality(&mut writer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| write_error(e.to_string()))?;

    writer.flush().map_err(|e| write_error(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn rgba_fixture(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(8, 8, Rgba([200, 100, 50, 128]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_clean_png_keeps_dimensions() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("photo.png");
        RgbImage::from_pixel(16, 9, Rgb([10, 20, 30]))
            .save(&source)
            .unwrap();

        let task = ImageTask {
            source: source.clone(),
            destination: temp_dir.path().join("photo_clean.png"),
        };
        let result = clean_image(&task, &CleanOptions::new());

        assert!(result.is_cleaned());
        let cleaned = image::open(&task.destination).unwrap();
        assert_eq!(cleaned.width(), 16);
        assert_eq!(cleaned.height(), 9);
    }

    #[test]
    fn test_alpha_flattened_for_jpeg_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = rgba_fixture(temp_dir.path(), "overlay.png");

        let task = ImageTask {
            source,
            destination: temp_dir.path().join("overlay_clean.jpg"),
        };
        let result = clean_image(&task, &CleanOptions::new());

        assert!(result.is_cleaned());
        let cleaned = image::open(&task.destination).unwrap();
        assert!(!cleaned.color().has_alpha());
    }

    #[test]
    fn test_alpha_preserved_for_png_destination() {
        let temp_dir = TempDir::new().unwrap();
        let source = rgba_fixture(temp_dir.path(), "overlay.png");

        let task = ImageTask {
            source,
            destination: temp_dir.path().join("overlay_clean.png"),
        };
        let result = clean_image(&task, &CleanOptions::new());

        assert!(result.is_cleaned());
        let cleaned = image::open(&task.destination).unwrap();
        assert!(cleaned.color().has_alpha());
    }

    #[test]
    fn test_source_bytes_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let source = rgba_fixture(temp_dir.path(), "keep.png");
        let before = fs::read(&source).unwrap();

        let task = ImageTask {
            source: source.clone(),
            destination: temp_dir.path().join("keep_clean.png"),
        };
        clean_image(&task, &CleanOptions::new());

        assert_eq!(fs::read(&source).unwrap(), before);
    }

    #[test]
    fn test_decode_failure_is_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("fake.jpg");
        fs::write(&source, b"this is not an image").unwrap();

        let task = ImageTask {
            source,
            destination: temp_dir.path().join("fake_clean.jpg"),
        };
        let result = clean_image(&task, &CleanOptions::new());

        assert!(!result.is_cleaned());
        assert!(result.error.is_some());
        assert!(!task.destination.exists());
    }

    #[test]
    fn test_existing_destination_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("photo.png");
        RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])).save(&source).unwrap();

        let task = ImageTask {
            source,
            destination: temp_dir.path().join("photo_clean.png"),
        };
        fs::write(&task.destination, b"stale").unwrap();

        let result = clean_image(&task, &CleanOptions::new());

        assert!(result.is_cleaned());
        let cleaned = image::open(&task.destination).unwrap();
        assert_eq!(cleaned.width(), 4);
    }

    #[test]
    fn test_clean_options_builder() {
        let options = CleanOptions::new().with_jpeg_quality(80);
        assert_eq!(options.jpeg_quality, 80);
    }
}
