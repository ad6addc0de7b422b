//! 메타데이터 리포트 모듈
//!
//! 실제 정리 없이 파일 안의 메타데이터 블록을 분석합니다.
//! PNG는 청크 단위, JPEG는 마커 세그먼트 단위로 보존/제거 분류와
//! 예상 절감량을 계산합니다. EXIF 태그 내용 자체는 해석하지 않습니다.

use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::error::{CleanError, Result};
use crate::stats::format_bytes;

/// PNG 파일 시그니처
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// 정리 후에도 남는 PNG 필수 청크
const PNG_ESSENTIAL_CHUNKS: [&str; 3] = ["IHDR", "IDAT", "IEND"];

/// 리포트 항목 하나 (청크 또는 세그먼트)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// 청크/세그먼트 이름 (예: "tEXt", "APP1")
    pub label: String,
    /// 데이터 길이 (바이트)
    pub length: u64,
    /// 정리 후에도 보존되는지 여부
    pub kept: bool,
}

/// 단일 파일의 메타데이터 분석 결과
#[derive(Debug, Default)]
pub struct MetadataReport {
    /// 파일 전체 크기
    pub file_size: u64,
    /// 발견된 항목 목록 (파일 내 순서)
    pub entries: Vec<ReportEntry>,
}

impl MetadataReport {
    /// 정리 시 제거될 것으로 예상되는 바이트 수
    pub fn removable_bytes(&self) -> u64 {
        self.entries
            .iter()
            .filter(|e| !e.kept)
            .map(|e| e.length)
            .sum()
    }
}

/// 파일 형식에 맞는 메타데이터 분석 수행
///
/// # Returns
/// * `Ok(Some(report))` - PNG/JPEG 분석 결과
/// * `Ok(None)` - 리포트를 지원하지 않는 형식 (gif, bmp, tiff 등)
/// * `Err` - 파일을 읽을 수 없거나 구조가 손상됨
pub fn analyze(path: &Path) -> Result<Option<MetadataReport>> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let report_error = |reason: String| CleanError::ReportError {
        file: path.to_path_buf(),
        reason,
    };

    match extension.as_str() {
        "png" => {
            let data = fs::read(path).map_err(|e| report_error(e.to_string()))?;
            analyze_png(path, &data).map(Some)
        }
        "jpg" | "jpeg" => {
            let data = fs::read(path).map_err(|e| report_error(e.to_string()))?;
            analyze_jpeg(path, &data).map(Some)
        }
        _ => Ok(None),
    }
}

/// PNG 청크 목록 분석
///
/// 시그니처 이후 (length, type, data, crc) 단위로 순회합니다.
/// IHDR/IDAT/IEND 외의 청크는 모두 제거 대상으로 분류합니다.
fn analyze_png(path: &Path, data: &[u8]) -> Result<MetadataReport> {
    if data.len() < PNG_SIGNATURE.len() || data[..PNG_SIGNATURE.len()] != PNG_SIGNATURE {
        return Err(CleanError::ReportError {
            file: path.to_path_buf(),
            reason: "PNG 시그니처가 올바르지 않습니다".to_string(),
        });
    }

    let mut report = MetadataReport {
        file_size: data.len() as u64,
        ..Default::default()
    };

    let mut i = PNG_SIGNATURE.len();
    while i + 8 <= data.len() {
        let length = u32::from_be_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]) as usize;
        let label = String::from_utf8_lossy(&data[i + 4..i + 8]).into_owned();
        let kept = PNG_ESSENTIAL_CHUNKS.contains(&label.as_str());

        report.entries.push(ReportEntry {
            label: label.clone(),
            length: length as u64,
            kept,
        });

        if label == "IEND" {
            break;
        }
        // len(4) + type(4) + data + crc(4)
        i += 12 + length;
    }

    Ok(report)
}

/// JPEG 마커 세그먼트 분석
///
/// SOI부터 SOS 직전까지의 세그먼트를 순회합니다. APP1~APP15와 COM은
/// 메타데이터 세그먼트로 보고 제거 대상으로 분류하며, 구조 세그먼트
/// (APP0/JFIF, DQT, DHT, SOF 등)는 보존으로 분류합니다.
fn analyze_jpeg(path: &Path, data: &[u8]) -> Result<MetadataReport> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != 0xD8 {
        return Err(CleanError::ReportError {
            file: path.to_path_buf(),
            reason: "JPEG 시그니처(SOI)가 올바르지 않습니다".to_string(),
        });
    }

    let mut report = MetadataReport {
        file_size: data.len() as u64,
        ..Default::default()
    };

    let mut i = 2;
    while i + 4 <= data.len() {
        if data[i] != 0xFF {
            break;
        }
        let marker = data[i + 1];

        // 패딩 바이트
        if marker == 0xFF {
            i += 1;
            continue;
        }

        // SOS 이후는 압축 데이터
        if marker == 0xDA {
            break;
        }

        // 길이 없는 마커 (TEM, RSTn)
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }

        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        report.entries.push(ReportEntry {
            label: marker_label(marker),
            length: length as u64,
            kept: !is_metadata_marker(marker),
        });

        // marker(2) + length 필드 (자기 자신 포함)
        i += 2 + length;
    }

    Ok(report)
}

/// 제거 대상 메타데이터 마커인지 확인 (APP1~APP15, COM)
fn is_metadata_marker(marker: u8) -> bool {
    (0xE1..=0xEF).contains(&marker) || marker == 0xFE
}

/// 마커 바이트를 사람이 읽을 수 있는 이름으로 변환
fn marker_label(marker: u8) -> String {
    match marker {
        0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF => {
            format!("SOF{}", marker - 0xC0)
        }
        0xC4 => "DHT".to_string(),
        0xDB => "DQT".to_string(),
        0xDD => "DRI".to_string(),
        0xE0..=0xEF => format!("APP{}", marker - 0xE0),
        0xFE => "COM".to_string(),
        _ => format!("0xFF{:02X}", marker),
    }
}

/// 단일 파일의 리포트를 콘솔에 출력
pub fn print_report(path: &Path, report: &MetadataReport) {
    println!(
        "\n{} {:?} ({})",
        "📊 리포트:".bright_white().bold(),
        path.file_name().unwrap_or_default(),
        format_bytes(report.file_size)
    );

    for entry in &report.entries {
        if entry.kept {
            println!(
                "  {} {} ({}, 보존)",
                "✅".green(),
                entry.label,
                format_bytes(entry.length)
            );
        } else {
            println!(
                "  {} {} ({}, 제거 대상)",
                "❌".red(),
                entry.label.red(),
                format_bytes(entry.length)
            );
        }
    }

    println!(
        "  {} 정리 시 예상 절감량: {}",
        "💾".bright_cyan(),
        format_bytes(report.removable_bytes()).bright_green()
    );
}

/// 리포트를 지원하지 않는 형식 안내 출력
pub fn print_unsupported(path: &Path) {
    println!(
        "  {} {:?}: 리포트를 지원하지 않는 형식입니다",
        "ℹ️".bright_blue(),
        path.file_name().unwrap_or_default()
    );
}
