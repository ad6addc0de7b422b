//! 통계 및 유틸리티 모듈
//!
//! 처리 통계 수집 및 포맷팅을 담당합니다.

use colored::Colorize;
use std::time::{Duration, Instant};

/// 실행 전체의 처리 통계
///
/// 작업은 순차 처리되므로 카운터는 단순 정수로 유지합니다.
/// 종료 코드 결정(`has_failures`)의 근거가 됩니다.
#[derive(Debug)]
pub struct Statistics {
    /// 총 작업 수
    pub total_tasks: usize,
    /// 정리 성공 수
    cleaned: usize,
    /// 디코딩/저장 실패 수
    failed: usize,
    /// 지원하지 않는 형식으로 건너뛴 수
    skipped: usize,
    /// 존재하지 않는 입력 경로 수
    missing: usize,
    /// 읽은 총 바이트
    bytes_read: u64,
    /// 쓴 총 바이트
    bytes_written: u64,
    /// 처리 시작 시간
    start_time: Instant,
}

impl Statistics {
    /// 새 통계 인스턴스 생성
    pub fn new(total_tasks: usize) -> Self {
        Self {
            total_tasks,
            cleaned: 0,
            failed: 0,
            skipped: 0,
            missing: 0,
            bytes_read: 0,
            bytes_written: 0,
            start_time: Instant::now(),
        }
    }

    /// 정리 성공 기록
    pub fn record_cleaned(&mut self, bytes_read: u64, bytes_written: u64) {
        self.cleaned += 1;
        self.bytes_read += bytes_read;
        self.bytes_written += bytes_written;
    }

    /// 정리 실패 기록
    pub fn record_failed(&mut self) {
        self.failed += 1;
    }

    /// 지원하지 않는 형식 건너뜀 기록
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// 존재하지 않는 입력 경로 기록
    pub fn record_missing(&mut self) {
        self.missing += 1;
    }

    /// 정리 성공 수 반환
    pub fn cleaned_count(&self) -> usize {
        self.cleaned
    }

    /// 실패 수 반환
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    /// 건너뜀 수 반환
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// 누락 경로 수 반환
    pub fn missing_count(&self) -> usize {
        self.missing
    }

    /// 종료 코드를 0이 아닌 값으로 만들어야 하는지 확인
    ///
    /// 지원하지 않는 형식 건너뜀은 정상 종료로 취급하고,
    /// 디코딩/저장 실패와 누락된 입력 경로만 실패로 계산합니다.
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.missing > 0
    }

    /// 경과 시간 반환
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 처리 통계 요약 출력
    pub fn print_summary(&self) {
        println!("\n{}", "═".repeat(50).bright_blue());
        println!("{}", " 📊 처리 통계".bright_white().bold());
        println!("{}", "═".repeat(50).bright_blue());

        println!("  {} 전체 작업:    {}", "📁".bright_cyan(), self.total_tasks);
        println!(
            "  {} 정리 완료:    {}",
            "✅".bright_green(),
            self.cleaned.to_string().green()
        );

        if self.failed > 0 {
            println!(
                "  {} 실패:         {}",
                "❌".bright_red(),
                self.failed.to_string().red()
            );
        } else {
            println!("  {} 실패:         {}", "✅".bright_green(), "0".green());
        }

        if self.skipped > 0 {
            println!(
                "  {} 건너뜀:       {}",
                "⚠️".bright_yellow(),
                self.skipped.to_string().yellow()
            );
        }

        if self.missing > 0 {
            println!(
                "  {} 누락 경로:    {}",
                "❌".bright_red(),
                self.missing.to_string().red()
            );
        }

        println!(
            "  {} 입력 용량:    {}",
            "📥".bright_yellow(),
            format_bytes(self.bytes_read)
        );
        println!(
            "  {} 출력 용량:    {}",
            "📤".bright_magenta(),
            format_bytes(self.bytes_written)
        );

        if self.total_tasks > 0 {
            let success_rate = (self.cleaned as f64 / self.total_tasks as f64) * 100.0;
            println!("  {} 성공률:       {:.1}%", "📈".bright_white(), success_rate);
        }

        println!(
            "  {} 처리 시간:    {:.2}초",
            "⏱️".bright_cyan(),
            self.elapsed().as_secs_f64()
        );

        println!("{}", "═".repeat(50).bright_blue());
    }
}

/// 바이트를 읽기 쉬운 형식으로 변환
///
/// # Arguments
/// * `bytes` - 바이트 수
///
/// # Returns
/// 형식화된 문자열 (예: "1.25 MB")
///
/// # Examples
/// ```
/// use iclean::stats::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1048576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
