//! iclean - IMAGE METADATA CLEANER
//!
//! 메인 엔트리포인트

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

use iclean::{
    cleaner::{clean_image, CleanOptions},
    cli::Args,
    error::CleanError,
    report,
    resolver::{resolve, ImageTask, PatternFilter, Resolution, ResolveOptions, SkipReason},
    stats::{format_bytes, Statistics},
};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // 헤더 출력
    print_header(&args);

    // 패턴 필터 초기화
    let filter = PatternFilter::new(args.pattern.as_deref())?;

    // 입력 경로를 작업 목록으로 확장
    println!("\n{}", "📁 파일 검색 중...".bright_cyan());
    let options = ResolveOptions::new()
        .with_output_dir(args.output_dir.clone())
        .with_max_depth(args.max_depth)
        .with_filter(filter);
    let resolution = resolve(&args.input, &options);

    print_skips(&resolution);

    // 통계 초기화 및 제외 항목 반영
    let mut stats = Statistics::new(resolution.tasks.len());
    for (_, reason) in &resolution.skipped {
        match reason {
            SkipReason::MissingPath => stats.record_missing(),
            SkipReason::UnsupportedType => stats.record_skipped(),
        }
    }

    if resolution.tasks.is_empty() {
        println!("{}", "⚠️ 처리할 이미지 파일이 없습니다.".yellow());
        return Ok(exit_code(&stats));
    }

    println!(
        "  {} 발견된 파일 수: {}",
        "📋".bright_white(),
        resolution.tasks.len().to_string().bright_green()
    );

    // 드라이런 모드
    if args.dry_run {
        print_dry_run(&resolution.tasks);
        return Ok(exit_code(&stats));
    }

    // 리포트 모드
    if args.report {
        run_report_mode(resolution.tasks, &mut stats);
        return Ok(exit_code(&stats));
    }

    // 출력 폴더 준비 (실패 시 정리 시작 전에 즉시 중단)
    ensure_output_dir(args.output_dir.as_deref())?;

    // 일반 정리 모드
    run_clean_mode(&args, resolution.tasks, &mut stats);
    stats.print_summary();

    Ok(exit_code(&stats))
}

/// 종료 코드 결정
///
/// 디코딩/저장 실패 또는 누락된 입력 경로가 있으면 비정상 종료.
/// 지원하지 않는 형식 건너뜀만 있으면 정상 종료.
fn exit_code(stats: &Statistics) -> ExitCode {
    if stats.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// 헤더 출력
fn print_header(args: &Args) {
    println!("\n{}", "═".repeat(50).bright_blue());
    println!("{}", " 🧹 IMAGE METADATA CLEANER".bright_white().bold());
    println!("{}", "═".repeat(50).bright_blue());

    for input in &args.input {
        println!("  {} 입력 경로: {:?}", "📂".bright_cyan(), input);
    }

    if let Some(ref output_dir) = args.output_dir {
        println!("  {} 출력 폴더: {:?}", "📄".bright_green(), output_dir);
    }

    if let Some(ref pattern) = args.pattern {
        println!("  {} 패턴 필터: {}", "🔍".bright_magenta(), pattern);
    }

    if args.max_depth > 1 {
        println!("  {} 탐색 깊이: {}", "📏".bright_white(), args.max_depth);
    }

    if args.report {
        println!("  {} {}", "📊".bright_cyan(), "리포트 모드 (정리 없음)".cyan());
    }

    if args.dry_run {
        println!(
            "  {} {}",
            "⚠️".bright_yellow(),
            "드라이런 모드 (실제 정리 없음)".yellow()
        );
    }

    println!("{}", "═".repeat(50).bright_blue());
}

/// 제외된 경로 진단 출력
fn print_skips(resolution: &Resolution) {
    for (path, reason) in &resolution.skipped {
        match reason {
            SkipReason::MissingPath => println!(
                "  {} 입력 경로를 찾을 수 없습니다: {:?}",
                "❌".red(),
                path
            ),
            SkipReason::UnsupportedType => println!(
                "  {} 지원하지 않는 파일 형식, 건너뜀: {:?}",
                "⚠️".bright_yellow(),
                path
            ),
        }
    }
}

/// 드라이런 출력
fn print_dry_run(tasks: &[ImageTask]) {
    println!("\n{}", "📋 처리 예정 파일 목록:".bright_cyan());
    for (i, task) in tasks.iter().enumerate() {
        println!(
            "  {}. {:?} -> {:?}",
            i + 1,
            task.source,
            task.destination
        );
    }
    println!(
        "\n{} 총 {} 개의 파일이 처리될 예정입니다.",
        "ℹ️".bright_blue(),
        tasks.len().to_string().bright_green()
    );
}

/// 출력 폴더가 지정되었으면 생성
fn ensure_output_dir(output_dir: Option<&Path>) -> Result<()> {
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| CleanError::OutputDirError {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

/// 리포트 모드 실행
fn run_report_mode(tasks: Vec<ImageTask>, stats: &mut Statistics) {
    println!("\n{}", "📊 메타데이터 분석 중...".bright_cyan());

    for task in tasks {
        match report::analyze(&task.source) {
            Ok(Some(file_report)) => report::print_report(&task.source, &file_report),
            Ok(None) => report::print_unsupported(&task.source),
            Err(e) => {
                stats.record_failed();
                println!("  {} {}", "❌".red(), e.to_string().red());
            }
        }
    }
}

/// 일반 정리 모드 실행
fn run_clean_mode(args: &Args, tasks: Vec<ImageTask>, stats: &mut Statistics) {
    let options = CleanOptions::new().with_jpeg_quality(args.quality);

    println!("\n{}", "🧹 메타데이터 제거 중...".bright_cyan());

    for task in tasks {
        let result = clean_image(&task, &options);

        match &result.error {
            None => {
                stats.record_cleaned(result.bytes_read, result.bytes_written);
                println!(
                    "  {} {:?} -> {:?}",
                    "✅".green(),
                    result.source.file_name().unwrap_or_default(),
                    result.destination.file_name().unwrap_or_default()
                );
                if args.verbose {
                    println!(
                        "     {} -> {}",
                        format_bytes(result.bytes_read).dimmed(),
                        format_bytes(result.bytes_written).dimmed()
                    );
                }
            }
            Some(error) => {
                stats.record_failed();
                println!("  {} {}", "❌".red(), error.red());
            }
        }
    }
}
