//! 에러 타입 정의 모듈
//!
//! iclean에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// iclean에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum CleanError {
    /// 입력 경로가 존재하지 않음
    #[error("입력 경로를 찾을 수 없습니다: {path:?}")]
    MissingInput { path: PathBuf },

    /// 지원하지 않는 파일 형식
    #[error("지원하지 않는 파일 형식입니다: {path:?}")]
    UnsupportedType { path: PathBuf },

    /// 출력 폴더 생성 실패
    #[error("출력 폴더를 생성할 수 없습니다 ({path:?}): {reason}")]
    OutputDirError { path: PathBuf, reason: String },

    /// 이미지 디코딩 실패
    #[error("이미지 디코딩 실패 ({file:?}): {reason}")]
    DecodeError { file: PathBuf, reason: String },

    /// 이미지 저장 실패
    #[error("이미지 저장 실패 ({file:?}): {reason}")]
    WriteError { file: PathBuf, reason: String },

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },

    /// 메타데이터 리포트 분석 실패
    #[error("리포트 분석 실패 ({file:?}): {reason}")]
    ReportError { file: PathBuf, reason: String },

    /// 처리할 파일 없음
    #[error("처리할 이미지 파일이 없습니다")]
    NoFilesFound,
}

/// iclean 결과 타입 별칭
pub type Result<T> = std::result::Result<T, CleanError>;
