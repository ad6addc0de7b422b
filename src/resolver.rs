//! 경로 해석 모듈
//!
//! `--input` 인자(파일/폴더 혼합)를 중복 없는 `ImageTask` 목록으로 확장합니다.
//! 출력 파일 경로 계산과 glob 패턴 필터링도 여기서 담당합니다.

use glob::Pattern;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{CleanError, Result};

/// 지원하는 이미지 확장자 (대소문자 무시)
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "tiff", "tif", "bmp", "gif"];

/// 출력 파일 이름에 붙는 접미사
pub const CLEAN_SUFFIX: &str = "_clean";

/// 경로의 확장자가 지원 목록에 있는지 확인
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| ext.eq_ignore_ascii_case(s)))
        .unwrap_or(false)
}

/// 단일 정리 작업 단위
///
/// Resolver가 생성하고 Cleaner가 한 번 소비합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    /// 원본 이미지 경로 (읽기 전용)
    pub source: PathBuf,
    /// 정리된 사본이 저장될 경로
    pub destination: PathBuf,
}

/// 파일이 작업 목록에서 제외된 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 입력 경로가 존재하지 않음
    MissingPath,
    /// 확장자가 지원 목록에 없음
    UnsupportedType,
}

/// 경로 해석 결과
#[derive(Debug, Default)]
pub struct Resolution {
    /// 생성된 작업 목록 (입력 순서 유지, 중복 없음)
    pub tasks: Vec<ImageTask>,
    /// 제외된 경로와 사유
    pub skipped: Vec<(PathBuf, SkipReason)>,
}

impl Resolution {
    /// 존재하지 않는 입력 경로 수
    pub fn missing_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|(_, r)| *r == SkipReason::MissingPath)
            .count()
    }

    /// 지원하지 않는 형식으로 제외된 파일 수
    pub fn unsupported_count(&self) -> usize {
        self.skipped
            .iter()
            .filter(|(_, r)| *r == SkipReason::UnsupportedType)
            .count()
    }
}

/// 컴파일된 파일 이름 필터
///
/// # Examples
/// ```
/// use iclean::resolver::PatternFilter;
///
/// let filter = PatternFilter::new(Some("IMG_*")).unwrap();
/// assert!(filter.matches("IMG_0042.jpg"));
/// assert!(!filter.matches("screenshot.png"));
/// ```
#[derive(Default)]
pub struct PatternFilter {
    pattern: Option<Pattern>,
}

impl PatternFilter {
    /// 새 필터 생성 (None이면 모든 파일 통과)
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let compiled = match pattern {
            Some(p) => Some(Pattern::new(p).map_err(|_| CleanError::InvalidPattern {
                pattern: p.to_string(),
            })?),
            None => None,
        };

        Ok(Self { pattern: compiled })
    }

    /// 파일 이름이 필터를 통과하는지 확인
    pub fn matches(&self, file_name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.matches(file_name),
            None => true,
        }
    }
}

/// 경로 해석 옵션
pub struct ResolveOptions {
    /// 정리된 사본을 저장할 폴더 (None이면 원본 옆)
    pub output_dir: Option<PathBuf>,
    /// 폴더 탐색 깊이 (1이면 하위 폴더 미탐색)
    pub max_depth: usize,
    /// 파일 이름 필터
    pub filter: PatternFilter,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolveOptions {
    /// 기본 옵션 생성 (출력 폴더 없음, 얕은 탐색)
    pub fn new() -> Self {
        Self {
            output_dir: None,
            max_depth: 1,
            filter: PatternFilter::default(),
        }
    }

    /// 출력 폴더 설정
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    /// 탐색 깊이 설정
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 파일 이름 필터 설정
    pub fn with_filter(mut self, filter: PatternFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// 출력 파일 경로 계산
///
/// `{stem}_clean{ext}` 형식으로 이름을 만들고, 출력 폴더가 있으면 그 안에,
/// 없으면 원본과 같은 폴더에 배치합니다. 확장자의 대소문자는 그대로 유지됩니다.
pub fn clean_destination(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    let mut name = source.file_stem().unwrap_or_default().to_os_string();
    name.push(CLEAN_SUFFIX);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }

    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => source
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };

    dir.join(name)
}

/// 입력 경로들을 작업 목록으로 확장
///
/// # Arguments
/// * `inputs` - 명령줄에서 받은 파일/폴더 경로 목록
/// * `options` - 해석 옵션
///
/// # Returns
/// 작업 목록과 제외 목록을 담은 `Resolution`
///
/// 존재하지 않는 경로나 지원하지 않는 파일은 제외 목록에 기록될 뿐,
/// 나머지 입력의 처리를 중단시키지 않습니다.
pub fn resolve(inputs: &[PathBuf], options: &ResolveOptions) -> Resolution {
    let mut resolution = Resolution::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for input in inputs {
        if !input.exists() {
            resolution.skipped.push((input.clone(), SkipReason::MissingPath));
            continue;
        }

        if input.is_dir() {
            collect_from_directory(input, options, &mut seen, &mut resolution);
        } else if is_supported(input) {
            push_task(input.clone(), options, &mut seen, &mut resolution);
        } else {
            resolution
                .skipped
                .push((input.clone(), SkipReason::UnsupportedType));
        }
    }

    resolution
}

/// 폴더 내 이미지 파일 수집
///
/// 파일 이름 순으로 정렬하여 결정적인 순서를 보장합니다.
/// 패턴 필터에 걸리지 않는 파일은 조용히 제외됩니다.
fn collect_from_directory(
    dir: &Path,
    options: &ResolveOptions,
    seen: &mut HashSet<PathBuf>,
    resolution: &mut Resolution,
) {
    let walker = WalkDir::new(dir)
        .max_depth(options.max_depth)
        .sort_by_file_name();

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        if !is_supported(path) {
            resolution
                .skipped
                .push((path.to_path_buf(), SkipReason::UnsupportedType));
            continue;
        }

        let matches = path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|s| options.filter.matches(s))
            .unwrap_or(false);
        if !matches {
            continue;
        }

        push_task(path.to_path_buf(), options, seen, resolution);
    }
}

/// 중복을 걸러내고 작업 추가 (최초 등장이 우선)
fn push_task(
    source: PathBuf,
    options: &ResolveOptions,
    seen: &mut HashSet<PathBuf>,
    resolution: &mut Resolution,
) {
    if !seen.insert(source.clone()) {
        return;
    }

    let destination = clean_destination(&source, options.output_dir.as_deref());
    resolution.tasks.push(ImageTask { source, destination });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"stub").unwrap();
        path
    }

    #[test]
    fn test_is_supported_case_insensitive() {
        assert!(is_supported(Path::new("a.jpg")));
        assert!(is_supported(Path::new("a.JPG")));
        assert!(is_supported(Path::new("a.Png")));
        assert!(is_supported(Path::new("a.tiff")));
        assert!(!is_supported(Path::new("a.txt")));
        assert!(!is_supported(Path::new("a.webp")));
        assert!(!is_supported(Path::new("noext")));
    }

    #[test]
    fn test_clean_destination_beside_source() {
        let dest = clean_destination(Path::new("/photos/photo.jpg"), None);
        assert_eq!(dest, PathBuf::from("/photos/photo_clean.jpg"));
    }

    #[test]
    fn test_clean_destination_preserves_extension_case() {
        let dest = clean_destination(Path::new("/photos/photo.JPG"), None);
        assert_eq!(dest, PathBuf::from("/photos/photo_clean.JPG"));
    }

    #[test]
    fn test_clean_destination_rebased_into_output_dir() {
        let dest = clean_destination(Path::new("/photos/photo.png"), Some(Path::new("/out")));
        assert_eq!(dest, PathBuf::from("/out/photo_clean.png"));
    }

    #[test]
    fn test_clean_destination_bare_file_name() {
        let dest = clean_destination(Path::new("photo.png"), None);
        assert_eq!(dest, PathBuf::from("./photo_clean.png"));
    }

    #[test]
    fn test_resolve_directory_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.png");
        touch(temp_dir.path(), "b.txt");
        touch(temp_dir.path(), "c.gif");

        let resolution = resolve(&[temp_dir.path().to_path_buf()], &ResolveOptions::new());

        assert_eq!(resolution.tasks.len(), 2);
        assert_eq!(resolution.unsupported_count(), 1);
        assert_eq!(resolution.missing_count(), 0);
        // 파일 이름 정렬 순서
        assert!(resolution.tasks[0].source.ends_with("a.png"));
        assert!(resolution.tasks[1].source.ends_with("c.gif"));
    }

    #[test]
    fn test_resolve_missing_path_does_not_abort() {
        let temp_dir = TempDir::new().unwrap();
        let real = touch(temp_dir.path(), "real.jpg");

        let inputs = vec![PathBuf::from("/no/such/file.jpg"), real];
        let resolution = resolve(&inputs, &ResolveOptions::new());

        assert_eq!(resolution.tasks.len(), 1);
        assert_eq!(resolution.missing_count(), 1);
    }

    #[test]
    fn test_resolve_deduplicates_sources() {
        let temp_dir = TempDir::new().unwrap();
        let photo = touch(temp_dir.path(), "photo.jpg");

        let inputs = vec![photo.clone(), photo];
        let resolution = resolve(&inputs, &ResolveOptions::new());

        assert_eq!(resolution.tasks.len(), 1);
    }

    #[test]
    fn test_resolve_unsupported_file_input() {
        let temp_dir = TempDir::new().unwrap();
        let doc = touch(temp_dir.path(), "notes.txt");

        let resolution = resolve(&[doc], &ResolveOptions::new());

        assert!(resolution.tasks.is_empty());
        assert_eq!(resolution.unsupported_count(), 1);
    }

    #[test]
    fn test_resolve_shallow_by_default() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "top.png");
        let sub = temp_dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        touch(&sub, "deep.png");

        let shallow = resolve(&[temp_dir.path().to_path_buf()], &ResolveOptions::new());
        assert_eq!(shallow.tasks.len(), 1);

        let deep = resolve(
            &[temp_dir.path().to_path_buf()],
            &ResolveOptions::new().with_max_depth(2),
        );
        assert_eq!(deep.tasks.len(), 2);
    }

    #[test]
    fn test_resolve_with_pattern_filter() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "IMG_0001.jpg");
        touch(temp_dir.path(), "IMG_0002.jpg");
        touch(temp_dir.path(), "screenshot.jpg");

        let options = ResolveOptions::new()
            .with_filter(PatternFilter::new(Some("IMG_*")).unwrap());
        let resolution = resolve(&[temp_dir.path().to_path_buf()], &options);

        assert_eq!(resolution.tasks.len(), 2);
    }

    #[test]
    fn test_resolve_destination_uses_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let photo = touch(temp_dir.path(), "photo.jpeg");

        let options = ResolveOptions::new().with_output_dir(Some(PathBuf::from("/cleaned")));
        let resolution = resolve(&[photo], &options);

        assert_eq!(
            resolution.tasks[0].destination,
            PathBuf::from("/cleaned/photo_clean.jpeg")
        );
    }

    #[test]
    fn test_pattern_filter_invalid() {
        assert!(PatternFilter::new(Some("[invalid")).is_err());
    }

    #[test]
    fn test_pattern_filter_none_matches_all() {
        let filter = PatternFilter::new(None).unwrap();
        assert!(filter.matches("anything.png"));
    }
}
