//! Configuration types for batch PDF-to-text conversion.
//!
//! All run behaviour is controlled through [`BatchConfig`], built via
//! [`BatchConfig::builder`]. The builder compiles ignore patterns up front,
//! so an invalid glob is a fatal configuration error rather than a per-file
//! surprise halfway through a run.

use crate::error::Pdf2TxtError;
use crate::pipeline::extract::{LopdfBackend, PdfBackend};
use crate::pipeline::hook::ShellHook;
use crate::pipeline::ignore::IgnoreMatcher;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration for one batch run over an input tree.
///
/// # Example
/// ```rust
/// use edgequake_pdf2txt::BatchConfig;
///
/// let config = BatchConfig::builder("papers", "text")
///     .preserve_structure(true)
///     .compress(true)
///     .ignore_patterns(["*.tmp.pdf"])
///     .build()
///     .unwrap();
/// assert!(config.compress);
/// ```
#[derive(Clone)]
pub struct BatchConfig {
    /// Root scanned recursively for `*.pdf` (case-insensitive).
    pub input_dir: PathBuf,

    /// Root under which text files and sidecars are written.
    pub output_dir: PathBuf,

    /// Mirror the input subdirectory layout. Default: false.
    ///
    /// When off, every output lands directly in `output_dir`; two sources
    /// with the same file name then race for one output path and the last
    /// writer wins.
    pub preserve_structure: bool,

    /// Write `Y.txt.gz` instead of `Y.txt`. Default: false.
    pub compress: bool,

    /// Also write `Y.txt.meta.json`. Default: false.
    pub extract_metadata: bool,

    /// Skip sources whose digest matches `Y.txt.md5`. Default: false.
    pub hash_check: bool,

    /// Compiled `--ignore` globs.
    pub ignore: IgnoreMatcher,

    /// Post-hook run after each successful write.
    pub shell_command: Option<ShellHook>,

    /// Count files only; dispatch nothing. Default: false.
    pub dry_run: bool,

    /// Worker pool size. Default: host available parallelism.
    pub concurrency: usize,

    /// PDF library used for text and metadata. Default: [`LopdfBackend`].
    pub backend: Arc<dyn PdfBackend>,

    /// Optional per-file progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchConfig")
            .field("input_dir", &self.input_dir)
            .field("output_dir", &self.output_dir)
            .field("preserve_structure", &self.preserve_structure)
            .field("compress", &self.compress)
            .field("extract_metadata", &self.extract_metadata)
            .field("hash_check", &self.hash_check)
            .field("ignore", &self.ignore)
            .field("shell_command", &self.shell_command)
            .field("dry_run", &self.dry_run)
            .field("concurrency", &self.concurrency)
            .field("backend", &self.backend.name())
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl BatchConfig {
    /// Create a new builder for `BatchConfig`.
    pub fn builder(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> BatchConfigBuilder {
        BatchConfigBuilder {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            preserve_structure: false,
            compress: false,
            extract_metadata: false,
            hash_check: false,
            ignore_patterns: Vec::new(),
            shell_command: None,
            dry_run: false,
            concurrency: default_concurrency(),
            backend: Arc::new(LopdfBackend),
            progress_callback: None,
        }
    }
}

/// Host parallelism, falling back to 1 when it cannot be queried.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Builder for [`BatchConfig`].
pub struct BatchConfigBuilder {
    input_dir: PathBuf,
    output_dir: PathBuf,
    preserve_structure: bool,
    compress: bool,
    extract_metadata: bool,
    hash_check: bool,
    ignore_patterns: Vec<String>,
    shell_command: Option<String>,
    dry_run: bool,
    concurrency: usize,
    backend: Arc<dyn PdfBackend>,
    progress_callback: Option<ProgressCallback>,
}

impl BatchConfigBuilder {
    pub fn preserve_structure(mut self, v: bool) -> Self {
        self.preserve_structure = v;
        self
    }

    pub fn compress(mut self, v: bool) -> Self {
        self.compress = v;
        self
    }

    pub fn extract_metadata(mut self, v: bool) -> Self {
        self.extract_metadata = v;
        self
    }

    pub fn hash_check(mut self, v: bool) -> Self {
        self.hash_check = v;
        self
    }

    pub fn ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Command template; every `{}` is replaced with the output path.
    pub fn shell_command(mut self, template: impl Into<String>) -> Self {
        self.shell_command = Some(template.into());
        self
    }

    pub fn dry_run(mut self, v: bool) -> Self {
        self.dry_run = v;
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    pub fn backend(mut self, backend: Arc<dyn PdfBackend>) -> Self {
        self.backend = backend;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<BatchConfig, Pdf2TxtError> {
        if self.concurrency == 0 {
            return Err(Pdf2TxtError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        if self.shell_command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(Pdf2TxtError::InvalidConfig(
                "Shell command template is empty".into(),
            ));
        }

        Ok(BatchConfig {
            ignore: IgnoreMatcher::new(&self.ignore_patterns)?,
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            preserve_structure: self.preserve_structure,
            compress: self.compress,
            extract_metadata: self.extract_metadata,
            hash_check: self.hash_check,
            shell_command: self.shell_command.map(ShellHook::new),
            dry_run: self.dry_run,
            concurrency: self.concurrency,
            backend: self.backend,
            progress_callback: self.progress_callback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_off() {
        let c = BatchConfig::builder("in", "out").build().unwrap();
        assert!(!c.preserve_structure && !c.compress && !c.extract_metadata);
        assert!(!c.hash_check && !c.dry_run);
        assert!(c.ignore.is_empty());
        assert!(c.shell_command.is_none());
        assert!(c.concurrency >= 1);
        assert_eq!(c.backend.name(), "lopdf");
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let err = BatchConfig::builder("in", "out").concurrency(0).build().unwrap_err();
        assert!(matches!(err, Pdf2TxtError::InvalidConfig(_)));
    }

    #[test]
    fn bad_glob_is_rejected() {
        let err = BatchConfig::builder("in", "out")
            .ignore_patterns(["ok/*", "[bad"])
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2TxtError::InvalidPattern { ref pattern, .. } if pattern == "[bad"));
    }

    #[test]
    fn blank_shell_command_is_rejected() {
        let err = BatchConfig::builder("in", "out")
            .shell_command("   ")
            .build()
            .unwrap_err();
        assert!(matches!(err, Pdf2TxtError::InvalidConfig(_)));
    }

    #[test]
    fn debug_does_not_require_debug_backend() {
        let c = BatchConfig::builder("in", "out").shell_command("echo {}").build().unwrap();
        let dbg = format!("{c:?}");
        assert!(dbg.contains("lopdf"));
        assert!(dbg.contains("echo {}"));
    }
}
