//! Output path resolution.
//!
//! Every source PDF maps to one base text path `Y.txt`. The compressed
//! output and both sidecars hang off that same base by suffix, so the files
//! belonging to one input always sit side by side:
//!
//! ```text
//! Y.txt | Y.txt.gz    extracted text (mutually exclusive)
//! Y.txt.md5           hex digest of the source PDF
//! Y.txt.meta.json     document metadata
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const TEXT_EXTENSION: &str = "txt";
pub const GZIP_SUFFIX: &str = ".gz";
pub const HASH_SUFFIX: &str = ".md5";
pub const META_SUFFIX: &str = ".meta.json";

/// All paths derived from one source file. Recomputed per job, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `Y.txt`, the base every other path is derived from.
    pub text: PathBuf,
}

impl OutputPaths {
    /// Map `source` under `input_root` to its output paths under `output_root`.
    ///
    /// With `preserve_structure` the relative directory layout is mirrored;
    /// otherwise only the file name is kept.
    pub fn resolve(
        source: &Path,
        input_root: &Path,
        output_root: &Path,
        preserve_structure: bool,
    ) -> Self {
        let relative = if preserve_structure {
            source
                .strip_prefix(input_root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| file_name_only(source))
        } else {
            file_name_only(source)
        };

        Self {
            text: output_root.join(relative).with_extension(TEXT_EXTENSION),
        }
    }

    /// `Y.txt.gz` when compressing, `Y.txt` otherwise.
    pub fn output(&self, compress: bool) -> PathBuf {
        if compress {
            with_suffix(&self.text, GZIP_SUFFIX)
        } else {
            self.text.clone()
        }
    }

    pub fn hash_sidecar(&self) -> PathBuf {
        with_suffix(&self.text, HASH_SUFFIX)
    }

    pub fn meta_sidecar(&self) -> PathBuf {
        with_suffix(&self.text, META_SUFFIX)
    }

    /// Create the parent directory of the output. Idempotent.
    pub fn ensure_parent(&self) -> std::io::Result<()> {
        match self.text.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

fn file_name_only(source: &Path) -> PathBuf {
    source
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| source.to_path_buf())
}

/// Append `suffix` to the full file name (`a.txt` + `.gz` → `a.txt.gz`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserve_structure_mirrors_subdirectories() {
        let p = OutputPaths::resolve(
            Path::new("input/a/b/c.pdf"),
            Path::new("input"),
            Path::new("output"),
            true,
        );
        assert_eq!(p.text, PathBuf::from("output/a/b/c.txt"));
    }

    #[test]
    fn flat_mode_keeps_only_file_name() {
        let p = OutputPaths::resolve(
            Path::new("input/a/b/c.pdf"),
            Path::new("input"),
            Path::new("output"),
            false,
        );
        assert_eq!(p.text, PathBuf::from("output/c.txt"));
    }

    #[test]
    fn uppercase_extension_is_replaced() {
        let p = OutputPaths::resolve(
            Path::new("in/SCAN.PDF"),
            Path::new("in"),
            Path::new("out"),
            false,
        );
        assert_eq!(p.text, PathBuf::from("out/SCAN.txt"));
    }

    #[test]
    fn only_last_extension_is_replaced() {
        let p = OutputPaths::resolve(
            Path::new("in/skip.tmp.pdf"),
            Path::new("in"),
            Path::new("out"),
            true,
        );
        assert_eq!(p.text, PathBuf::from("out/skip.tmp.txt"));
    }

    #[test]
    fn sidecars_share_the_text_base() {
        let p = OutputPaths {
            text: PathBuf::from("out/a.txt"),
        };
        assert_eq!(p.output(false), PathBuf::from("out/a.txt"));
        assert_eq!(p.output(true), PathBuf::from("out/a.txt.gz"));
        assert_eq!(p.hash_sidecar(), PathBuf::from("out/a.txt.md5"));
        assert_eq!(p.meta_sidecar(), PathBuf::from("out/a.txt.meta.json"));
    }

    #[test]
    fn ensure_parent_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let p = OutputPaths {
            text: dir.path().join("x/y/z.txt"),
        };
        p.ensure_parent().unwrap();
        p.ensure_parent().unwrap();
        assert!(dir.path().join("x/y").is_dir());
    }
}
