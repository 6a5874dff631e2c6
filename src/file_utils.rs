use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

// @module: File and path utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Output path for a translated document
    // @params: input_file, target_language
    //
    // `dir/report.json` with target `es` becomes `dir/report_es.json`. The
    // language suffix guarantees the result never collides with the input.
    pub fn derive_output_path<P: AsRef<Path>>(input_file: P, target_language: &str) -> PathBuf {
        let input_file = input_file.as_ref();

        let stem = input_file.file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('_');
        output_filename.push_str(target_language);

        if let Some(ext) = input_file.extension() {
            output_filename.push('.');
            output_filename.push_str(&ext.to_string_lossy());
        }

        match input_file.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        }
    }

    // @generates: Human-readable document title from a file name
    //
    // `annual_report-2024.json` becomes "Annual Report 2024". Used when the
    // source document carries no title metadata.
    pub fn title_from_path<P: AsRef<Path>>(path: P) -> String {
        let stem = path.as_ref().file_stem().unwrap_or_default();
        stem.to_string_lossy()
            .split(['_', '-', ' '])
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes to a file atomically.
    ///
    /// The content lands in a temp file in the destination directory first
    /// and is renamed into place, so a failure mid-write cannot leave a
    /// truncated file at `path`.
    pub fn write_bytes_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
        let path = path.as_ref();
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(dir) = dir {
            Self::ensure_dir(dir)?;
        }

        let mut tmp = match dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .with_context(|| format!("Failed to create temp file next to {:?}", path))?;

        tmp.write_all(content)
            .with_context(|| format!("Failed to write buffered output for {:?}", path))?;

        tmp.persist(path)
            .with_context(|| format!("Failed to move output into place at {:?}", path))?;

        Ok(())
    }
}
