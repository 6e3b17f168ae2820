use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes converted essays into one directory.
#[derive(Debug, Clone)]
pub struct EssayWriter {
    dir: PathBuf,
}

impl EssayWriter {
    /// Creates the directory if it doesn't exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Write `text` to `{dir}/{file_name}`, replacing any previous file.
    /// Returns the path as built from the configured directory, so a
    /// relative directory gives a relative path.
    pub fn write(&self, file_name: &str, text: &str) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = text.len(), "Wrote essay");
        Ok(path)
    }
}

/// Replace the manifest with `contents`.
pub fn write_manifest(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write manifest {}", path.display()))?;
    tracing::info!(path = %path.display(), lines = contents.lines().count(), "Wrote manifest");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_creates_dir_and_overwrites() {
        let temp = tempfile::TempDir::new().unwrap();
        let writer = EssayWriter::new(temp.path().join("output").join("essays")).unwrap();

        let first = writer.write("1_2001_A.md", "first").unwrap();
        let second = writer.write("1_2001_A.md", "second").unwrap();
        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(&second).unwrap(), "second");
    }

    #[test]
    fn test_manifest_replaced_each_time() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("conf").join("essays-list.txt");

        write_manifest(&path, "a.md\nb.md\n").unwrap();
        write_manifest(&path, "c.md\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "c.md\n");
    }
}
