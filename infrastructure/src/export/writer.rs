//! Transcript file export
//!
//! Writes the finished (or partial) transcript in both renderings:
//! `<prefix>_prompt.txt` holds the plain dialogue, `<prefix>_history.xml`
//! the markup form.

use colloquy_domain::Transcript;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths produced by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub prompt_path: PathBuf,
    pub markup_path: PathBuf,
}

/// Writes transcript files under a directory with a common prefix.
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    dir: PathBuf,
    prefix: String,
}

impl TranscriptWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write both files, creating the directory if needed.
    pub fn write(&self, transcript: &Transcript) -> io::Result<ExportedFiles> {
        fs::create_dir_all(&self.dir)?;

        let prompt_path = self.dir.join(format!("{}_prompt.txt", self.prefix));
        fs::write(&prompt_path, transcript.to_plain_text())?;

        let markup_path = self.dir.join(format!("{}_history.xml", self.prefix));
        fs::write(&markup_path, transcript.to_markup())?;

        info!(
            "Exported transcript to {} and {}",
            prompt_path.display(),
            markup_path.display()
        );
        Ok(ExportedFiles {
            prompt_path,
            markup_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colloquy_domain::Turn;

    fn transcript() -> Transcript {
        let mut t = Transcript::new();
        t.push(Turn::new("Narrator", "A quiet cafe."));
        t.push(Turn::new("Alice", "Hello."));
        t
    }

    #[test]
    fn test_write_produces_both_renderings() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(dir.path(), "run");
        let files = writer.write(&transcript()).unwrap();

        assert_eq!(files.prompt_path, dir.path().join("run_prompt.txt"));
        assert_eq!(files.markup_path, dir.path().join("run_history.xml"));

        let plain = fs::read_to_string(&files.prompt_path).unwrap();
        assert_eq!(plain, "Narrator: A quiet cafe.\nAlice: Hello.");

        let markup = fs::read_to_string(&files.markup_path).unwrap();
        assert_eq!(
            markup,
            "<sp who=\"#Narrator\"><speaker>Narrator.</speaker><p>A quiet cafe.</p></sp>\n\
             <sp who=\"#Alice\"><speaker>Alice.</speaker><p>Hello.</p></sp>\n"
        );
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("exports").join("tonight");
        let writer = TranscriptWriter::new(&target, "run");
        writer.write(&transcript()).unwrap();
        assert!(target.join("run_prompt.txt").exists());
    }
}
