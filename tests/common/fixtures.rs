// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Synthetic docs tree in a temporary directory
#[allow(dead_code)] // Used in integration tests
pub struct TestRepo {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
}

impl TestRepo {
    /// A small docs site: top-level pages, a section with an index
    /// page, a nested section and a few non-Markdown files
    #[allow(dead_code)] // Used in integration tests
    pub fn docs_site() -> Self {
        Self::with_files(&[
            ("index.md", "# Welcome\n\nStart here."),
            ("quickstart.md", "# Source: https://kinescope.io/quickstart\n# Quickstart\n\nUpload a video."),
            ("player/index.md", "# Player\n\nEmbed the player on your site."),
            ("player/events.md", "# Player events\n\nplay, pause, ended"),
            ("api/v1/videos.md", "# Videos API\n\nGET /v1/videos"),
            ("api/v1/notes.txt", "not a doc"),
            ("assets/logo.svg", "<svg/>"),
        ])
    }

    /// Create with custom files
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();

        for (path, content) in files {
            let full_path = dir.path().join(path);
            std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
            std::fs::write(&full_path, content).unwrap();
            paths.push(full_path);
        }

        Self { dir, files: paths }
    }

    /// Add raw bytes (e.g. invalid UTF-8) at `path`
    #[allow(dead_code)] // Used in integration tests
    pub fn add_bytes(&mut self, path: &str, bytes: &[u8]) {
        let full_path = self.dir.path().join(path);
        std::fs::create_dir_all(full_path.parent().unwrap()).unwrap();
        std::fs::write(&full_path, bytes).unwrap();
        self.files.push(full_path);
    }

    /// Get path to the docs root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// A line-break-free string of `len` bytes
#[allow(dead_code)] // Used in integration tests
pub fn long_line(len: usize) -> String {
    "abcdefghij".chars().cycle().take(len).collect()
}
