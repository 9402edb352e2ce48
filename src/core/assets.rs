//! Downloadable documents (resume, project and skills summaries).
//!
//! Assets are plain files in the configured assets directory. A download
//! copies one into the download directory under a caller-chosen name.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("{kind} is not available (expected {path})")]
    Missing { kind: &'static str, path: PathBuf },

    #[error("failed to save {kind} to {path}: {source}")]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Resume,
    ProjectSummary,
    SkillsSummary,
}

impl AssetKind {
    /// File name inside the assets directory.
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::Resume => "Resume.pdf",
            AssetKind::ProjectSummary => "Project_Summary.pdf",
            AssetKind::SkillsSummary => "Skills_Summary.pdf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AssetKind::Resume => "Resume",
            AssetKind::ProjectSummary => "Project summary",
            AssetKind::SkillsSummary => "Skills summary",
        }
    }
}

/// `Shrinitharshnaa K` → `Shrinitharshnaa_Resume.pdf`
pub fn resume_file_name(full_name: &str) -> String {
    let first = full_name.split_whitespace().next().unwrap_or("Portfolio");
    format!("{first}_Resume.pdf")
}

/// `SOS System in Helmet` → `Project_Summary_SOS_System_in_Helmet.pdf`
pub fn project_summary_file_name(title: &str) -> String {
    let joined = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Project_Summary_{joined}.pdf")
}

#[derive(Debug, Clone)]
pub struct AssetLibrary {
    source_dir: PathBuf,
    download_dir: PathBuf,
}

impl AssetLibrary {
    pub fn new(source_dir: impl Into<PathBuf>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Path of the asset if it exists.
    pub fn locate(&self, kind: AssetKind) -> Result<PathBuf, AssetError> {
        let path = self.source_dir.join(kind.file_name());
        if path.is_file() {
            Ok(path)
        } else {
            Err(AssetError::Missing {
                kind: kind.label(),
                path,
            })
        }
    }

    pub fn is_available(&self, kind: AssetKind) -> bool {
        self.locate(kind).is_ok()
    }

    /// Copy the asset into the download directory as `save_as`.
    pub fn download(&self, kind: AssetKind, save_as: &str) -> Result<PathBuf, AssetError> {
        let source = self.locate(kind)?;
        let target = self.download_dir.join(save_as);
        let io_err = |source| AssetError::Io {
            kind: kind.label(),
            path: target.clone(),
            source,
        };

        std::fs::create_dir_all(&self.download_dir).map_err(io_err)?;
        std::fs::copy(&source, &target).map_err(io_err)?;
        log::info!("Saved {} to {}", kind.label(), target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn library_with(kinds: &[AssetKind]) -> (TempDir, AssetLibrary) {
        let dir = TempDir::new().unwrap();
        let assets = dir.path().join("assets");
        std::fs::create_dir_all(&assets).unwrap();
        for kind in kinds {
            std::fs::write(assets.join(kind.file_name()), b"%PDF-1.4").unwrap();
        }
        let library = AssetLibrary::new(&assets, dir.path().join("downloads"));
        (dir, library)
    }

    #[test]
    fn test_download_copies_file() {
        let (_dir, library) = library_with(&[AssetKind::Resume]);
        let saved = library
            .download(AssetKind::Resume, "Shrinitharshnaa_Resume.pdf")
            .unwrap();
        assert_eq!(saved.file_name().unwrap(), "Shrinitharshnaa_Resume.pdf");
        assert_eq!(std::fs::read(&saved).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_missing_asset() {
        let (_dir, library) = library_with(&[]);
        let err = library
            .download(AssetKind::SkillsSummary, "Skills_Summary.pdf")
            .unwrap_err();
        assert!(matches!(err, AssetError::Missing { kind: "Skills summary", .. }));
        assert!(!library.is_available(AssetKind::SkillsSummary));
    }

    #[test]
    fn test_download_names() {
        assert_eq!(resume_file_name("Shrinitharshnaa K"), "Shrinitharshnaa_Resume.pdf");
        assert_eq!(resume_file_name("   "), "Portfolio_Resume.pdf");
        assert_eq!(
            project_summary_file_name("SOS System in Helmet"),
            "Project_Summary_SOS_System_in_Helmet.pdf"
        );
    }
}
