//! 打包服务 - 业务能力层
//!
//! 生成可直接上传的目录（README.md / QUESTIONS.md / images / docx 副本）
//! 以及该目录的 zip 压缩包。每次运行都从空目录开始。

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, FileError};
use crate::infrastructure::{archive, fresh_dir, FreshDir};
use crate::models::{render_markdown, Assessment};

pub const PACKAGE_DIR_NAME: &str = "github_repo";
pub const ARCHIVE_NAME: &str = "github_repo.zip";
pub const IMAGES_DIR_NAME: &str = "images";
pub const README_NAME: &str = "README.md";
pub const QUESTIONS_NAME: &str = "QUESTIONS.md";

pub const README_TEXT: &str = "# Generated Assessment Questions\n\n\
This repository contains two generated quantitative math questions in the requested \
Question Output Format, plus images.\n";

/// 打包结果
#[derive(Debug, Clone)]
pub struct PackageOutput {
    pub repo_dir: PathBuf,
    pub archive_path: PathBuf,
    /// 压缩包条目（相对路径，`/` 分隔）
    pub entries: Vec<String>,
}

/// 打包服务
pub struct PackageAssembler {
    base_dir: PathBuf,
}

impl PackageAssembler {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn repo_dir(&self) -> PathBuf {
        self.base_dir.join(PACKAGE_DIR_NAME)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.base_dir.join(ARCHIVE_NAME)
    }

    /// 生成打包目录和压缩包
    pub async fn assemble(
        &self,
        assessment: &Assessment,
        images: &[&Path],
        document: &Path,
    ) -> AppResult<PackageOutput> {
        let repo = FreshDir::create(self.repo_dir())?;
        let images_dir = repo.subdir(IMAGES_DIR_NAME)?;

        for image in images {
            copy_keep_name(image, &images_dir).await?;
        }

        write_file(&repo.path().join(README_NAME), README_TEXT).await?;
        write_file(
            &repo.path().join(QUESTIONS_NAME),
            &render_markdown(assessment),
        )
        .await?;
        copy_keep_name(document, repo.path()).await?;

        let repo_dir = repo.keep();
        info!("✓ 已生成目录 {}", repo_dir.display());

        let archive_path = self.archive_path();
        fresh_dir::remove_file_if_exists(&archive_path)?;
        let entries = archive::zip_dir(&repo_dir, &archive_path)?;
        info!(
            "✓ 已生成压缩包 {} ({} 个文件)",
            archive_path.display(),
            entries.len()
        );

        Ok(PackageOutput {
            repo_dir,
            archive_path,
            entries,
        })
    }
}

/// 复制文件到目录，保留原文件名
async fn copy_keep_name(src: &Path, dir: &Path) -> AppResult<PathBuf> {
    let name = src.file_name().ok_or_else(|| FileError::MissingFileName {
        path: src.to_path_buf(),
    })?;
    let dest = dir.join(name);
    fs::copy(src, &dest)
        .await
        .map_err(|e| AppError::copy_failed(src, &dest, e))?;
    debug!("复制 {} -> {}", src.display(), dest.display());
    Ok(dest)
}

async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    fs::write(path, content)
        .await
        .map_err(|e| AppError::write_failed(path, e))?;
    debug!("写入 {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::builtin_assessment;

    struct Fixture {
        _tmp: tempfile::TempDir,
        base: PathBuf,
        images: Vec<PathBuf>,
        document: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().to_path_buf();
        let images = vec![base.join("uniform_table.png"), base.join("rect_package_topview_8.png")];
        for image in &images {
            std::fs::write(image, b"png").unwrap();
        }
        let document = base.join("generated_assessment.docx");
        std::fs::write(&document, b"docx").unwrap();
        Fixture {
            _tmp: tmp,
            base,
            images,
            document,
        }
    }

    async fn assemble(f: &Fixture) -> PackageOutput {
        let images: Vec<&Path> = f.images.iter().map(PathBuf::as_path).collect();
        PackageAssembler::new(&f.base)
            .assemble(&builtin_assessment(), &images, &f.document)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_layout_and_archive_entries() {
        let f = fixture();
        let out = assemble(&f).await;

        assert_eq!(out.repo_dir, f.base.join(PACKAGE_DIR_NAME));
        assert_eq!(out.archive_path, f.base.join(ARCHIVE_NAME));
        assert_eq!(
            out.entries,
            vec![
                "QUESTIONS.md",
                "README.md",
                "generated_assessment.docx",
                "images/rect_package_topview_8.png",
                "images/uniform_table.png",
            ]
        );

        let mut listed = archive::list_entries(&out.archive_path).unwrap();
        listed.sort();
        assert_eq!(listed, out.entries);

        let readme = std::fs::read_to_string(out.repo_dir.join(README_NAME)).unwrap();
        assert_eq!(readme, README_TEXT);
        let questions = std::fs::read_to_string(out.repo_dir.join(QUESTIONS_NAME)).unwrap();
        assert_eq!(questions, render_markdown(&builtin_assessment()));
    }

    #[tokio::test]
    async fn test_rerun_removes_stale_files() {
        let f = fixture();
        let first = assemble(&f).await;
        std::fs::write(first.repo_dir.join("stale.txt"), "left over").unwrap();
        std::fs::write(first.repo_dir.join("images/old.png"), "old").unwrap();

        let second = assemble(&f).await;

        assert!(!second.repo_dir.join("stale.txt").exists());
        assert!(!second.repo_dir.join("images/old.png").exists());
        assert_eq!(first.entries, second.entries);
    }

    #[tokio::test]
    async fn test_missing_image_fails_and_leaves_no_partial_dir() {
        let f = fixture();
        std::fs::remove_file(&f.images[1]).unwrap();

        let images: Vec<&Path> = f.images.iter().map(PathBuf::as_path).collect();
        let result = PackageAssembler::new(&f.base)
            .assemble(&builtin_assessment(), &images, &f.document)
            .await;

        assert!(matches!(
            result,
            Err(AppError::File(FileError::CopyFailed { .. }))
        ));
        assert!(!f.base.join(PACKAGE_DIR_NAME).exists());
    }
}
