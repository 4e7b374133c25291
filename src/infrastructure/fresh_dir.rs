//! "先清空，再生成" 目录守卫
//!
//! 旧目录在写入任何新内容之前被完整删除；新目录如果没有被 `keep()`，
//! 在守卫销毁时一并删除，避免新旧文件混杂。

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

pub struct FreshDir {
    path: PathBuf,
    armed: bool,
}

impl FreshDir {
    /// 删除 `path`（如果存在）并重新创建空目录
    pub fn create(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        if path.exists() {
            debug!("删除旧目录: {}", path.display());
            std::fs::remove_dir_all(&path).map_err(|e| AppError::delete_failed(&path, e))?;
        }
        std::fs::create_dir_all(&path).map_err(|e| AppError::create_dir_failed(&path, e))?;

        Ok(Self { path, armed: true })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 在目录内创建子目录
    pub fn subdir(&self, name: &str) -> AppResult<PathBuf> {
        let dir = self.path.join(name);
        std::fs::create_dir_all(&dir).map_err(|e| AppError::create_dir_failed(&dir, e))?;
        Ok(dir)
    }

    /// 生成完成，保留目录
    pub fn keep(mut self) -> PathBuf {
        self.armed = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for FreshDir {
    fn drop(&mut self) {
        if self.armed {
            warn!("⚠️ 生成未完成，清理目录: {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!("清理目录失败 {}: {}", self.path.display(), e);
            }
        }
    }
}

/// 删除已存在的文件（不存在时什么都不做）
pub fn remove_file_if_exists(path: &Path) -> AppResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!("删除旧文件: {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::delete_failed(path, e)),
    }
}
