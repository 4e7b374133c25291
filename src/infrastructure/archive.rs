//! zip 压缩 - 基础设施层

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, AppResult, ArchiveError};

/// 把 `root` 下的所有文件写入 `archive_path`
///
/// 条目名相对于 `root`，分隔符统一为 `/`，不包含 `root` 自身的目录名。
/// 条目按路径排序，返回写入的条目名列表。
pub fn zip_dir(root: &Path, archive_path: &Path) -> AppResult<Vec<String>> {
    let file = File::create(archive_path).map_err(|e| AppError::write_failed(archive_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| ArchiveError::WalkFailed {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry_name(root, entry.path());
        debug!("压缩: {}", name);

        zip.start_file(name.as_str(), options)
            .map_err(|e| entry_failed(&name, e))?;
        let bytes = std::fs::read(entry.path()).map_err(|e| AppError::read_failed(entry.path(), e))?;
        zip.write_all(&bytes).map_err(|e| entry_failed(&name, e))?;

        entries.push(name);
    }

    let mut writer = zip.finish().map_err(|source| ArchiveError::FinishFailed {
        path: archive_path.to_path_buf(),
        source,
    })?;
    writer
        .flush()
        .map_err(|e| AppError::write_failed(archive_path, e))?;

    Ok(entries)
}

/// 列出压缩包中的条目名
pub fn list_entries(archive_path: &Path) -> AppResult<Vec<String>> {
    let file = File::open(archive_path).map_err(|e| AppError::read_failed(archive_path, e))?;
    let archive = zip::ZipArchive::new(file).map_err(|e| entry_failed("<central directory>", e))?;
    Ok(archive.file_names().map(str::to_string).collect())
}

fn entry_name(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn entry_failed(entry: &str, source: impl std::error::Error + Send + Sync + 'static) -> AppError {
    ArchiveError::EntryFailed {
        entry: entry.to_string(),
        source: Box::new(source),
    }
    .into()
}
