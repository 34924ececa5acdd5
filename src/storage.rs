//! # 图像存储模块
//!
//! 负责在磁盘上的图像文件与内存中的 `PixelGrid` 之间转换。
//! 只接受无损格式：任何有损的重新压缩都会抹掉最低有效位中的数据。

use crate::constants::LOSSY_EXTENSIONS;
use crate::error::{Result, StegoError};
use crate::pixel::PixelGrid;
use image::ImageFormat;
use std::fs::{self, Permissions};
use std::path::Path;

/// 读取并解码图像文件，统一转换为 RGBA8 后构造像素网格。
pub fn load_grid(path: &Path) -> Result<PixelGrid> {
    let image = image::open(path)?.to_rgba8();
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(PixelGrid::from(&image))
}

/// 按扩展名对应的格式保存像素网格。
///
/// 覆盖已有文件时沿用其权限，新文件在 Unix 上为 0644。
/// 先编码到同一目录下的临时文件，成功后再原子地替换目标路径，
/// 因此保存失败时不会留下被截断的输出文件。
///
/// # Errors
///
/// * 扩展名是有损格式 (`jpg`/`jpeg`) 时返回 `StegoError::LossyFormat`。
/// * 扩展名无法识别或编码失败时返回 `StegoError::Image`。
/// * 无法创建或替换文件时返回 `StegoError::Io`。
pub fn save_grid(grid: &PixelGrid, path: &Path) -> Result<()> {
    if is_lossy(path) {
        return Err(StegoError::LossyFormat(path.to_path_buf()));
    }
    let format = ImageFormat::from_path(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let staging = tempfile::Builder::new()
        .prefix(".lsb_stego")
        .tempfile_in(dir)?;

    grid.to_rgba_image().save_with_format(staging.path(), format)?;
    if let Some(permissions) = output_permissions(path) {
        staging.as_file().set_permissions(permissions)?;
    }
    staging.persist(path).map_err(|e| StegoError::Io(e.error))?;

    log::debug!(
        "saved {} ({}x{})",
        path.display(),
        grid.width(),
        grid.height()
    );
    Ok(())
}

// 临时文件默认只有所有者可读写，保存前换成目标文件应有的权限。
fn output_permissions(path: &Path) -> Option<Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

fn is_lossy(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| LOSSY_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelWord;
    use tempfile::tempdir;

    #[test]
    fn png_round_trip_keeps_every_bit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.png");
        let words = (0..12u32).map(|i| PixelWord(0x8000_0001 ^ (i << 5))).collect();
        let grid = PixelGrid::from_words(4, 3, words).unwrap();

        save_grid(&grid, &path).unwrap();
        assert_eq!(load_grid(&path).unwrap(), grid);
    }

    #[test]
    fn refuses_lossy_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.JPG");
        let result = save_grid(&PixelGrid::new(2, 2), &path);
        assert!(matches!(result, Err(StegoError::LossyFormat(_))));
        assert!(!path.exists());
    }

    #[test]
    fn failed_save_leaves_no_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.unknown");
        assert!(save_grid(&PixelGrid::new(2, 2), &path).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn saved_images_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.png");
        save_grid(&PixelGrid::new(2, 2), &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("grid.png");
        fs::write(&path, b"old").unwrap();
        fs::set_permissions(&path, Permissions::from_mode(0o640)).unwrap();

        save_grid(&PixelGrid::new(2, 2), &path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_eq!(load_grid(&path).unwrap(), PixelGrid::new(2, 2));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(load_grid(&dir.path().join("absent.png")).is_err());
    }
}
