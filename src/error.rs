//! # 错误类型模块
//!
//! 编解码核心与图像存储层共用的错误枚举。命令层再用 `anyhow` 为其附加上下文。

use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// 载体像素不足以容纳载荷 (隐藏) 或请求的输出尺寸 (提取)。
    #[error(
        "Cover image is too small: {required} carrier pixels required, {available} available"
    )]
    Capacity { required: u64, available: u64 },

    /// 文本提取走完了整个载体，却没有遇到终止字节。
    #[error("No terminator found before the cover image was exhausted ({recovered} bytes read)")]
    TruncatedPayload { recovered: usize },

    /// 用户选择了无法识别的操作。
    #[error("Invalid choice: '{0}'")]
    InvalidSelection(String),

    /// 提取图像时给出的宽度或高度为零，或像素数量与尺寸不符。
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// 恢复出的字节不是合法的 UTF-8。
    #[error("Invalid text data found in the cover image")]
    InvalidText(#[from] FromUtf8Error),

    /// 输出路径指向有损格式，保存后隐藏的数据会被破坏。
    #[error("'{}' is a lossy format and would destroy the hidden data; use PNG, BMP, TIFF, WebP or QOI", .0.display())]
    LossyFormat(PathBuf),

    /// 图像解码或编码失败。
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// 其余的 `std::io::Error`。
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
