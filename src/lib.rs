//! # lsb_stego 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：把秘密图像或文本逐位写入载体图像像素的最低有效位，
//! 以及按相同的行优先顺序把它们读回来。
//!
//! 载体中不写入任何头部，提取时必须已知载荷类型与秘密图像尺寸。
//! 结果只能保存为无损格式 (PNG, BMP, TIFF 等)，有损压缩会抹掉隐藏的数据。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod handler;
pub mod interactive;
pub mod pixel;
pub mod steganography;
pub mod storage;

pub use error::{Result, StegoError};
pub use pixel::{PixelGrid, PixelWord};
