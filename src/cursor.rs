//! # 位游标模块
//!
//! 隐藏与提取共用的行优先遍历：每个载体像素承载 1 bit，从 `(0, 0)` 开始，
//! 先向右推进 `x`，到行尾后换到下一行。两端的遍历顺序必须完全一致。

use crate::constants::{BITS_PER_BYTE, BITS_PER_PIXEL_WORD};
use crate::error::{Result, StegoError};
use crate::pixel::PixelGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    Positioned,
    Exhausted,
}

/// 在宽 `width`、高 `height` 的网格上做行优先遍历的游标。
///
/// 一旦越过最后一行就进入 `Exhausted`，之后的每一步都返回容量错误，不会重新开始。
#[derive(Debug)]
pub struct BitCursor {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    consumed: u64,
    state: CursorState,
}

impl BitCursor {
    pub fn new(grid: &PixelGrid) -> Self {
        Self {
            x: 0,
            y: 0,
            width: grid.width(),
            height: grid.height(),
            consumed: 0,
            state: CursorState::Positioned,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// 已经读写过的像素数量。
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// 读取下一个载体像素的最低有效位。
    pub fn read_bit(&mut self, grid: &PixelGrid) -> Result<u8> {
        let (x, y) = self.advance()?;
        Ok(grid.get(x, y).lsb())
    }

    /// 把 `bit` 写入下一个载体像素的最低有效位。
    pub fn write_bit(&mut self, grid: &mut PixelGrid, bit: u8) -> Result<()> {
        let (x, y) = self.advance()?;
        let word = grid.get(x, y).with_lsb(bit);
        grid.set(x, y, word);
        Ok(())
    }

    fn advance(&mut self) -> Result<(u32, u32)> {
        if self.state == CursorState::Positioned && self.x == self.width {
            self.x = 0;
            self.y += 1;
        }
        if self.state == CursorState::Exhausted || self.y >= self.height || self.width == 0 {
            self.state = CursorState::Exhausted;
            let available = u64::from(self.width) * u64::from(self.height);
            return Err(StegoError::Capacity {
                required: self.consumed + 1,
                available,
            });
        }

        let position = (self.x, self.y);
        self.x += 1;
        self.consumed += 1;
        Ok(position)
    }
}

/// 隐藏一张 `width x height` 的秘密图像所需的载体像素数。
pub fn image_bits_required(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * BITS_PER_PIXEL_WORD
}

/// 隐藏 `len` 字节文本 (加上终止字节) 所需的载体像素数。
pub fn text_bits_required(len: usize) -> u64 {
    (len as u64 + 1) * BITS_PER_BYTE
}

/// 载体像素数少于 `width * height * 32` 时失败。
pub fn check_image_capacity(carrier: &PixelGrid, width: u32, height: u32) -> Result<()> {
    let required = image_bits_required(width, height);
    let available = carrier.pixel_count();
    if available < required {
        return Err(StegoError::Capacity {
            required,
            available,
        });
    }
    Ok(())
}

/// `(len + 1) * 8` 超过载体像素数时失败，`len` 是不含终止字节的文本长度。
pub fn check_text_capacity(carrier: &PixelGrid, len: usize) -> Result<()> {
    let required = text_bits_required(len);
    let available = carrier.pixel_count();
    if required > available {
        return Err(StegoError::Capacity {
            required,
            available,
        });
    }
    Ok(())
}

/// 载体最多能容纳的文本字节数，不含终止字节。
pub fn max_text_bytes(carrier: &PixelGrid) -> u64 {
    (carrier.pixel_count() / BITS_PER_BYTE).saturating_sub(1)
}

/// 载体最多能容纳的秘密图像像素数。
pub fn max_image_pixels(carrier: &PixelGrid) -> u64 {
    carrier.pixel_count() / BITS_PER_PIXEL_WORD
}
