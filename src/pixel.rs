//! # 像素模块
//!
//! `PixelWord` 把一个像素打包成 32 位整数，`PixelGrid` 是按行优先存放的像素网格。
//! 通道的排列方式 (哪个字节是哪个通道) 只在本模块中出现，游标和编解码逻辑只关心第 0 位。

use crate::constants::LSB_MASK;
use crate::error::{Result, StegoError};
use image::{Rgba, RgbaImage};

/// 一个像素的 32 位通道字，按 ARGB 排列，第 0 位是蓝色通道的最低有效位。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelWord(pub u32);

impl PixelWord {
    /// 第 0 位的值 (0 或 1)。
    pub fn lsb(self) -> u8 {
        (self.0 & LSB_MASK) as u8
    }

    /// 返回仅第 0 位被替换为 `bit` 的新像素字，其余 31 位保持不变。
    pub fn with_lsb(self, bit: u8) -> Self {
        if bit & 1 == 1 {
            Self(self.0 | LSB_MASK)
        } else {
            Self(self.0 & !LSB_MASK)
        }
    }

    /// 第 `index` 位的值，`index` 取 0..32。
    pub fn bit(self, index: u32) -> u8 {
        ((self.0 >> index) & 1) as u8
    }
}

impl From<Rgba<u8>> for PixelWord {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self(u32::from_be_bytes([a, r, g, b]))
    }
}

impl From<PixelWord> for Rgba<u8> {
    fn from(word: PixelWord) -> Self {
        let [a, r, g, b] = word.0.to_be_bytes();
        Rgba([r, g, b, a])
    }
}

/// 宽 `width`、高 `height` 的像素网格，按行优先顺序存放。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    words: Vec<PixelWord>,
}

impl PixelGrid {
    /// 创建所有像素字均为 0 的网格。
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            words: vec![PixelWord::default(); width as usize * height as usize],
        }
    }

    /// 由按行优先排列的像素字构造网格，数量必须正好等于 `width * height`。
    pub fn from_words(width: u32, height: u32, words: Vec<PixelWord>) -> Result<Self> {
        if words.len() as u64 != u64::from(width) * u64::from(height) {
            return Err(StegoError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            words,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 像素总数 `N = W * H`。
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> PixelWord {
        self.words[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, word: PixelWord) {
        let index = self.index(x, y);
        self.words[index] = word;
    }

    /// 按行优先顺序遍历所有像素字。
    pub fn words(&self) -> &[PixelWord] {
        &self.words
    }

    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| self.get(x, y).into())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

impl From<&RgbaImage> for PixelGrid {
    fn from(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            words: image.pixels().map(|&pixel| PixelWord::from(pixel)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_lsb_only_touches_bit_zero() {
        let word = PixelWord(0xDEAD_BEEF);
        assert_eq!(word.with_lsb(0), PixelWord(0xDEAD_BEEE));
        assert_eq!(word.with_lsb(1), PixelWord(0xDEAD_BEEF));
        assert_eq!(PixelWord(0xFFFF_FFFE).with_lsb(1), PixelWord(0xFFFF_FFFF));
        assert_eq!(PixelWord(0xFFFF_FFFE).lsb(), 0);
    }

    #[test]
    fn bit_reads_lsb_first() {
        let word = PixelWord(0b1010);
        let bits: Vec<u8> = (0..4).map(|i| word.bit(i)).collect();
        assert_eq!(bits, vec![0, 1, 0, 1]);
        assert_eq!(PixelWord(0x8000_0000).bit(31), 1);
    }

    #[test]
    fn rgba_packs_as_argb() {
        let word = PixelWord::from(Rgba([0x11, 0x22, 0x33, 0x44]));
        assert_eq!(word, PixelWord(0x4411_2233));
        assert_eq!(Rgba::from(word), Rgba([0x11, 0x22, 0x33, 0x44]));
    }

    #[test]
    fn grid_is_row_major() {
        let words = (0..6).map(PixelWord).collect();
        let grid = PixelGrid::from_words(3, 2, words).unwrap();
        assert_eq!(grid.get(2, 0), PixelWord(2));
        assert_eq!(grid.get(0, 1), PixelWord(3));
        assert_eq!(grid.pixel_count(), 6);
    }

    #[test]
    fn from_words_rejects_wrong_length() {
        let result = PixelGrid::from_words(2, 2, vec![PixelWord(0); 3]);
        assert!(matches!(
            result,
            Err(StegoError::InvalidDimensions {
                width: 2,
                height: 2
            })
        ));
    }

    #[test]
    #[should_panic(expected = "outside the 3x2 grid")]
    fn get_past_row_end_panics() {
        let grid = PixelGrid::new(3, 2);
        grid.get(3, 0);
    }

    #[test]
    fn rgba_image_conversion_is_lossless() {
        let image = RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8, y as u8, 7, 200]));
        let grid = PixelGrid::from(&image);
        assert_eq!(grid.to_rgba_image(), image);
    }
}
