use crate::constants::{BITS_PER_BYTE, BITS_PER_PIXEL_WORD, TEXT_TERMINATOR};
use crate::cursor::{BitCursor, check_image_capacity, check_text_capacity};
use crate::error::{Result, StegoError};
use crate::pixel::{PixelGrid, PixelWord};

pub fn embed_image(carrier: &PixelGrid, secret: &PixelGrid) -> Result<PixelGrid> {
    check_image_capacity(carrier, secret.width(), secret.height())?;

    let mut doctored = carrier.clone();
    let mut cursor = BitCursor::new(&doctored);

    for &word in secret.words() {
        for index in 0..BITS_PER_PIXEL_WORD as u32 {
            cursor.write_bit(&mut doctored, word.bit(index))?;
        }
    }

    log::debug!(
        "embedded {}x{} image into {} of {} carrier pixels",
        secret.width(),
        secret.height(),
        cursor.consumed(),
        carrier.pixel_count()
    );
    Ok(doctored)
}

pub fn embed_text(carrier: &PixelGrid, text: &str) -> Result<PixelGrid> {
    check_text_capacity(carrier, text.len())?;
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(TEXT_TERMINATOR);

    let mut doctored = carrier.clone();
    let mut cursor = BitCursor::new(&doctored);

    for byte in bytes {
        for index in 0..BITS_PER_BYTE {
            cursor.write_bit(&mut doctored, (byte >> index) & 1)?;
        }
    }

    log::debug!(
        "embedded {} text bytes into {} of {} carrier pixels",
        text.len(),
        cursor.consumed(),
        carrier.pixel_count()
    );
    Ok(doctored)
}

pub fn extract_image(carrier: &PixelGrid, width: u32, height: u32) -> Result<PixelGrid> {
    if width == 0 || height == 0 {
        return Err(StegoError::InvalidDimensions { width, height });
    }
    check_image_capacity(carrier, width, height)?;

    let mut cursor = BitCursor::new(carrier);
    let mut words = Vec::with_capacity(width as usize * height as usize);

    for _ in 0..u64::from(width) * u64::from(height) {
        let mut word = 0u32;
        for index in 0..BITS_PER_PIXEL_WORD as u32 {
            word |= u32::from(cursor.read_bit(carrier)?) << index;
        }
        words.push(PixelWord(word));
    }

    PixelGrid::from_words(width, height, words)
}

pub fn extract_text(carrier: &PixelGrid) -> Result<String> {
    let mut cursor = BitCursor::new(carrier);
    let mut bytes = Vec::new();
    let mut byte = 0u8;
    let mut bit_count = 0;

    for _ in 0..carrier.pixel_count() {
        byte |= cursor.read_bit(carrier)? << bit_count;
        bit_count += 1;

        if bit_count < BITS_PER_BYTE {
            continue;
        }
        if byte == TEXT_TERMINATOR {
            log::debug!("found terminator after {} carrier pixels", cursor.consumed());
            return Ok(String::from_utf8(bytes)?);
        }
        bytes.push(byte);
        byte = 0;
        bit_count = 0;
    }

    Err(StegoError::TruncatedPayload {
        recovered: bytes.len(),
    })
}
