//! # 命令处理逻辑模块
//!
//! 包含处理各个子命令的高级业务逻辑。
//! 本模块负责协调图像文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{CapacityArgs, EmbedImageArgs, EmbedTextArgs, ExtractImageArgs, ExtractTextArgs};
use crate::constants::{DEFAULT_EXTENSION, EMBED_PREFIX, RECOVER_PREFIX};
use crate::cursor::{max_image_pixels, max_text_bytes};
use crate::pixel::PixelGrid;
use crate::steganography::{embed_image, embed_text, extract_image, extract_text};
use crate::storage::{load_grid, save_grid};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 处理 'EmbedImage' 命令的执行逻辑。
///
/// 读取载体图像与秘密图像、检查载体容量、把秘密图像逐位写入载体的最低有效位，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `EmbedImageArgs` 结构体。
/// * `out` - 接收载体与秘密图像尺寸及结果信息。载体中不记录尺寸，提取时需要用户记住秘密图像的宽高。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码载体图像或秘密图像。
/// * 载体像素数少于秘密图像像素数的 32 倍。
/// * 无法写入到目标图像文件。
pub fn handle_embed_image<W: Write>(args: EmbedImageArgs, out: &mut W) -> Result<()> {
    let dest = resolve_output(args.dest, &args.carrier, EMBED_PREFIX);
    ensure_writable(&dest, args.force)?;

    let carrier = load(&args.carrier, "cover")?;
    let secret = load(&args.secret, "secret")?;
    let secret_size = format!("{}x{}", secret.width(), secret.height());
    writeln!(
        out,
        "Cover image dimensions: {}x{}",
        carrier.width(),
        carrier.height()
    )?;
    writeln!(
        out,
        "Secret image dimensions: {}",
        secret_size.yellow().bold()
    )?;

    let doctored = embed_image(&carrier, &secret).with_context(|| {
        format!(
            "Not enough space in the cover image to hide '{}'.",
            args.secret.to_string_lossy().red().bold()
        )
    })?;

    save(&doctored, &dest)?;

    writeln!(
        out,
        "The secret image has been successfully hidden and saved: {} \nRemember its size {} to extract it.",
        dest.to_string_lossy().green().bold(),
        secret_size.yellow().bold()
    )?;
    Ok(())
}

/// 处理 'EmbedText' 命令的执行逻辑。
///
/// 文本来自 `--text` 或 `--text-file`，以 UTF-8 编码并追加一个终止字节后写入载体。
/// 文本内部的零字节会在提取时被当作结尾，因此恢复出的文本会在那里截断。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取载体图像或文本文件。
/// * 载体像素数少于 `(文本字节数 + 1) * 8`。
/// * 无法写入到目标图像文件。
pub fn handle_embed_text(args: EmbedTextArgs) -> Result<()> {
    let dest = resolve_output(args.dest, &args.carrier, EMBED_PREFIX);
    ensure_writable(&dest, args.force)?;

    let text = match (args.text, &args.text_file) {
        (Some(text), _) => text,
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Please provide either --text or --text-file"),
    };
    if text.contains('\0') {
        log::warn!("the text contains a zero byte; extraction will stop there");
    }

    let carrier = load(&args.carrier, "cover")?;
    let doctored = embed_text(&carrier, &text).with_context(|| {
        format!(
            "Not enough space in the cover image to hide {} bytes of text.",
            text.len().to_string().red().bold()
        )
    })?;

    save(&doctored, &dest)?;

    println!(
        "The text has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'ExtractImage' 命令的执行逻辑。
///
/// 载体中没有尺寸信息，宽高必须与隐藏时一致；尺寸不符时得到的是无意义的像素，不会报错。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取载体图像。
/// * 宽或高为零，或载体像素不足以容纳该尺寸的秘密图像。
/// * 无法写入到目标图像文件。
pub fn handle_extract_image(args: ExtractImageArgs) -> Result<()> {
    let dest = resolve_output(args.dest, &args.carrier, RECOVER_PREFIX);
    ensure_writable(&dest, args.force)?;

    let carrier = load(&args.carrier, "cover")?;
    let secret = extract_image(&carrier, args.width, args.height).with_context(|| {
        format!(
            "Failed to recover a {}x{} image from '{}'.",
            args.width.to_string().red().bold(),
            args.height.to_string().red().bold(),
            args.carrier.to_string_lossy().red().bold()
        )
    })?;

    save(&secret, &dest)?;

    println!(
        "The secret image has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'ExtractText' 命令的执行逻辑，把恢复出的文本写入 `out`。
///
/// # Errors
///
/// * 无法读取载体图像。
/// * 载体中找不到终止字节，或恢复出的字节不是合法的 UTF-8。
/// * 无法写入 `out`。
pub fn handle_extract_text<W: Write>(args: ExtractTextArgs, out: &mut W) -> Result<()> {
    let carrier = load(&args.carrier, "cover")?;
    let text = extract_text(&carrier).with_context(|| {
        format!(
            "Failed to recover text from '{}'. \nThe image may not contain a hidden message or is corrupted.",
            args.carrier.to_string_lossy().red().bold()
        )
    })?;

    writeln!(out, "{text}").context("Unable to write the recovered text")?;
    Ok(())
}

/// 处理 'Capacity' 命令：报告载体的尺寸以及可容纳的文本字节数和秘密图像像素数。
pub fn handle_capacity<W: Write>(args: CapacityArgs, out: &mut W) -> Result<()> {
    let carrier = load(&args.carrier, "cover")?;

    writeln!(
        out,
        "Cover image: {}x{} ({} pixels)",
        carrier.width(),
        carrier.height(),
        carrier.pixel_count()
    )?;
    writeln!(
        out,
        "Max text: {} bytes",
        max_text_bytes(&carrier).to_string().green().bold()
    )?;
    writeln!(
        out,
        "Max secret image: {} pixels",
        max_image_pixels(&carrier).to_string().green().bold()
    )?;
    Ok(())
}

/// 未显式指定输出路径时，在源文件所在目录生成 `<prefix><文件名>.png`。
pub fn resolve_output(explicit: Option<PathBuf>, source: &Path, prefix: &str) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        source.with_file_name(format!("{prefix}{stem}.{DEFAULT_EXTENSION}"))
    })
}

fn ensure_writable(dest: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(())
}

fn load(path: &Path, role: &str) -> Result<PixelGrid> {
    load_grid(path).with_context(|| {
        format!(
            "Unable to read {role} image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn save(grid: &PixelGrid, dest: &Path) -> Result<()> {
    save_grid(grid, dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })
}
