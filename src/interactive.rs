//! # 交互模式模块
//!
//! 逐项提示用户选择操作并输入路径、文本和尺寸，然后转交给 `handler` 中对应的处理函数。
//! 输入输出都是泛型的 `BufRead` / `Write`，便于测试。

use crate::cli::{EmbedImageArgs, EmbedTextArgs, ExtractImageArgs, ExtractTextArgs, Operation};
use crate::handler::{
    handle_embed_image, handle_embed_text, handle_extract_image, handle_extract_text,
};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// 运行一次交互会话。
///
/// # Errors
///
/// * 选择了无法识别的操作 (`StegoError::InvalidSelection`)，此时不会读写任何文件。
/// * 输入提前结束，或宽高不是合法的正整数。
/// * 所选处理函数返回的任何错误。
pub fn run_interactive<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Choose operation: (1) embed-image (2) embed-text (3) extract-image (4) extract-text"
    )?;
    let choice = ask(input, out, "Enter 1-4: ")?;
    let operation: Operation = choice.parse()?;
    log::debug!("interactive operation: {operation}");

    match operation {
        Operation::EmbedImage => {
            let carrier = ask_path(input, out, "Cover image: ")?;
            let secret = ask_path(input, out, "Secret image to embed: ")?;
            let dest = ask_optional_path(input, out, "Output image (blank for default): ")?;
            handle_embed_image(
                EmbedImageArgs {
                    carrier,
                    secret,
                    dest,
                    force: false,
                },
                out,
            )
        }
        Operation::EmbedText => {
            let carrier = ask_path(input, out, "Cover image: ")?;
            let text = ask(input, out, "Text to embed: ")?;
            let dest = ask_optional_path(input, out, "Output image (blank for default): ")?;
            handle_embed_text(EmbedTextArgs {
                carrier,
                text: Some(text),
                text_file: None,
                dest,
                force: false,
            })
        }
        Operation::ExtractImage => {
            let carrier = ask_path(input, out, "Image with hidden data: ")?;
            let width = ask_dimension(input, out, "Width of the secret image: ")?;
            let height = ask_dimension(input, out, "Height of the secret image: ")?;
            let dest = ask_optional_path(input, out, "Output image (blank for default): ")?;
            handle_extract_image(ExtractImageArgs {
                carrier,
                width,
                height,
                dest,
                force: false,
            })
        }
        Operation::ExtractText => {
            let carrier = ask_path(input, out, "Image with hidden data: ")?;
            write!(out, "Extracted text: ")?;
            handle_extract_text(ExtractTextArgs { carrier }, out)
        }
    }
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
    write!(out, "{question}")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Unable to read input")?;
    anyhow::ensure!(read > 0, "Unexpected end of input");
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn ask_path<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<PathBuf> {
    let answer = ask(input, out, question)?;
    let answer = answer.trim();
    anyhow::ensure!(!answer.is_empty(), "A file path is required");
    Ok(PathBuf::from(answer))
}

fn ask_optional_path<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> Result<Option<PathBuf>> {
    let answer = ask(input, out, question)?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
}

fn ask_dimension<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<u32> {
    let answer = ask(input, out, question)?;
    answer
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a valid dimension", answer.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StegoError;
    use std::io::Cursor;

    #[test]
    fn invalid_choice_is_rejected() {
        let mut input = Cursor::new("9\n");
        let mut out = Vec::new();
        let err = run_interactive(&mut input, &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StegoError>(),
            Some(StegoError::InvalidSelection(_))
        ));
    }

    #[test]
    fn missing_answers_fail() {
        let mut input = Cursor::new("2\n");
        let mut out = Vec::new();
        let err = run_interactive(&mut input, &mut out).unwrap_err();
        assert!(err.to_string().contains("Unexpected end of input"));
    }

    #[test]
    fn dimensions_must_be_numbers() {
        let mut input = Cursor::new("3\ncover.png\nwide\n");
        let mut out = Vec::new();
        let err = run_interactive(&mut input, &mut out).unwrap_err();
        assert!(err.to_string().contains("not a valid dimension"));
    }
}
