//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::error::StegoError;
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复图像与文本。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复图像与文本。\n\
                  每个载体像素只承载 1 bit，载体中不写入任何头部：提取时必须已知载荷类型与秘密图像尺寸。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 把一张秘密图像隐藏到载体图像中。
    EmbedImage(EmbedImageArgs),

    /// 把一段文本隐藏到载体图像中。
    EmbedText(EmbedTextArgs),

    /// 按给定尺寸从载体图像中恢复秘密图像。
    ExtractImage(ExtractImageArgs),

    /// 从载体图像中恢复隐藏的文本，并输出到标准输出。
    ExtractText(ExtractTextArgs),

    /// 显示载体图像能容纳的载荷大小。
    Capacity(CapacityArgs),

    /// 以问答方式选择操作并输入参数。
    Interactive,
}

/// 'embed-image' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedImageArgs {
    /// 载体图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 要隐藏的秘密图像文件路径。
    #[arg(short, long)]
    pub secret: PathBuf,

    /// 结果图像的输出路径。默认为载体所在目录下的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'embed-text' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedTextArgs {
    /// 载体图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 要隐藏的文本。
    #[arg(short, long, conflicts_with = "text_file", required_unless_present = "text_file")]
    pub text: Option<String>,

    /// 要隐藏的文本文件路径 (UTF-8)。
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    /// 结果图像的输出路径。默认为载体所在目录下的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract-image' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractImageArgs {
    /// 已隐藏秘密图像的载体文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// 秘密图像的宽度 (像素)。
    #[arg(short = 'W', long)]
    pub width: u32,

    /// 秘密图像的高度 (像素)。
    #[arg(short = 'H', long)]
    pub height: u32,

    /// 恢复图像的输出路径。默认为载体所在目录下的 `recovered_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract-text' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractTextArgs {
    /// 已隐藏文本的载体文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,
}

/// 'capacity' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct CapacityArgs {
    /// 载体图像文件路径。
    #[arg(short, long)]
    pub carrier: PathBuf,
}

/// 交互模式下可选择的四种操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    EmbedImage,
    EmbedText,
    ExtractImage,
    ExtractText,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::EmbedImage,
        Operation::EmbedText,
        Operation::ExtractImage,
        Operation::ExtractText,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::EmbedImage => "embed-image",
            Operation::EmbedText => "embed-text",
            Operation::ExtractImage => "extract-image",
            Operation::ExtractText => "extract-text",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 接受菜单序号 (`1` 到 `4`) 或操作名称。
impl FromStr for Operation {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let choice = s.trim();
        if let Ok(number) = choice.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| Operation::ALL.get(index).copied())
                .ok_or_else(|| StegoError::InvalidSelection(choice.to_string()));
        }
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(choice))
            .ok_or_else(|| StegoError::InvalidSelection(choice.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_menu_numbers_and_names() {
        assert_eq!("1".parse::<Operation>().unwrap(), Operation::EmbedImage);
        assert_eq!(" 4 ".parse::<Operation>().unwrap(), Operation::ExtractText);
        assert_eq!(
            "Extract-Image".parse::<Operation>().unwrap(),
            Operation::ExtractImage
        );
    }

    #[test]
    fn rejects_unknown_choices() {
        for choice in ["0", "5", "", "hide"] {
            assert!(matches!(
                choice.parse::<Operation>(),
                Err(StegoError::InvalidSelection(_))
            ));
        }
    }

    #[test]
    fn embed_text_needs_exactly_one_source() {
        assert!(Cli::try_parse_from(["lsb_stego", "embed-text", "-c", "a.png"]).is_err());
        assert!(
            Cli::try_parse_from([
                "lsb_stego",
                "embed-text",
                "-c",
                "a.png",
                "-t",
                "hi",
                "--text-file",
                "b.txt"
            ])
            .is_err()
        );
        assert!(Cli::try_parse_from(["lsb_stego", "embed-text", "-c", "a.png", "-t", "hi"]).is_ok());
    }
}
