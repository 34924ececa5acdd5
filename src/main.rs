use clap::Parser;
use std::io;

use lsb_stego::{
    cli::{Cli, Commands},
    handler::{
        handle_capacity, handle_embed_image, handle_embed_text, handle_extract_image,
        handle_extract_text,
    },
    interactive::run_interactive,
};

/// 程序的主入口点
///
/// 负责初始化日志、解析命令行参数，并根据指定的子命令
/// 将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::EmbedImage(args) => handle_embed_image(args, &mut io::stdout().lock()),
        Commands::EmbedText(args) => handle_embed_text(args),
        Commands::ExtractImage(args) => handle_extract_image(args),
        Commands::ExtractText(args) => handle_extract_text(args, &mut io::stdout().lock()),
        Commands::Capacity(args) => handle_capacity(args, &mut io::stdout().lock()),
        Commands::Interactive => run_interactive(&mut io::stdin().lock(), &mut io::stdout().lock()),
    }
}
