pub mod config;
pub mod identifier;
pub mod llm_cleanup;
pub mod openai_client;

mod cli;

pub use cli::{Cli, Mode};

use clap::Parser;

/// 命令行入口：解析参数、执行并打印 JSON 结果
///
/// 返回是否规范化成功
pub async fn run() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    let outcome = cli.execute().await?;
    Ok(outcome.success)
}
