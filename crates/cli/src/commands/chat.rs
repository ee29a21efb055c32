//! Interactive chat command.
//!
//! Reads lines from stdin until `quit`/`exit` or end of input. Besides plain
//! utterances the loop understands `clear`, `help` and `search <query>`.

use clap::Args;
use scout_chat::ChatSession;
use scout_core::{config::AppConfig, AppResult};
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::build_pipeline;

const SEPARATOR_WIDTH: usize = 50;

/// Start an interactive conversation
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Skip the command overview at startup
    #[arg(long)]
    pub no_help: bool,
}

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Quit,
    Clear,
    Help,
    Search(&'a str),
    Message(&'a str),
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Input::Empty;
        }

        const SEARCH_PREFIX: &str = "search ";
        if let Some(prefix) = line.get(..SEARCH_PREFIX.len()) {
            if prefix.eq_ignore_ascii_case(SEARCH_PREFIX) {
                return Input::Search(line[SEARCH_PREFIX.len()..].trim());
            }
        }

        match line.to_lowercase().as_str() {
            "quit" | "exit" => Input::Quit,
            "clear" => Input::Clear,
            "help" | "search" => Input::Help,
            _ => Input::Message(line),
        }
    }
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let pipeline = build_pipeline(config)?;
        let assistant = assistant_label(pipeline.provider_name());
        let mut session = ChatSession::new(pipeline, config.chat.history_capacity);

        println!("✅ Scout ready ({} / {})", config.provider, config.model);
        println!("🔍 Web search enabled");
        if !self.no_help {
            print_help();
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("🧑 你：");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                println!();
                break;
            };

            match Input::parse(&line) {
                Input::Empty => continue,
                Input::Quit => break,
                Input::Clear => {
                    session.clear_history();
                    println!("✅ 对话历史已清空\n");
                }
                Input::Help => print_help(),
                Input::Search(query) => {
                    println!("🔍 正在搜索: {}", query);
                    println!("{}", session.search_formatted(query).await);
                }
                Input::Message(message) => {
                    println!("🤖 思考中...");
                    let start = Instant::now();
                    let response = session.handle(message).await;
                    println!(
                        "🤖 {} ({:.2}s)：",
                        assistant,
                        start.elapsed().as_secs_f64()
                    );
                    println!("{}", response);
                    println!("{}", "─".repeat(SEPARATOR_WIDTH));
                }
            }
        }

        println!("👋 再见！");
        tracing::debug!(turns = session.history_len(), "Chat session ended");
        Ok(())
    }
}

fn assistant_label(provider: &str) -> String {
    match provider {
        "gemini" => "Gemini".to_string(),
        "ollama" => "Ollama".to_string(),
        other => other.to_string(),
    }
}

fn print_help() {
    println!("📋 可用命令：");
    println!("  • quit/exit - 退出程序");
    println!("  • clear - 清空对话历史");
    println!("  • help - 显示帮助信息");
    println!("  • search <关键词> - 直接搜索");
    println!("{}", "─".repeat(SEPARATOR_WIDTH));
}
