mod activity;
mod cli;
mod config;
mod model;
mod prompt;
mod providers;
mod ui;
mod workflow;

use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        eprintln!("{}", ui::theme::error(&format!("Error: {err:#}")));
        std::process::exit(1);
    }
}
