use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use crossterm::style::Stylize;

use crate::activity::ActivityLog;
use crate::config;
use crate::prompt::TerminalPrompter;
use crate::providers::trello::TrelloClient;
use crate::providers::{self, BoardClient, Operation};
use crate::ui::theme;
use crate::workflow::{CardWorkflow, StageResult, Submitted, WorkflowError};

#[derive(Parser, Debug)]
#[command(
    name = "addcard",
    bin_name = "addcard",
    about = "Add a card to a task board without leaving the terminal",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Show the application version then exit
    #[arg(short = 'v', long)]
    pub version: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create a card, picking or creating its board, list and labels
    AddCard,
    /// List every board visible to the configured account
    ListBoards,
    /// List the lists on a board
    ListBoardLists { board_id: String },
    /// List the labels on a board
    ListBoardLabels { board_id: String },
    /// Show what recent runs created or failed to create
    History {
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
}

pub fn version_line() -> String {
    format!(
        "{} version: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

pub async fn run(cli: Cli) -> Result<()> {
    if cli.version {
        println!("{}", version_line());
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::AddCard => handle_add_card(&connect()?).await,
        Commands::ListBoards => handle_list_boards(&connect()?).await,
        Commands::ListBoardLists { board_id } => {
            handle_list_lists(&connect()?, &board_id).await
        }
        Commands::ListBoardLabels { board_id } => {
            handle_list_labels(&connect()?, &board_id).await
        }
        Commands::History { limit } => {
            print_history(&ActivityLog::new(), limit);
            Ok(())
        }
    }
}

fn connect() -> Result<TrelloClient> {
    let config = config::load_config()?;
    Ok(providers::create_client(&config))
}

async fn handle_add_card(client: &dyn BoardClient) -> Result<()> {
    let activity = ActivityLog::new();
    let mut prompter = TerminalPrompter::new();
    let result = CardWorkflow::new(client, &mut prompter, &activity)
        .run()
        .await;

    let submitted = outcome(result)?;
    for line in success_lines(&submitted) {
        println!("{line}");
    }
    Ok(())
}

/// Turns a finished run into the error the user sees. Nothing created
/// before a failed create is rolled back.
fn outcome(result: StageResult<Submitted>) -> Result<Submitted> {
    match result {
        Ok(submitted) => Ok(submitted),
        Err(WorkflowError::Remote(err)) if err.is_mutation() => {
            let retry = err.operation() == Operation::CreateCard;
            let err = anyhow::Error::new(err)
                .context("Boards, lists and labels created earlier in this run are kept");
            if retry {
                Err(err.context("The card was not created, please run `addcard add-card` again"))
            } else {
                Err(err)
            }
        }
        Err(WorkflowError::Remote(err)) => Err(err.into()),
        Err(WorkflowError::Prompt(err)) => Err(err),
    }
}

fn success_lines(submitted: &Submitted) -> Vec<String> {
    let mut lines = vec![theme::success(&format!(
        "Card \"{}\" added to list \"{}\" on board \"{}\"",
        submitted.name, submitted.list.name, submitted.board.name
    ))
    .to_string()];
    if !submitted.label_ids.is_empty() {
        lines.push(format!("  labels: {}", submitted.label_ids.len()));
    }
    if let Some(url) = &submitted.card.short_url {
        lines.push(format!("  {url}"));
    }
    lines
}

async fn handle_list_boards(client: &dyn BoardClient) -> Result<()> {
    let boards = client.list_user_boards().await?;
    if boards.is_empty() {
        println!("No boards found");
    }
    for board in boards {
        println!("{}  {}", board.name.bold(), theme::muted(&board.id));
        if !board.description.trim().is_empty() {
            println!("    {}", board.description.trim());
        }
    }
    Ok(())
}

async fn handle_list_lists(client: &dyn BoardClient, board_id: &str) -> Result<()> {
    let lists = client.list_board_lists(board_id).await?;
    if lists.is_empty() {
        println!("Board has no lists yet");
    }
    for list in lists {
        println!("{}  {}", list.name, theme::muted(&list.id));
    }
    Ok(())
}

async fn handle_list_labels(client: &dyn BoardClient, board_id: &str) -> Result<()> {
    let labels = client.list_board_labels(board_id).await?;
    if labels.is_empty() {
        println!("Board has no labels yet");
    }
    for label in labels {
        let name = if label.name.trim().is_empty() {
            "(unnamed)".to_string()
        } else {
            label.name.clone()
        };
        let color = label.color.as_deref().unwrap_or("no color");
        println!(
            "{} {}  {}",
            name.with(theme::label_color(label.color.as_deref())),
            theme::muted(&format!("({color})")),
            theme::muted(&label.id)
        );
    }
    Ok(())
}

fn print_history(activity: &ActivityLog, limit: usize) {
    let events = activity.read_events(Some(limit));
    if events.is_empty() {
        println!("No activity recorded yet");
    }
    for event in events {
        let what = event
            .name
            .as_deref()
            .or(event.message.as_deref())
            .unwrap_or("");
        let line = format!(
            "{} {:<7} {:<12} {what}",
            event.timestamp, event.event, event.operation
        );
        if event.event == "failed" {
            println!("{}", theme::error(&line));
        } else {
            println!("{line}");
        }
    }
}
