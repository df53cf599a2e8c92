pub mod trello;

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::board::{Board, BoardList, CreatedCard, Label, LabelColor, NewCard};

/// The remote calls the card workflow makes, one HTTP round trip each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListBoards,
    ListLists,
    ListLabels,
    CreateBoard,
    CreateList,
    CreateLabel,
    CreateCard,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ListBoards => "list_boards",
            Operation::ListLists => "list_lists",
            Operation::ListLabels => "list_labels",
            Operation::CreateBoard => "create_board",
            Operation::CreateList => "create_list",
            Operation::CreateLabel => "create_label",
            Operation::CreateCard => "create_card",
        }
    }

    /// Mutations create a persistent resource and are never retried.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Operation::CreateBoard
                | Operation::CreateList
                | Operation::CreateLabel
                | Operation::CreateCard
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::ListBoards => "get boards",
            Operation::ListLists => "get board lists",
            Operation::ListLabels => "get board labels",
            Operation::CreateBoard => "create new board",
            Operation::CreateList => "create new list",
            Operation::CreateLabel => "create new label",
            Operation::CreateCard => "create new card",
        };
        f.write_str(text)
    }
}

/// Any failed remote call. Not found, unauthorized and server errors are
/// deliberately not told apart; the status code is the only diagnostic.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Unable to {op} (HTTP {status})")]
    Status { op: Operation, status: u16 },
    #[error("Unable to {op}: {message}")]
    Transport { op: Operation, message: String },
    #[error("Unable to {op}: unexpected response ({message})")]
    Decode { op: Operation, message: String },
}

impl RemoteError {
    pub fn operation(&self) -> Operation {
        match self {
            RemoteError::Status { op, .. }
            | RemoteError::Transport { op, .. }
            | RemoteError::Decode { op, .. } => *op,
        }
    }

    /// True for a failed create call, false for a failed fetch.
    pub fn is_mutation(&self) -> bool {
        self.operation().is_mutation()
    }
}

pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

#[async_trait]
pub trait BoardClient: Send + Sync {
    async fn list_user_boards(&self) -> RemoteResult<Vec<Board>>;
    async fn list_board_lists(&self, board_id: &str) -> RemoteResult<Vec<BoardList>>;
    async fn list_board_labels(&self, board_id: &str) -> RemoteResult<Vec<Label>>;
    /// An empty or missing description is left out of the request.
    async fn create_board(&self, name: &str, description: Option<&str>) -> RemoteResult<String>;
    async fn create_list(&self, board_id: &str, name: &str) -> RemoteResult<String>;
    async fn create_label(
        &self,
        board_id: &str,
        name: &str,
        color: LabelColor,
    ) -> RemoteResult<String>;
    async fn create_card(&self, card: &NewCard) -> RemoteResult<CreatedCard>;
}


pub fn create_client(config: &AppConfig) -> trello::TrelloClient {
    trello::TrelloClient::new(
        config.trello.base_url.clone(),
        config.trello.api_key.clone(),
        config.trello.token.clone(),
        config.trello.username.clone(),
    )
}
