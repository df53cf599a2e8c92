//! Interactive card creation.
//!
//! A run walks forward through card identity, board, list, labels and
//! submission. Text prompts loop until their answer is valid; any remote
//! failure ends the run immediately and later stages never prompt.

use anyhow::{anyhow, bail, Result};
use thiserror::Error;

use crate::activity::ActivityLog;
use crate::model::board::{Board, BoardList, CreatedCard, Label, LabelColor, NewCard};
use crate::prompt::{ask_until, required, Prompter};
use crate::providers::{BoardClient, Operation, RemoteError, RemoteResult};

pub const CARD_NAME: &str = "Card name";
pub const CARD_DESCRIPTION: &str = "Card description";
pub const SELECT_BOARD: &str = "Select a board";
pub const CREATE_BOARD: &str = "Create a new board";
pub const BOARD_NAME: &str = "New board name";
pub const BOARD_DESCRIPTION: &str = "New board description (optional)";
pub const SELECT_LIST: &str = "Select a list";
pub const LIST_NAME: &str = "New list name";
pub const LABEL_MENU: &str = "Add a label to the card?";
pub const SELECT_LABEL: &str = "Select a label";
pub const LABEL_NAME: &str = "New label name";
pub const LABEL_COLOR: &str = "New label color";

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Prompt(#[from] anyhow::Error),
}

pub type StageResult<T> = std::result::Result<T, WorkflowError>;

/// Something that can appear as an entry in a picker.
pub trait Selectable {
    fn render(&self) -> String;
}

impl Selectable for Board {
    fn render(&self) -> String {
        let description = self.description.trim();
        if description.is_empty() {
            format!("{}, No description", self.name)
        } else {
            format!("{}, {}", self.name, description)
        }
    }
}

impl Selectable for BoardList {
    fn render(&self) -> String {
        self.name.clone()
    }
}

impl Selectable for Label {
    fn render(&self) -> String {
        let name = if self.name.trim().is_empty() {
            "(unnamed)"
        } else {
            self.name.as_str()
        };
        format!("{name} ({})", self.color.as_deref().unwrap_or("no color"))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Choice<'a, T> {
    Existing(&'a T),
    CreateNew,
}

/// Offer every item plus, when `create_entry` is set, one trailing entry
/// for making a new one. A pick outside the offered entries is an error.
pub fn choose<'a, T, P>(
    prompter: &mut P,
    question: &str,
    items: &'a [T],
    create_entry: Option<&str>,
) -> Result<Choice<'a, T>>
where
    T: Selectable,
    P: Prompter + ?Sized,
{
    let mut entries: Vec<String> = items.iter().map(Selectable::render).collect();
    if let Some(entry) = create_entry {
        entries.push(entry.to_string());
    }
    let picked = prompter.select(question, &entries)?;
    match items.get(picked) {
        Some(item) => Ok(Choice::Existing(item)),
        None if create_entry.is_some() && picked == items.len() => Ok(Choice::CreateNew),
        None => bail!("'{question}' has no entry {picked}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedBoard {
    pub id: String,
    pub name: String,
    pub is_new: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedList {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub card: CreatedCard,
    pub name: String,
    pub board: SelectedBoard,
    pub list: SelectedList,
    pub label_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelAction {
    Create,
    SelectExisting,
    Done,
}

impl LabelAction {
    fn text(&self) -> &'static str {
        match self {
            LabelAction::Create => "Create new label",
            LabelAction::SelectExisting => "Select existing label",
            LabelAction::Done => "No label / done",
        }
    }
}

pub struct CardWorkflow<'a, C: ?Sized, P: ?Sized> {
    client: &'a C,
    prompter: &'a mut P,
    activity: &'a ActivityLog,
}

impl<'a, C, P> CardWorkflow<'a, C, P>
where
    C: BoardClient + ?Sized,
    P: Prompter + ?Sized,
{
    pub fn new(client: &'a C, prompter: &'a mut P, activity: &'a ActivityLog) -> Self {
        Self {
            client,
            prompter,
            activity,
        }
    }

    pub async fn run(&mut self) -> StageResult<Submitted> {
        let (name, description) = self.card_identity()?;
        let board = self.board_stage().await?;
        let list = self.list_stage(&board).await?;
        let label_ids = self.label_stage(&board.id).await?;

        let new_card = NewCard {
            list_id: list.id.clone(),
            name,
            description,
            label_ids,
        };
        let card = self.track(self.client.create_card(&new_card).await)?;
        self.activity
            .created(Operation::CreateCard, &card.id, &new_card.name);

        Ok(Submitted {
            card,
            name: new_card.name,
            board,
            list,
            label_ids: new_card.label_ids,
        })
    }

    fn track<T>(&self, result: RemoteResult<T>) -> StageResult<T> {
        result.map_err(|err| {
            self.activity.failed(&err);
            WorkflowError::Remote(err)
        })
    }

    fn card_identity(&mut self) -> Result<(String, String)> {
        let name = ask_until(&mut *self.prompter, CARD_NAME, required("Card name"))?;
        let description = ask_until(
            &mut *self.prompter,
            CARD_DESCRIPTION,
            required("Card description"),
        )?;
        self.prompter.say(&format!("Card name: {name}"));
        self.prompter.say(&format!("Card description: {description}"));
        Ok((name, description))
    }

    async fn board_stage(&mut self) -> StageResult<SelectedBoard> {
        let boards = self.track(self.client.list_user_boards().await)?;

        let choice = choose(
            &mut *self.prompter,
            SELECT_BOARD,
            &boards,
            Some(CREATE_BOARD),
        )?;
        match choice {
            Choice::Existing(board) => Ok(SelectedBoard {
                id: board.id.clone(),
                name: board.name.clone(),
                is_new: false,
            }),
            Choice::CreateNew => {
                let name =
                    ask_until(&mut *self.prompter, BOARD_NAME, required("Board name"))?;
                let description = self.prompter.input(BOARD_DESCRIPTION)?;
                let description = description.trim();
                let description = (!description.is_empty()).then_some(description);

                let id = self.track(self.client.create_board(&name, description).await)?;
                self.activity.created(Operation::CreateBoard, &id, &name);
                Ok(SelectedBoard {
                    id,
                    name,
                    is_new: true,
                })
            }
        }
    }

    async fn list_stage(&mut self, board: &SelectedBoard) -> StageResult<SelectedList> {
        let lists = self.track(self.client.list_board_lists(&board.id).await)?;

        // A board made this run always gets a fresh list, whatever the fetch said.
        if !board.is_new && !lists.is_empty() {
            let choice = choose(&mut *self.prompter, SELECT_LIST, &lists, None)?;
            if let Choice::Existing(list) = choice {
                return Ok(SelectedList {
                    id: list.id.clone(),
                    name: list.name.clone(),
                });
            }
        }

        let name = ask_until(&mut *self.prompter, LIST_NAME, required("List name"))?;
        let id = self.track(self.client.create_list(&board.id, &name).await)?;
        self.activity.created(Operation::CreateList, &id, &name);
        Ok(SelectedList { id, name })
    }

    async fn label_stage(&mut self, board_id: &str) -> StageResult<Vec<String>> {
        let labels = self.track(self.client.list_board_labels(board_id).await)?;

        let mut actions = vec![LabelAction::Create];
        if !labels.is_empty() {
            actions.push(LabelAction::SelectExisting);
        }
        actions.push(LabelAction::Done);
        let entries: Vec<String> = actions.iter().map(|a| a.text().to_string()).collect();

        let mut label_ids = Vec::new();
        loop {
            let picked = self.prompter.select(LABEL_MENU, &entries)?;
            let action = actions
                .get(picked)
                .copied()
                .ok_or_else(|| anyhow!("'{LABEL_MENU}' has no entry {picked}"))?;
            match action {
                LabelAction::Create => {
                    let name =
                        ask_until(&mut *self.prompter, LABEL_NAME, required("Label name"))?;
                    let color = ask_until(&mut *self.prompter, LABEL_COLOR, accept_color)?;
                    let id = self.track(
                        self.client
                            .create_label(board_id, &name, color)
                            .await,
                    )?;
                    self.activity.created(Operation::CreateLabel, &id, &name);
                    label_ids.push(id);
                }
                LabelAction::SelectExisting => {
                    if let Choice::Existing(label) =
                        choose(&mut *self.prompter, SELECT_LABEL, &labels, None)?
                    {
                        label_ids.push(label.id.clone());
                    }
                }
                LabelAction::Done => break,
            }
        }
        Ok(label_ids)
    }
}

fn accept_color(answer: &str) -> std::result::Result<LabelColor, String> {
    if answer.is_empty() {
        return Err(format!(
            "Label color cannot be empty! Accepted colors: {}",
            LabelColor::accepted()
        ));
    }
    answer.parse::<LabelColor>().map_err(|_| {
        format!(
            "Invalid label color '{answer}'! Accepted colors: {}",
            LabelColor::accepted()
        )
    })
}
