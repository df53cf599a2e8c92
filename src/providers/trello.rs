use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{BoardClient, Operation, RemoteError, RemoteResult};
use crate::model::board::{Board, BoardList, CreatedCard, Label, LabelColor, NewCard};

pub const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";

pub struct TrelloClient {
    base_url: String,
    api_key: String,
    token: String,
    username: String,
    client: reqwest::Client,
}

impl TrelloClient {
    pub fn new(base_url: String, api_key: String, token: String, username: String) -> Self {
        Self {
            base_url,
            api_key,
            token,
            username,
            client: reqwest::Client::new(),
        }
    }

    fn auth_params(&self) -> [(&str, &str); 2] {
        [("key", &self.api_key), ("token", &self.token)]
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Member path segment for the boards endpoint.
    fn member(&self) -> &str {
        let username = self.username.trim();
        if username.is_empty() {
            "me"
        } else {
            username
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header(ACCEPT, "application/json")
            .query(&self.auth_params())
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header(ACCEPT, "application/json")
            .query(&self.auth_params())
    }

    fn boards_request(&self) -> RequestBuilder {
        self.get(&format!("members/{}/boards", self.member()))
    }

    fn lists_request(&self, board_id: &str) -> RequestBuilder {
        self.get(&format!("boards/{board_id}/lists"))
    }

    fn labels_request(&self, board_id: &str) -> RequestBuilder {
        self.get(&format!("boards/{board_id}/labels"))
    }

    fn create_board_request(&self, name: &str, description: Option<&str>) -> RequestBuilder {
        let request = self.post("boards").query(&[("name", name)]);
        // The service applies its own default when `desc` is absent.
        match description.map(str::trim).filter(|d| !d.is_empty()) {
            Some(desc) => request.query(&[("desc", desc)]),
            None => request,
        }
    }

    fn create_list_request(&self, board_id: &str, name: &str) -> RequestBuilder {
        self.post(&format!("boards/{board_id}/lists"))
            .query(&[("name", name)])
    }

    fn create_label_request(&self, board_id: &str, name: &str, color: LabelColor) -> RequestBuilder {
        self.post(&format!("boards/{board_id}/labels")).query(&[
            ("name", name),
            ("color", color.as_str()),
            ("idBoard", board_id),
        ])
    }

    fn create_card_request(&self, card: &NewCard) -> RequestBuilder {
        let label_ids = card.label_ids.join(",");
        self.post("cards").query(&[
            ("idList", card.list_id.as_str()),
            ("name", card.name.as_str()),
            ("desc", card.description.as_str()),
            ("idLabels", label_ids.as_str()),
        ])
    }

    async fn send<T: DeserializeOwned>(
        &self,
        op: Operation,
        request: RequestBuilder,
    ) -> RemoteResult<T> {
        let response = request.send().await.map_err(|e| RemoteError::Transport {
            op,
            message: e.to_string(),
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RemoteError::Status {
                op,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| RemoteError::Decode {
            op,
            message: e.to_string(),
        })
    }
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

#[async_trait]
impl BoardClient for TrelloClient {
    async fn list_user_boards(&self) -> RemoteResult<Vec<Board>> {
        self.send(Operation::ListBoards, self.boards_request()).await
    }

    async fn list_board_lists(&self, board_id: &str) -> RemoteResult<Vec<BoardList>> {
        self.send(Operation::ListLists, self.lists_request(board_id))
            .await
    }

    async fn list_board_labels(&self, board_id: &str) -> RemoteResult<Vec<Label>> {
        self.send(Operation::ListLabels, self.labels_request(board_id))
            .await
    }

    async fn create_board(&self, name: &str, description: Option<&str>) -> RemoteResult<String> {
        let created: Created = self
            .send(
                Operation::CreateBoard,
                self.create_board_request(name, description),
            )
            .await?;
        Ok(created.id)
    }

    async fn create_list(&self, board_id: &str, name: &str) -> RemoteResult<String> {
        let created: Created = self
            .send(
                Operation::CreateList,
                self.create_list_request(board_id, name),
            )
            .await?;
        Ok(created.id)
    }

    async fn create_label(
        &self,
        board_id: &str,
        name: &str,
        color: LabelColor,
    ) -> RemoteResult<String> {
        let created: Created = self
            .send(
                Operation::CreateLabel,
                self.create_label_request(board_id, name, color),
            )
            .await?;
        Ok(created.id)
    }

    async fn create_card(&self, card: &NewCard) -> RemoteResult<CreatedCard> {
        self.send(Operation::CreateCard, self.create_card_request(card))
            .await
    }
}
