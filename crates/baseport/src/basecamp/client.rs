use baseport_core::basecamp::{
    flatten_todos, Comment, Project, Todo, TodoGroup, TodoList, TodoListTree,
};
use baseport_core::pagination::Paginator;
use reqwest::header::LINK;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{create_basecamp_client, BasecampConfig};
use crate::prelude::*;

/// Basecamp 3 API client, built once per run and shared by every command
#[derive(Debug, Clone)]
pub struct BasecampClient {
    http: reqwest::Client,
    account_url: String,
}

impl BasecampClient {
    pub fn new(config: &BasecampConfig) -> Result<Self> {
        Ok(Self {
            http: create_basecamp_client(config)?,
            account_url: config.account_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        f!("{}/{}", self.account_url, path.trim_start_matches('/'))
    }

    /// Send a GET request and map non-success statuses to [`Error`]
    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        log::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(f!("Failed to send request to Basecamp: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(url.to_string()).into());
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RemoteApi {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.get(url)
            .await?
            .json()
            .await
            .map_err(|e| eyre!("Failed to parse Basecamp response from {}: {}", url, e))
    }

    /// Fetch every page of a list endpoint, following `Link: rel="next"`
    async fn get_all<T: DeserializeOwned>(&self, url: String) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut pages = Paginator::new(url);

        while let Some(url) = pages.next_url() {
            let response = self.get(&url).await?;

            pages.advance(
                response
                    .headers()
                    .get(LINK)
                    .and_then(|value| value.to_str().ok()),
            );

            if let Some(page) = pages.pending_page() {
                log::debug!("More results available, continuing with page {page}");
            }

            let page: Vec<T> = response
                .json()
                .await
                .map_err(|e| eyre!("Failed to parse Basecamp response from {}: {}", url, e))?;
            items.extend(page);
        }

        Ok(items)
    }

    async fn get_todos(&self, url: String) -> Result<Vec<Todo>> {
        let values: Vec<serde_json::Value> = self.get_all(url).await?;

        values
            .into_iter()
            .map(|value| Todo::from_value(value).map_err(|e| eyre!("Failed to parse to-do: {}", e)))
            .collect()
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_all(self.url("projects.json")).await
    }

    pub async fn get_project(&self, project_id: u64) -> Result<Project> {
        self.get_json(&self.url(&f!("projects/{project_id}.json")))
            .await
    }

    /// To-do lists in the project's to-do set
    pub async fn list_todolists(&self, project: &Project) -> Result<Vec<TodoList>> {
        let todoset_id = project
            .todoset_id()
            .ok_or_else(|| eyre!("Project {} has no to-dos tool enabled", project.name))?;

        self.get_all(self.url(&f!(
            "buckets/{}/todosets/{todoset_id}/todolists.json",
            project.id
        )))
        .await
    }

    pub async fn get_todolist(&self, project_id: u64, list_id: u64) -> Result<TodoList> {
        self.get_json(&self.url(&f!("buckets/{project_id}/todolists/{list_id}.json")))
            .await
    }

    pub async fn list_todos(&self, project_id: u64, list_id: u64) -> Result<Vec<Todo>> {
        self.get_todos(self.url(&f!(
            "buckets/{project_id}/todolists/{list_id}/todos.json"
        )))
        .await
    }

    /// Groups inside a to-do list; their to-dos are fetched like a list's
    pub async fn list_groups(&self, project_id: u64, list_id: u64) -> Result<Vec<TodoList>> {
        self.get_all(self.url(&f!(
            "buckets/{project_id}/todolists/{list_id}/groups.json"
        )))
        .await
    }

    /// To-dos of a list or group, preferring the URL the API handed out
    async fn todos_of(&self, project_id: u64, list: &TodoList) -> Result<Vec<Todo>> {
        match &list.todos_url {
            Some(url) => self.get_todos(url.clone()).await,
            None => self.list_todos(project_id, list.id).await,
        }
    }

    async fn groups_of(&self, project_id: u64, list: &TodoList) -> Result<Vec<TodoList>> {
        match &list.groups_url {
            Some(url) => self.get_all(url.clone()).await,
            None => self.list_groups(project_id, list.id).await,
        }
    }

    /// Comments on a recording (to-do), in the order Basecamp returns them
    pub async fn list_comments(&self, project_id: u64, recording_id: u64) -> Result<Vec<Comment>> {
        self.get_all(self.url(&f!(
            "buckets/{project_id}/recordings/{recording_id}/comments.json"
        )))
        .await
    }

    /// The selected list, or every list in the project
    pub async fn select_lists(&self, project_id: u64, list_id: Option<u64>) -> Result<Vec<TodoList>> {
        match list_id {
            Some(list_id) => Ok(vec![self.get_todolist(project_id, list_id).await?]),
            None => {
                let project = self.get_project(project_id).await?;
                self.list_todolists(&project).await
            }
        }
    }

    /// Lists with their to-dos and the to-dos of each group
    pub async fn fetch_list_trees(
        &self,
        project_id: u64,
        list_id: Option<u64>,
    ) -> Result<Vec<TodoListTree>> {
        let lists = self.select_lists(project_id, list_id).await?;
        let mut trees = Vec::with_capacity(lists.len());

        for list in lists {
            let todos = self.todos_of(project_id, &list).await?;

            let mut groups = Vec::new();
            for group in self.groups_of(project_id, &list).await? {
                let todos = self.todos_of(project_id, &group).await?;
                groups.push(TodoGroup { group, todos });
            }

            trees.push(TodoListTree {
                list,
                todos,
                groups,
            });
        }

        Ok(trees)
    }

    /// Every to-do of the selected lists as one flat sequence
    ///
    /// Per list: its direct to-dos, then each group's to-dos in group order.
    pub async fn fetch_todos(&self, project_id: u64, list_id: Option<u64>) -> Result<Vec<Todo>> {
        let trees = self.fetch_list_trees(project_id, list_id).await?;
        Ok(flatten_todos(trees))
    }

    /// Attach each to-do's comment thread
    ///
    /// To-dos reporting no comments are skipped without a request.
    pub async fn attach_comments(&self, project_id: u64, todos: Vec<Todo>) -> Result<Vec<Todo>> {
        let mut with_comments = Vec::with_capacity(todos.len());

        for todo in todos {
            let comments = if todo.needs_comment_fetch() {
                self.list_comments(project_id, todo.id).await?
            } else {
                Vec::new()
            };
            with_comments.push(todo.with_comments(comments));
        }

        Ok(with_comments)
    }
}
