//! Domain models for Basecamp 3 API responses
//!
//! To-dos keep the fields the transformer rewrites as named, typed fields and
//! carry everything else the API returned in a passthrough map, so an export
//! contains whatever fields Basecamp sends without losing type safety on the
//! fields that matter.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Basecamp person (creator, assignee, commenter)
///
/// Kept as the raw API object so passthrough cells show it exactly as
/// Basecamp sent it; the fields the transformer reads have accessors.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Person {
    fields: Map<String, Value>,
}

impl Person {
    pub fn id(&self) -> Option<u64> {
        self.fields.get("id").and_then(Value::as_u64)
    }

    pub fn name(&self) -> &str {
        self.fields.get("name").and_then(Value::as_str).unwrap_or("")
    }

    pub fn email_address(&self) -> Option<&str> {
        self.fields
            .get("email_address")
            .and_then(Value::as_str)
            .filter(|email| !email.is_empty())
    }
}

/// A to-do creator: the API person, or a rendered mention once a profile rewrote it
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Creator {
    Person(Person),
    Mention(String),
}

/// To-do assignees: the API people, or a rendered mention once a profile rewrote them
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Assignees {
    People(Vec<Person>),
    Mention(String),
}

impl Default for Assignees {
    fn default() -> Self {
        Assignees::People(Vec::new())
    }
}

/// Deserialize a field that may be missing or `null` into its default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Comment on a Basecamp recording
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Comment {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: Person,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field names of [`Todo`] that are modeled explicitly, in Basecamp's usual order
const NAMED_FIELDS: [&str; 6] = [
    "id",
    "title",
    "description",
    "creator",
    "assignees",
    "app_url",
];

/// A single Basecamp to-do, the unit of export
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Todo {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// `None` when the API sent no creator (missing or `null`)
    #[serde(default)]
    pub creator: Option<Creator>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub assignees: Assignees,
    #[serde(default, deserialize_with = "null_as_default")]
    pub app_url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Key order of the API object this to-do was read from
    #[serde(skip)]
    pub field_order: Vec<String>,
    /// Comment thread, attached only when a profile needs it
    #[serde(skip)]
    pub comments: Vec<Comment>,
}

impl Todo {
    /// Build a to-do from a raw API object, remembering its key order
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let field_order = value
            .as_object()
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default();

        let mut todo: Todo = serde_json::from_value(value)?;
        todo.field_order = field_order;
        Ok(todo)
    }

    /// Field names in export order
    ///
    /// Uses the API key order when known, otherwise the named fields followed
    /// by the passthrough keys.
    pub fn field_names(&self) -> Vec<String> {
        if !self.field_order.is_empty() {
            return self.field_order.clone();
        }

        NAMED_FIELDS
            .iter()
            .map(|name| name.to_string())
            .chain(self.extra.keys().cloned())
            .collect()
    }

    /// Value of a field by name, `None` when the to-do has no such field
    pub fn field_value(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::from(self.id)),
            "title" => Some(Value::String(self.title.clone())),
            "description" => Some(Value::String(self.description.clone())),
            "creator" => serde_json::to_value(&self.creator).ok(),
            "assignees" => serde_json::to_value(&self.assignees).ok(),
            "app_url" => Some(Value::String(self.app_url.clone())),
            other => self.extra.get(other).cloned(),
        }
    }

    /// Attach a comment thread, preserving the order it was fetched in
    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = comments;
        self
    }

    /// Comment count reported by the API, when present
    pub fn comments_count(&self) -> Option<u64> {
        self.extra.get("comments_count").and_then(Value::as_u64)
    }

    /// Whether the comment thread has to be requested
    ///
    /// Only a reported count of zero lets the request be skipped; an unknown
    /// count is fetched.
    pub fn needs_comment_fetch(&self) -> bool {
        self.comments_count() != Some(0)
    }
}

/// Tool entry in a project's dock
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DockItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub url: String,
}

/// Basecamp project
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Project {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub app_url: String,
    #[serde(default)]
    pub dock: Vec<DockItem>,
}

impl Project {
    /// ID of the project's to-do set, if the To-dos tool is enabled
    pub fn todoset_id(&self) -> Option<u64> {
        self.dock
            .iter()
            .find(|item| item.name == "todoset" && item.enabled)
            .map(|item| item.id)
    }
}

/// Basecamp to-do list; to-do groups share this shape
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TodoList {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub app_url: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_ratio: Option<String>,
    /// Endpoint listing this list's to-dos
    #[serde(default)]
    pub todos_url: Option<String>,
    /// Endpoint listing this list's groups; groups themselves have none
    #[serde(default)]
    pub groups_url: Option<String>,
}

impl TodoList {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.title
        } else {
            &self.name
        }
    }
}

/// To-do group inside a list, with its to-dos
#[derive(Debug, Clone, PartialEq)]
pub struct TodoGroup {
    pub group: TodoList,
    pub todos: Vec<Todo>,
}

/// To-do list with its own to-dos followed by its groups
#[derive(Debug, Clone, PartialEq)]
pub struct TodoListTree {
    pub list: TodoList,
    pub todos: Vec<Todo>,
    pub groups: Vec<TodoGroup>,
}

impl TodoListTree {
    pub fn todo_count(&self) -> usize {
        self.todos.len() + self.groups.iter().map(|g| g.todos.len()).sum::<usize>()
    }
}

/// Flatten lists into one sequence: each list's to-dos, then its groups' to-dos
pub fn flatten_todos(trees: Vec<TodoListTree>) -> Vec<Todo> {
    let mut todos = Vec::new();
    for tree in trees {
        todos.extend(tree.todos);
        for group in tree.groups {
            todos.extend(group.todos);
        }
    }
    todos
}

/// Render a field value the way it appears in a CSV cell
///
/// Strings are written raw, null is empty, scalars use their literal form
/// and nested values are compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn todo_json() -> Value {
        json!({
            "id": 42,
            "status": "active",
            "title": "Ship it",
            "creator": {"id": 1, "name": "Jane Doe", "email_address": "jane@retailzipline.com"},
            "description": "<div>Do the thing</div>",
            "assignees": [],
            "app_url": "https://3.basecamp.com/1/buckets/2/todos/42",
            "due_on": null
        })
    }

    #[test]
    fn test_todo_from_value_keeps_key_order() {
        let todo = Todo::from_value(todo_json()).unwrap();

        assert_eq!(
            todo.field_names(),
            vec![
                "id",
                "status",
                "title",
                "creator",
                "description",
                "assignees",
                "app_url",
                "due_on"
            ]
        );
        assert_eq!(todo.extra.get("status"), Some(&json!("active")));
    }

    #[test]
    fn test_todo_named_fields() {
        let todo = Todo::from_value(todo_json()).unwrap();

        assert_eq!(todo.id, 42);
        assert_eq!(todo.title, "Ship it");
        assert_eq!(todo.assignees, Assignees::People(vec![]));
        match &todo.creator {
            Some(Creator::Person(person)) => {
                assert_eq!(person.email_address(), Some("jane@retailzipline.com"));
                assert_eq!(person.id(), Some(1));
                assert_eq!(person.name(), "Jane Doe");
            }
            other => panic!("expected a person, got {other:?}"),
        }
    }

    #[test]
    fn test_todo_missing_optional_fields() {
        let todo = Todo::from_value(json!({
            "id": 7,
            "title": "Bare",
            "creator": {"id": 1, "name": "Bot"}
        }))
        .unwrap();

        assert_eq!(todo.description, "");
        assert_eq!(todo.assignees, Assignees::default());
        assert!(todo.comments.is_empty());
    }

    #[test]
    fn test_todo_field_value() {
        let todo = Todo::from_value(todo_json()).unwrap();

        assert_eq!(todo.field_value("id"), Some(json!(42)));
        assert_eq!(todo.field_value("assignees"), Some(json!([])));
        assert_eq!(todo.field_value("due_on"), Some(Value::Null));
        assert_eq!(todo.field_value("nope"), None);
    }

    #[test]
    fn test_field_names_without_source_order() {
        let mut todo = Todo::from_value(todo_json()).unwrap();
        todo.field_order.clear();

        let names = todo.field_names();
        assert_eq!(&names[..6], &NAMED_FIELDS.map(String::from));
        assert!(names.contains(&"status".to_string()));
    }

    #[test]
    fn test_project_todoset_id() {
        let project: Project = serde_json::from_value(json!({
            "id": 1,
            "name": "Launch",
            "dock": [
                {"id": 10, "name": "message_board", "enabled": true},
                {"id": 11, "name": "todoset", "enabled": true}
            ]
        }))
        .unwrap();

        assert_eq!(project.todoset_id(), Some(11));
    }

    #[test]
    fn test_project_todoset_disabled() {
        let project: Project = serde_json::from_value(json!({
            "id": 1,
            "name": "Launch",
            "dock": [{"id": 11, "name": "todoset", "enabled": false}]
        }))
        .unwrap();

        assert_eq!(project.todoset_id(), None);
    }

    #[test]
    fn test_todolist_display_name_falls_back_to_title() {
        let list: TodoList =
            serde_json::from_value(json!({"id": 3, "title": "Group A"})).unwrap();
        assert_eq!(list.display_name(), "Group A");
    }

    #[test]
    fn test_todo_null_fields_default_to_empty() {
        let todo = Todo::from_value(json!({
            "id": 1,
            "title": null,
            "description": null,
            "app_url": null,
            "assignees": null,
            "creator": {"id": 1, "name": "J"}
        }))
        .unwrap();

        assert_eq!(todo.title, "");
        assert_eq!(todo.description, "");
        assert_eq!(todo.app_url, "");
        assert_eq!(todo.assignees, Assignees::default());
    }

    #[test]
    fn test_todo_missing_or_null_creator() {
        let missing = Todo::from_value(json!({"id": 1, "title": "t"})).unwrap();
        let null = Todo::from_value(json!({"id": 2, "title": "t", "creator": null})).unwrap();

        assert_eq!(missing.creator, None);
        assert_eq!(null.creator, None);
        assert_eq!(null.field_value("creator"), Some(Value::Null));
    }

    #[test]
    fn test_person_keeps_raw_object() {
        let raw = json!({"name": "Jane", "email_address": null, "avatar_url": "a.png"});
        let person: Person = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(person.id(), None);
        assert_eq!(person.email_address(), None);
        assert_eq!(serde_json::to_value(&person).unwrap(), raw);
        assert_eq!(
            serde_json::to_string(&person).unwrap(),
            r#"{"name":"Jane","email_address":null,"avatar_url":"a.png"}"#
        );
    }

    #[test]
    fn test_creator_cell_matches_source() {
        let todo = Todo::from_value(json!({
            "id": 1,
            "creator": {"name": "Jane", "id": 5, "email_address": null}
        }))
        .unwrap();

        assert_eq!(
            render_value(&todo.field_value("creator").unwrap()),
            r#"{"name":"Jane","id":5,"email_address":null}"#
        );
    }

    #[test]
    fn test_comment_tolerates_nulls() {
        let comment: Comment =
            serde_json::from_value(json!({"id": 3, "creator": null, "content": null})).unwrap();

        assert_eq!(comment.content, "");
        assert_eq!(comment.creator, Person::default());
    }

    #[test]
    fn test_needs_comment_fetch() {
        let mut todo = Todo::from_value(todo_json()).unwrap();
        assert!(todo.needs_comment_fetch());

        todo.extra.insert("comments_count".to_string(), json!(0));
        assert!(!todo.needs_comment_fetch());

        todo.extra.insert("comments_count".to_string(), json!(2));
        assert!(todo.needs_comment_fetch());
    }

    #[test]
    fn test_todolist_endpoints() {
        let list: TodoList = serde_json::from_value(json!({
            "id": 3,
            "name": "Backlog",
            "todos_url": "https://3.basecampapi.com/1/buckets/2/todolists/3/todos.json",
            "groups_url": "https://3.basecampapi.com/1/buckets/2/todolists/3/groups.json"
        }))
        .unwrap();

        assert!(list.todos_url.as_deref().unwrap().ends_with("/todos.json"));
        assert!(list.groups_url.as_deref().unwrap().ends_with("/groups.json"));
    }

    #[test]
    fn test_comments_count() {
        let mut todo = Todo::from_value(todo_json()).unwrap();
        assert_eq!(todo.comments_count(), None);

        todo.extra.insert("comments_count".to_string(), json!(3));
        assert_eq!(todo.comments_count(), Some(3));
    }

    fn list(id: u64, name: &str) -> TodoList {
        serde_json::from_value(json!({"id": id, "name": name})).unwrap()
    }

    fn todo_with_id(id: u64) -> Todo {
        let mut value = todo_json();
        value["id"] = json!(id);
        Todo::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_todos_order() {
        let trees = vec![
            TodoListTree {
                list: list(1, "Backlog"),
                todos: vec![todo_with_id(10), todo_with_id(11)],
                groups: vec![TodoGroup {
                    group: list(2, "Later"),
                    todos: vec![todo_with_id(12)],
                }],
            },
            TodoListTree {
                list: list(3, "Bugs"),
                todos: vec![todo_with_id(13)],
                groups: vec![],
            },
        ];

        assert_eq!(trees[0].todo_count(), 3);

        let ids: Vec<u64> = flatten_todos(trees).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&Value::Null), "");
        assert_eq!(render_value(&json!("text")), "text");
        assert_eq!(render_value(&json!(3)), "3");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!({"id": 1})), r#"{"id":1}"#);
    }
}
