use baseport_core::basecamp::{Todo, TodoListTree};
use colored::Colorize;

use crate::basecamp::BasecampClient;
use crate::prelude::{println, *};

/// Options for showing to-dos
#[derive(Debug, clap::Args, Clone)]
pub struct ShowOptions {
    /// Project ID
    #[arg(short, long)]
    pub project: u64,

    /// To-do list ID; all lists in the project when omitted
    #[arg(short, long)]
    pub list: Option<u64>,
}

/// Handle the show command
pub async fn handler(options: ShowOptions, client: &BasecampClient) -> Result<()> {
    let trees = client
        .fetch_list_trees(options.project, options.list)
        .await?;

    println!("{}", render_trees(&trees));

    Ok(())
}

fn todo_line(todo: &Todo, indent: &str) -> String {
    let completed = todo
        .extra
        .get("completed")
        .and_then(serde_json::Value::as_bool)
        .unwrap_or(false);

    if completed {
        f!("{indent}- {}", todo.title.bright_black().strikethrough())
    } else {
        f!("{indent}- {}", todo.title)
    }
}

/// Render lists as a nested outline: lists, their to-dos, then each group
fn render_trees(trees: &[TodoListTree]) -> String {
    let mut lines = vec![f!("To-dos from {} to-do lists:", trees.len())];

    for tree in trees {
        lines.push(f!("## {}", tree.list.display_name().bold().cyan()));

        for todo in &tree.todos {
            lines.push(todo_line(todo, "  "));
        }

        for group in &tree.groups {
            lines.push(f!(
                "  - {} {}",
                "GROUP:".magenta(),
                group.group.display_name().bold()
            ));
            for todo in &group.todos {
                lines.push(todo_line(todo, "    "));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use baseport_core::basecamp::{TodoGroup, TodoList};
    use serde_json::json;

    fn list(id: u64, name: &str) -> TodoList {
        serde_json::from_value(json!({"id": id, "name": name})).unwrap()
    }

    fn todo(id: u64, title: &str, completed: bool) -> Todo {
        Todo::from_value(json!({
            "id": id,
            "title": title,
            "completed": completed,
            "creator": {"id": 1, "name": "Jane"}
        }))
        .unwrap()
    }

    #[test]
    fn test_render_trees_outline() {
        colored::control::set_override(false);
        let trees = vec![TodoListTree {
            list: list(1, "Backlog"),
            todos: vec![todo(10, "Write docs", false)],
            groups: vec![TodoGroup {
                group: list(2, "Later"),
                todos: vec![todo(11, "Refactor", true)],
            }],
        }];

        let rendered = render_trees(&trees);

        assert_eq!(
            rendered,
            "To-dos from 1 to-do lists:\n## Backlog\n  - Write docs\n  - GROUP: Later\n    - Refactor"
        );
    }

    #[test]
    fn test_render_trees_empty() {
        assert_eq!(render_trees(&[]), "To-dos from 0 to-do lists:");
    }
}
