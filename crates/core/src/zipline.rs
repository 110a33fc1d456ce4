//! Zipline formatting rules for to-dos bound for Jira
//!
//! Users are referred to by bold email mentions on the new domain, only the
//! first assignee is kept, and the description is rebuilt to link back to
//! Basecamp and carry the comment thread inline.

use crate::basecamp::{Assignees, Comment, Creator, Person, Todo};
use crate::markup::render_rich_text;

/// Email domain used by Basecamp accounts
pub const SOURCE_DOMAIN: &str = "retailzipline.com";

/// Email domain used by the destination tracker
pub const TARGET_DOMAIN: &str = "zipline.inc";

/// Rewrite the Basecamp email domain to the destination one
///
/// Case-sensitive, first occurrence only. Other addresses pass through.
pub fn rewrite_domain(email: &str) -> String {
    email.replacen(SOURCE_DOMAIN, TARGET_DOMAIN, 1)
}

/// Bold mention for a person, e.g. `**@jane@zipline.inc**`
///
/// Falls back to the display name for people without an email address.
pub fn user_mention(person: &Person) -> String {
    let handle = match person.email_address() {
        Some(email) => rewrite_domain(email),
        None => person.name().to_string(),
    };
    format!("**@{handle}**")
}

/// One comment line: `<mention>: <plain text content>`
pub fn format_comment(comment: &Comment) -> String {
    format!(
        "{}: {}",
        user_mention(&comment.creator),
        render_rich_text(&comment.content)
    )
}

/// Build the imported description block
pub fn format_description(todo: &Todo) -> String {
    let comments = todo
        .comments
        .iter()
        .map(format_comment)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "This issue has been imported from Basecamp automatically. [Here's the original Basecamp To-do!]({app_url})\n\
         \n\
         {description}\n\
         \n\
         ---\n\
         \n\
         ### Comments\n\
         \n\
         {comments}\n",
        app_url = todo.app_url,
        description = render_rich_text(&todo.description),
    )
}

/// Apply the Zipline rewrites to a single to-do
pub fn format_todo(mut todo: Todo) -> Todo {
    if let Some(Creator::Person(person)) = &todo.creator {
        todo.creator = Some(Creator::Mention(user_mention(person)));
    }

    if let Assignees::People(people) = &todo.assignees {
        let first = people.first().map(user_mention).unwrap_or_default();
        todo.assignees = Assignees::Mention(first);
    }

    todo.description = format_description(&todo);
    todo
}
