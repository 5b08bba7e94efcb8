//! Text views of the three pages.

use std::fmt::Write;

use chrono::{DateTime, NaiveDateTime};
use colored::Colorize;
use todoapp_core::{HomePage, Notices, Todo, TodosPage, Transport, UsersPage};

/// Render a server timestamp as `YYYY-MM-DD HH:MM`, or as-is if unparseable.
pub fn timestamp(raw: &str) -> String {
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

fn stale_banner(out: &mut String) {
    let _ = writeln!(
        out,
        "{}",
        "(possibly stale: the last refresh failed)".yellow()
    );
}

fn todo_line(out: &mut String, todo: &Todo) {
    let mark = if todo.completed { "[x]" } else { "[ ]" };
    let task = if todo.completed {
        todo.task.strikethrough().dimmed()
    } else {
        todo.task.bold()
    };
    let _ = writeln!(
        out,
        "  {mark} #{} {task}  {}",
        todo.id,
        format!("created {}", timestamp(&todo.created_at)).dimmed()
    );
}

pub fn notices(notices: &Notices) -> String {
    let mut out = String::new();
    for (index, notice) in notices.iter().enumerate() {
        let _ = writeln!(out, "{} [{index}] {notice}", "!".red().bold());
    }
    out
}

pub fn home<T: Transport>(page: &HomePage<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Todo App".bold());
    let _ = writeln!(out, "API: {}", page.api_base());
    if page.is_stale() {
        stale_banner(&mut out);
    }
    match page.health() {
        Some(health) if health.is_healthy() => {
            let _ = writeln!(out, "Health: {}", "healthy".green());
        }
        Some(health) => {
            let reason = health.error.as_deref().unwrap_or(&health.status);
            let _ = writeln!(out, "Health: {}", reason.red());
        }
        None => {
            let _ = writeln!(out, "Health: unknown");
        }
    }
    if let Some(stats) = page.stats() {
        let _ = writeln!(
            out,
            "Todos: {} total, {} done, {} pending",
            stats.total, stats.completed, stats.pending
        );
    }
    for row in page.user_stats() {
        let _ = writeln!(
            out,
            "  #{} {} <{}>: {} total, {} done, {} pending",
            row.id, row.name, row.email, row.total_todos, row.completed_todos, row.pending_todos
        );
    }
    let _ = writeln!(out, "Pages: /todos  /users");
    out
}

pub fn todos<T: Transport>(page: &TodosPage<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Todos".bold());
    let list = page.todos();
    if list.is_stale() {
        stale_banner(&mut out);
    }
    if list.is_empty() {
        let _ = writeln!(out, "  No todos yet. Add one with `add <task>`.");
    }
    for todo in list.items() {
        todo_line(&mut out, todo);
    }
    if let Some(edit) = page.form().editing() {
        let _ = writeln!(out, "Editing #{}: {}", edit.id, edit.text.cyan());
    }
    out
}

pub fn users<T: Transport>(page: &UsersPage<T>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Users".bold());
    let list = page.users();
    if list.is_stale() {
        stale_banner(&mut out);
    }
    if list.is_empty() {
        let _ = writeln!(out, "  No users yet. Add one with `useradd <email> <name>`.");
    }
    for user in list.items() {
        let _ = writeln!(
            out,
            "  #{} {} <{}>  {}",
            user.id,
            user.name.bold(),
            user.email,
            timestamp(&user.created_at).dimmed()
        );
    }
    if let Some(id) = page.selected_id() {
        let name = page.selected().map(|u| u.name.as_str()).unwrap_or("unknown user");
        let _ = writeln!(out, "Todos of #{id} {name}:");
        let todos = page.selected_todos();
        if todos.is_stale() {
            stale_banner(&mut out);
        }
        if todos.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for todo in todos.items() {
            todo_line(&mut out, todo);
        }
    }
    out
}
