//! Drive the `todoapp` binary over stdin against a live mock server.

use assert_cmd::Command;
use mock_server::Store;
use predicates::prelude::*;

fn start_server(store: Store) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, store).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn todoapp(base: &str, page: &str) -> Command {
    let mut cmd = Command::cargo_bin("todoapp").unwrap();
    cmd.args(["--api-base", base, "--page", page])
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn add_toggle_and_delete_a_todo() {
    let base = start_server(Store::with_default_user());
    todoapp(&base, "/todos")
        .write_stdin("add buy milk\ntoggle 1\nrm 1\nn\nrm 1\ny\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No todos yet"))
        .stdout(predicate::str::contains("[ ] #1 buy milk"))
        .stdout(predicate::str::contains("[x] #1 buy milk"))
        .stdout(predicate::str::contains("Delete todo #1 \"buy milk\"? [y/N]"));
}

#[test]
fn edit_saves_new_text() {
    let base = start_server(Store::with_default_user());
    todoapp(&base, "/todos")
        .write_stdin("add first draft\nedit 1\nsave final text\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Editing #1: first draft"))
        .stdout(predicate::str::contains("#1 final text"));
}

#[test]
fn duplicate_email_shows_server_detail() {
    let base = start_server(Store::with_default_user());
    todoapp(&base, "/users")
        .write_stdin("useradd demo@example.com Someone\ndismiss 0\nnotices\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[0] create user failed: Email already exists",
        ))
        .stdout(predicate::str::contains("/users> /users> no notices"));
}

#[test]
fn notices_lists_pending_until_dismissed() {
    let base = start_server(Store::with_default_user());
    todoapp(&base, "/users")
        .write_stdin("useradd demo@example.com Someone
notices
dismiss all
notices
quit
")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("/users> ! [0] create user failed: Email already exists")
                .and(predicate::str::contains("/users> /users> no notices")),
        );
}

#[test]
fn home_page_shows_stats() {
    let base = start_server(Store::with_default_user());
    todoapp(&base, "/")
        .write_stdin("todos\nadd one\nhome\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Health: healthy"))
        .stdout(predicate::str::contains("Todos: 1 total, 0 done, 1 pending"));
}

#[test]
fn page_commands_require_their_page() {
    let base = start_server(Store::with_default_user());
    todoapp(&base, "/")
        .write_stdin("add nope\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("`add` works on /todos"));
}

#[test]
fn unreachable_backend_marks_list_stale() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    todoapp(&base, "/todos")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("possibly stale"));
}

#[test]
fn unknown_start_page_fails() {
    Command::cargo_bin("todoapp")
        .unwrap()
        .args(["--page", "/admin"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no page at \"/admin\""));
}
