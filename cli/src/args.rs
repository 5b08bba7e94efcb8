//! Command-line flags.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "todoapp")]
#[command(about = "Terminal client for the todo/user REST backend", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides TODO_API_BASE / APP_HOST / APP_PORT)
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// User id new todos are created under (overrides TODO_USER_ID)
    #[arg(long, value_name = "ID")]
    pub user_id: Option<i64>,

    /// Page to open first: /, /todos or /users
    #[arg(long, default_value = "/")]
    pub page: String,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
