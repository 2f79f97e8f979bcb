// SPDX-License-Identifier: Apache-2.0

//! Operator console
//!
//! Interactive loop over the agent's tool surface. Every statement typed
//! here takes the same path an LLM-generated one would: through the query
//! gate, then (only if permitted) to Postgres.

use std::io::Write as _;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

use dojo_agent::config::AppConfig;
use dojo_agent::{observability, AppState};
use dojo_core::AgentResult;

#[derive(Debug, PartialEq)]
enum Command {
    Quit,
    Schema(Option<String>),
    Select(String),
    Sms { to: String, body: String },
    Sql(String),
    Invalid(&'static str),
}

fn parse_command(line: &str) -> Command {
    let Some(rest) = line.strip_prefix('\\') else {
        return Command::Sql(line.to_string());
    };

    let (command, args) = match rest.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (rest, ""),
    };

    match command {
        "q" | "quit" => Command::Quit,
        "schema" => Command::Schema((!args.is_empty()).then(|| args.to_string())),
        "select" => {
            if args.is_empty() {
                Command::Invalid("usage: \\select <statement>")
            } else {
                Command::Select(args.to_string())
            }
        }
        "sms" => match args.split_once(char::is_whitespace) {
            Some((to, body)) if !body.trim().is_empty() => Command::Sms {
                to: to.to_string(),
                body: body.trim().to_string(),
            },
            _ => Command::Invalid("usage: \\sms <to> <body>"),
        },
        _ => Command::Invalid("unknown command; try \\schema, \\select, \\sms, or \\quit"),
    }
}

fn print_result(result: AgentResult<serde_json::Value>) {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => println!("{text}"),
            Err(e) => println!("(unprintable result: {e})"),
        },
        Err(e) => println!("error: {e}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    observability::init_tracing();

    let config = AppConfig::from_env()?;
    let state = AppState::new(config)?;
    let tools = state.factory.build_tools();

    println!("dojo-agent console - statements run through the query gate.");
    println!("Commands: \\schema [tables], \\select <stmt>, \\sms <to> <body>, \\quit.");
    println!("Anything else is executed with the run_sql_query tool.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("dojo> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_command(line) {
            Command::Quit => break,
            Command::Schema(tables) => {
                let args = match tables {
                    Some(t) => json!({ "tables": t }),
                    None => json!({}),
                };
                print_result(tools.dispatch("describe_schema", args).await);
            }
            Command::Select(statement) => {
                let result = state.executor.run_select(&statement, &[]).await.map(|output| {
                    json!({
                        "rows": output.rows,
                        "count": output.row_count(),
                        "message": "Query successful",
                    })
                });
                print_result(result);
            }
            Command::Sms { to, body } => {
                print_result(
                    tools
                        .dispatch("send_sms", json!({ "to": to, "body": body }))
                        .await,
                );
            }
            Command::Sql(statement) => {
                print_result(
                    tools
                        .dispatch("run_sql_query", json!({ "query": statement }))
                        .await,
                );
            }
            Command::Invalid(usage) => println!("{usage}"),
        }
    }

    Ok(())
}
