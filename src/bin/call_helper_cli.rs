//! call-helper-cli: command-line front end for the call-helper backend
//!
//! Usage:
//!   call-helper-cli health                                  Probe the backend
//!   call-helper-cli resolve <name> <user_type> <issue...>   Find the best matching case
//!   call-helper-cli chat [--user-type <type>]               Interactive chat session
//!   call-helper-cli search <name> <caller_type> <issue...>  Form-based search
//!   call-helper-cli stats                                   Dashboard statistics

use anyhow::{bail, Context};
use call_helper_client::analytics::AnalyticsClient;
use call_helper_client::chat::{ChatClient, ChatRole, DEFAULT_USER_TYPE};
use call_helper_client::normalize::{is_retryable, user_message};
use call_helper_client::resolve::{ResolveClient, ResolveRequest};
use call_helper_client::search::{SearchClient, SearchRequest};
use call_helper_client::state::{ChatController, ResolveController};
use call_helper_client::{ApiClient, ApiError};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "version" | "--version" | "-V" => {
            println!("call-helper-cli {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        _ => {}
    }

    let api = Arc::new(ApiClient::from_env().context("failed to configure API client")?);

    match args[1].as_str() {
        "health" => cmd_health(&api).await,
        "resolve" => cmd_resolve(api, &args[2..]).await,
        "chat" => cmd_chat(api, &args[2..]).await,
        "search" => cmd_search(api, &args[2..]).await,
        "stats" => cmd_stats(api).await,
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"call-helper-cli: call-helper command-line client

USAGE:
    call-helper-cli <COMMAND> [ARGS]

COMMANDS:
    health                                  Probe the backend (GET /)
    resolve <name> <user_type> <issue...>   Best matching case plus alternatives
    chat [--user-type <type>]               Interactive chat (empty line quits)
    search <name> <caller_type> <issue...>  Form-based search
    stats                                   Dashboard statistics
    version                                 Show version information
    help                                    Show this help message

ENVIRONMENT:
    CALL_HELPER_API_URL                     Backend origin (default http://localhost:5000)
    RUST_LOG                                Log filter (default warn)"#
    );
}

fn report(err: &ApiError) -> anyhow::Error {
    let hint = if is_retryable(err) {
        " (retryable)"
    } else {
        ""
    };
    anyhow::anyhow!("{}{} [{}]", user_message(err), hint, err)
}

async fn cmd_health(api: &ApiClient) -> anyhow::Result<()> {
    if api.check_health().await {
        println!("{} is healthy", api.base_url());
        Ok(())
    } else {
        bail!("{} is not reachable", api.base_url())
    }
}

async fn cmd_resolve(api: Arc<ApiClient>, args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        bail!("usage: resolve <name> <user_type> <issue...>");
    }
    let request =
        ResolveRequest::new(&args[0], &args[1], args[2..].join(" ")).with_alternatives(true);
    let controller = ResolveController::new(ResolveClient::new(api));
    let resp = controller.resolve(&request).await.map_err(|e| report(&e))?;

    if !resp.success {
        println!("{}", resp.message);
        return Ok(());
    }
    let state = controller.state();
    for (i, m) in state.alternatives.iter().enumerate() {
        let accuracy = m
            .accuracy_percent()
            .map(|p| format!("{p}%"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "#{} [{}] {} / {} ({})",
            i + 1,
            m.case_id.as_deref().unwrap_or("?"),
            m.category.as_deref().unwrap_or("-"),
            m.subcategory.as_deref().unwrap_or("-"),
            accuracy
        );
        println!("{}", m.display_text().unwrap_or_default());
        if let Some(why) = &m.why {
            println!("  why: {why}");
        }
        println!();
    }
    Ok(())
}

async fn cmd_chat(api: Arc<ApiClient>, args: &[String]) -> anyhow::Result<()> {
    let user_type = match args {
        [flag, value, ..] if flag == "--user-type" => value.clone(),
        _ => DEFAULT_USER_TYPE.to_string(),
    };
    let controller = ChatController::new(ChatClient::new(api), user_type);

    let welcome = controller.init_chat().await.map_err(|e| report(&e))?;
    print_bot(&welcome.response, &welcome.quick_replies);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let text = line.trim();
        if text.is_empty() {
            break;
        }
        match controller.send_message(text).await {
            Ok(resp) => print_bot(&resp.response, &resp.quick_replies),
            Err(e) => eprintln!("! {}", user_message(&e)),
        }
    }

    let state = controller.state();
    let sent = state
        .messages
        .iter()
        .filter(|e| e.role() == ChatRole::User)
        .count();
    eprintln!(
        "session {} ended after {} message(s)",
        state.session_id.as_deref().unwrap_or("-"),
        sent
    );
    Ok(())
}

fn print_prompt() {
    use std::io::Write;
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_bot(text: &str, quick_replies: &[String]) {
    println!("{text}");
    for reply in quick_replies {
        println!("  * {reply}");
    }
}

async fn cmd_search(api: Arc<ApiClient>, args: &[String]) -> anyhow::Result<()> {
    if args.len() < 3 {
        bail!("usage: search <name> <caller_type> <issue...>");
    }
    let request = SearchRequest::new(&args[0], &args[1], args[2..].join(" "));
    let resp = SearchClient::new(api)
        .search(&request)
        .await
        .map_err(|e| report(&e.to_api_error()))?;
    match (resp.error, resp.result) {
        (Some(error), _) => bail!("{error}"),
        (None, Some(result)) => println!("{result}"),
        (None, None) => println!("(empty result)"),
    }
    Ok(())
}

async fn cmd_stats(api: Arc<ApiClient>) -> anyhow::Result<()> {
    let snapshot = AnalyticsClient::new(api)
        .dashboard()
        .await
        .map_err(|e| report(&e.to_api_error()))?;
    let stats = &snapshot.stats;
    println!("total queries:     {}", stats.total_queries);
    println!(
        "today / week / 30d: {} / {} / {}",
        stats.today_queries, stats.week_queries, stats.month_queries
    );
    println!(
        "success rate:      {:.2}% ({} ok, {} failed)",
        stats.success_rate,
        stats.successful_queries(),
        stats.failed_queries()
    );
    println!("avg response time: {:.2} ms", stats.avg_response_time_ms);
    if !snapshot.popular.is_empty() {
        println!("\npopular:");
        for q in &snapshot.popular {
            println!("  {:>4}  {}", q.count, q.query.as_deref().unwrap_or("-"));
        }
    }
    if !snapshot.recent.is_empty() {
        println!("\nrecent:");
        for q in &snapshot.recent {
            let ok = match q.success {
                Some(true) => "ok",
                Some(false) => "miss",
                None => "?",
            };
            println!(
                "  {:<4} {}  {}",
                ok,
                q.timestamp.as_deref().unwrap_or("-"),
                q.query.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}
