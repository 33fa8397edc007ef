use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use notepress_config::Config;
use notepress_engine::{Document, RichTextDocument, convert_markdown, convert_rich_text};
use notepress_notion::{BatchPlan, DeliveryError, HttpNotionClient, deliver};

/// Converts markdown (or a rich-text JSON document) into Notion blocks
/// and creates a page from them.
#[derive(Parser, Debug)]
#[command(name = "notepress", version, about)]
struct Cli {
    /// Input file; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Page title. Defaults to the document's first level-1 heading.
    #[arg(long)]
    title: Option<String>,

    /// Parent page id to create the page under. Falls back to the
    /// config file.
    #[arg(long)]
    parent: Option<String>,

    /// API token. Falls back to $NOTION_API_TOKEN, then the config file.
    #[arg(long)]
    token: Option<String>,

    /// Treat the input as a rich-text JSON document instead of markdown.
    #[arg(long)]
    json: bool,

    /// Print the wire JSON that would be sent and exit without any
    /// network calls.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let input = read_input(cli.input.as_deref())?;

    let document = if cli.json {
        let rich: RichTextDocument =
            serde_json::from_str(&input).context("input is not a valid rich-text document")?;
        convert_rich_text(&rich)?
    } else {
        convert_markdown(&input)?
    };

    let title = cli
        .title
        .clone()
        .or_else(|| document.first_heading())
        .unwrap_or_else(|| "Untitled".to_string());

    tracing::info!(blocks = document.len(), title, "input converted");

    if cli.dry_run {
        return dump_plan(document, &title);
    }

    let config = Config::load()?.unwrap_or_default();
    let token = cli
        .token
        .clone()
        .or_else(|| config.resolved_token())
        .context("no API token: pass --token, set NOTION_API_TOKEN, or configure api_token")?;
    let parent = cli
        .parent
        .clone()
        .or(config.parent_page_id)
        .context("no parent page: pass --parent or configure parent_page_id")?;

    let client = HttpNotionClient::new(token);
    match deliver(&client, document, &parent, &title) {
        Ok(page) => {
            tracing::info!(page_id = %page.page_id, chunks = page.chunks_sent, "delivery complete");
            println!(
                "created {} ({} chunk{})",
                page.url.as_deref().unwrap_or(&page.page_id),
                page.chunks_sent,
                if page.chunks_sent == 1 { "" } else { "s" }
            );
            Ok(())
        }
        Err(err @ DeliveryError::AppendFailed { .. }) => {
            // The page exists with partial content; tell the user where.
            tracing::error!(
                page_id = err.page_id().unwrap_or("<unknown>"),
                "partial delivery: page exists with incomplete content"
            );
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            if buf.trim().is_empty() {
                bail!("no input on stdin");
            }
            Ok(buf)
        }
    }
}

/// Prints the exact call sequence the orchestrator would issue.
fn dump_plan(document: Document, title: &str) -> Result<()> {
    let plan = BatchPlan::new(document);
    for (i, chunk) in plan.chunks().iter().enumerate() {
        let call = if i == 0 {
            serde_json::json!({
                "call": "create_page",
                "title": title,
                "children": chunk,
            })
        } else {
            serde_json::json!({
                "call": "append_children",
                "chunk": i,
                "children": chunk,
            })
        };
        println!("{}", serde_json::to_string_pretty(&call)?);
    }
    Ok(())
}
