//! `quillctl` — command-line client for the Quill blog API.
//!
//! Two resource groups, each with the same five verbs:
//!
//! - **`posts`** — `list`, `get`, `create`, `update`, `delete`.
//! - **`comments`** — the same, always scoped to a post id.
//!
//! Successful calls print the server's JSON response, pretty-printed.
//! Create and update payloads are checked against the same field rules the
//! server applies before any request is sent.

mod client;

use std::process;

use clap::{Parser, Subcommand};
use quill::{validate_comment, validate_post, CommentDraft, PostDraft, ValidationErrors};
use quill_api::{CommentDto, PageQuery, PostDto};
use serde::Serialize;

use client::{ApiClient, ClientError};

/// quillctl — Quill blog API client
#[derive(Debug, Parser)]
#[command(name = "quillctl", version, about, long_about = None)]
struct Cli {
    /// Base URL of the Quill server.
    #[arg(long, env = "QUILL_URL", default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage posts.
    #[command(subcommand)]
    Posts(PostCommand),

    /// Manage the comments of a post.
    #[command(subcommand)]
    Comments(CommentCommand),
}

#[derive(Debug, Subcommand)]
enum PostCommand {
    /// List one page of posts.
    List {
        #[arg(long)]
        page_no: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        /// id | title | description | content
        #[arg(long)]
        sort_by: Option<String>,
        /// asc | desc
        #[arg(long)]
        sort_dir: Option<String>,
    },
    /// Show one post with its comments.
    Get { id: i64 },
    /// Create a post.
    Create {
        #[command(flatten)]
        fields: PostFields,
    },
    /// Replace the title, description and content of a post.
    Update {
        id: i64,
        #[command(flatten)]
        fields: PostFields,
    },
    /// Delete a post and all of its comments.
    Delete { id: i64 },
}

#[derive(Debug, clap::Args)]
struct PostFields {
    #[arg(short = 't', long)]
    title: String,
    #[arg(short = 'd', long)]
    description: String,
    #[arg(short = 'c', long)]
    content: String,
}

#[derive(Debug, Subcommand)]
enum CommentCommand {
    /// List the comments of a post.
    List { post_id: i64 },
    /// Show one comment.
    Get { post_id: i64, comment_id: i64 },
    /// Add a comment to a post.
    Create {
        post_id: i64,
        #[command(flatten)]
        fields: CommentFields,
    },
    /// Replace the name, email and body of a comment.
    Update {
        post_id: i64,
        comment_id: i64,
        #[command(flatten)]
        fields: CommentFields,
    },
    /// Delete a comment.
    Delete { post_id: i64, comment_id: i64 },
}

#[derive(Debug, clap::Args)]
struct CommentFields {
    #[arg(short = 'n', long)]
    name: String,
    #[arg(short = 'e', long)]
    email: String,
    #[arg(short = 'b', long)]
    body: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("payload is invalid: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to format response: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url);

    match run(&client, cli.command) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            if let CliError::Client(ref ce) = e {
                if let Some(fields) = ce.fields() {
                    for (field, msg) in fields {
                        eprintln!("  {field}: {msg}");
                    }
                }
            }
            fatal(&e.to_string());
        }
    }
}

/// Execute one command and return the text to print.
fn run(client: &ApiClient, command: Command) -> Result<String, CliError> {
    match command {
        Command::Posts(cmd) => match cmd {
            PostCommand::List {
                page_no,
                page_size,
                sort_by,
                sort_dir,
            } => pretty(&client.list_posts(&PageQuery {
                page_no,
                page_size,
                sort_by,
                sort_dir,
            })?),
            PostCommand::Get { id } => pretty(&client.get_post(id)?),
            PostCommand::Create { fields } => {
                let post = post_payload(fields)?;
                pretty(&client.create_post(&post)?)
            }
            PostCommand::Update { id, fields } => {
                let post = post_payload(fields)?;
                pretty(&client.update_post(id, &post)?)
            }
            PostCommand::Delete { id } => {
                client.delete_post(id)?;
                Ok(format!("deleted post {id}"))
            }
        },

        Command::Comments(cmd) => match cmd {
            CommentCommand::List { post_id } => pretty(&client.list_comments(post_id)?),
            CommentCommand::Get {
                post_id,
                comment_id,
            } => pretty(&client.get_comment(post_id, comment_id)?),
            CommentCommand::Create { post_id, fields } => {
                let comment = comment_payload(fields)?;
                pretty(&client.create_comment(post_id, &comment)?)
            }
            CommentCommand::Update {
                post_id,
                comment_id,
                fields,
            } => {
                let comment = comment_payload(fields)?;
                pretty(&client.update_comment(post_id, comment_id, &comment)?)
            }
            CommentCommand::Delete {
                post_id,
                comment_id,
            } => {
                client.delete_comment(post_id, comment_id)?;
                Ok(format!("deleted comment {comment_id} of post {post_id}"))
            }
        },
    }
}

/// Build a post request body, rejecting it locally if the server would.
fn post_payload(fields: PostFields) -> Result<PostDto, ValidationErrors> {
    let draft = PostDraft {
        title: fields.title,
        description: fields.description,
        content: fields.content,
    };
    validate_post(&draft)?;
    Ok(PostDto::new(draft.title, draft.description, draft.content))
}

fn comment_payload(fields: CommentFields) -> Result<CommentDto, ValidationErrors> {
    let draft = CommentDraft {
        name: fields.name,
        email: fields.email,
        body: fields.body,
    };
    validate_comment(&draft)?;
    Ok(CommentDto::new(draft.name, draft.email, draft.body))
}

fn pretty<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("quillctl: {}", msg);
    process::exit(2);
}
