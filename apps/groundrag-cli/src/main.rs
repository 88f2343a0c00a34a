//! `groundrag`: build a corpus, ask questions, chat, or serve the HTTP gateway.

mod runtime;
mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use groundrag_core::config::{expand_path, Config, Settings};
use groundrag_core::data_processor::DataProcessor;
use groundrag_core::types::{Answer, HistoryEntry, Sender};
use groundrag_server::AppState;
use groundrag_session::InMemorySessionRepository;
use groundrag_vector::CorpusWriter;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Debug, Parser)]
#[command(name = "groundrag", version, about = "Grounded question answering over a fixed text corpus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Embed .txt/.md documents into a corpus file
    Index {
        /// Directory of source documents (defaults to data.docs_dir)
        docs_dir: Option<PathBuf>,
        /// Output corpus path (defaults to data.corpus_path)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Split documents into chunks of at most N characters
        #[arg(long)]
        chunk_chars: Option<usize>,
    },
    /// Answer one question and exit
    Ask {
        question: String,
        #[arg(long)]
        extractive_only: bool,
    },
    /// Interactive question loop with conversation memory
    Chat {
        #[arg(long)]
        extractive_only: bool,
    },
    /// Run the HTTP gateway
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        extractive_only: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();
    let cli = Cli::parse();
    let settings = Config::load()?.settings()?;

    match cli.command {
        Command::Index { docs_dir, out, chunk_chars } => index(&settings, docs_dir, out, chunk_chars),
        Command::Ask { question, extractive_only } => ask(&settings, &question, extractive_only).await,
        Command::Chat { extractive_only } => chat(&settings, extractive_only).await,
        Command::Serve { host, port, extractive_only } => serve(&settings, host, port, extractive_only).await,
    }
}

fn index(settings: &Settings, docs_dir: Option<PathBuf>, out: Option<PathBuf>, chunk_chars: Option<usize>) -> Result<()> {
    let docs_dir = docs_dir.unwrap_or_else(|| expand_path(&settings.data.docs_dir));
    let out = out.unwrap_or_else(|| expand_path(&settings.data.corpus_path));
    let chunk_chars = chunk_chars.or(settings.data.chunk_chars);

    println!("groundrag indexer\n=================");
    println!("Documents: {}", docs_dir.display());
    println!("Corpus:    {}", out.display());

    let chunks = DataProcessor::with_chunk_chars(chunk_chars).process_directory(&docs_dir)?;
    if chunks.is_empty() {
        println!("No non-empty .txt/.md files found; writing an empty corpus.");
    }
    let embedder = runtime::load_embedder()?;
    let written = CorpusWriter::new(embedder.as_ref()).write(&chunks, &out)?;
    println!("\n✅ Wrote {written} chunks (dim {})", embedder.dim());
    Ok(())
}

fn print_answer(answer: &Answer) {
    println!("{}", answer.answer);
    let how = if answer.refused {
        "refused"
    } else if answer.used_generator {
        "generated, verified verbatim"
    } else {
        "extractive"
    };
    println!("[{how}]");
}

async fn ask(settings: &Settings, question: &str, extractive_only: bool) -> Result<()> {
    let question = question.trim();
    anyhow::ensure!(!question.is_empty(), "question is required");
    let engine = runtime::build_engine(settings, extractive_only)?;
    let answer = engine.answer(question, &[]).await?;
    print_answer(&answer);
    Ok(())
}

async fn chat(settings: &Settings, extractive_only: bool) -> Result<()> {
    let engine = runtime::build_engine(settings, extractive_only)?;
    let history_limit = settings.rag.history_limit;
    let mut history: Vec<HistoryEntry> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    println!("{}\n(type 'exit' to quit)", settings.sessions.welcome_message);
    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else { break };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question, "exit" | "quit") {
            break;
        }
        match engine.answer(question, &history).await {
            Ok(answer) => {
                print_answer(&answer);
                if !answer.refused {
                    history.push(HistoryEntry::new(Sender::User, question));
                    history.push(HistoryEntry::new(Sender::Ai, answer.answer));
                    let excess = history.len().saturating_sub(history_limit);
                    history.drain(..excess);
                }
            }
            Err(e) => eprintln!("error: {e}"),
        }
    }
    Ok(())
}

async fn serve(settings: &Settings, host: Option<String>, port: Option<u16>, extractive_only: bool) -> Result<()> {
    let engine = runtime::build_engine(settings, extractive_only)?;
    let state = AppState::new(
        Arc::new(engine),
        Arc::new(InMemorySessionRepository::new()),
        &settings.sessions.welcome_message,
    );
    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    groundrag_server::serve(state, &host, port).await
}
