use anyhow::Result;
use clap::Parser;
use medbot::cli::{Cli, Commands};
use medbot::{
    utils, ChatController, RequestGateway, SendOutcome, Settings, UploadCandidate, UploadOutcome,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { prompt } => handle_chat(&settings, prompt).await,
        Commands::Interactive => handle_interactive(&settings).await,
        Commands::Upload { files } => handle_upload(&settings, files).await,
        Commands::Docs => handle_docs(&settings).await,
        Commands::Health { watch } => handle_health(&settings, watch).await,
    }
}

async fn handle_chat(settings: &Settings, prompt: String) -> Result<()> {
    let mut controller = ChatController::new(settings);

    match controller.send_message(&prompt).await? {
        SendOutcome::Completed(reply) => {
            println!("{}", reply.text);
        }
        // A one-shot send starts from an idle conversation; these cannot
        // happen here.
        SendOutcome::Busy | SendOutcome::Superseded => {}
    }

    Ok(())
}

async fn handle_interactive(settings: &Settings) -> Result<()> {
    utils::print_header("MedBot Interactive Chat");
    utils::print_info("Type your messages (Ctrl+C to exit)");
    utils::print_info("Type /help for commands\n");

    let mut controller = ChatController::new(settings);

    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin);

    loop {
        utils::print_prompt("You: ");
        let mut input = String::new();
        if reader.read_line(&mut input).await? == 0 {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(rest) = input.strip_prefix("/upload") {
            let candidates: Vec<UploadCandidate> = rest
                .split_whitespace()
                .map(UploadCandidate::from_path)
                .collect();
            if candidates.is_empty() {
                utils::print_warning("Usage: /upload <file.pdf> [more.pdf ...]");
                continue;
            }
            let outcomes = controller.upload_files(candidates).await;
            report_upload(&outcomes);
            println!();
            continue;
        }

        if input == "/docs" {
            let documents = controller.documents();
            if documents.is_empty() {
                utils::print_info("No documents uploaded yet");
            } else {
                for doc in documents {
                    println!(
                        "  {} ({:.1} MB)",
                        doc.name,
                        doc.size_bytes as f64 / 1024.0 / 1024.0
                    );
                }
            }
            println!();
            continue;
        }

        if input == "/new" {
            controller.start_new_chat().await;
            utils::print_success("Started a new conversation\n");
            continue;
        }

        if input == "/help" {
            println!("Special commands:");
            println!("  /upload <files>  - Upload PDF documents");
            println!("  /docs            - List uploaded documents");
            println!("  /new             - Start a new conversation");
            println!("  /help            - Show this help");
            println!("  Ctrl+C           - Exit\n");
            continue;
        }

        match controller.send_message(input).await {
            Ok(SendOutcome::Completed(reply)) => {
                utils::print_info("MedBot:");
                println!("{}\n", reply.text);
            }
            Ok(SendOutcome::Busy) => {
                utils::print_warning("Still waiting for the previous reply\n");
            }
            Ok(SendOutcome::Superseded) => {}
            Err(error) => {
                utils::print_warning(&format!("Message not sent: {}\n", error));
            }
        }
    }

    Ok(())
}

async fn handle_upload(settings: &Settings, files: Vec<String>) -> Result<()> {
    let mut controller = ChatController::new(settings);

    let candidates = files.into_iter().map(UploadCandidate::from_path).collect();
    let outcomes = controller.upload_files(candidates).await;
    report_upload(&outcomes);

    utils::print_info(&format!(
        "{} document(s) in the conversation context",
        controller.documents().len()
    ));
    Ok(())
}

fn report_upload(outcomes: &[UploadOutcome]) {
    if outcomes.is_empty() {
        utils::print_warning("No PDF files in that batch");
        return;
    }
    for outcome in outcomes {
        if outcome.uploaded {
            utils::print_success(&format!("  Uploaded {}", outcome.name));
        } else {
            utils::print_warning(&format!("  Skipped {}", outcome.name));
        }
    }
}

async fn handle_docs(settings: &Settings) -> Result<()> {
    let gateway = RequestGateway::new(settings);

    let documents = gateway.list_documents().await?;
    if documents.is_empty() {
        utils::print_info("The service has no ingested documents");
    } else {
        utils::print_header("Ingested documents");
        for name in documents {
            println!("  {}", name);
        }
    }
    Ok(())
}

async fn handle_health(settings: &Settings, watch: Option<u64>) -> Result<()> {
    let gateway = RequestGateway::new(settings);

    loop {
        match gateway.health().await {
            Ok(health) => {
                utils::print_success(&format!("{}: {}", health.status, health.message));
            }
            Err(error) => {
                utils::print_error(&format!("Service unreachable: {}", error));
            }
        }

        if let Some(interval) = watch {
            tokio::time::sleep(tokio::time::Duration::from_secs(interval)).await;
            // Clear screen (works on most terminals)
            print!("\x1B[2J\x1B[1;1H");
        } else {
            break;
        }
    }

    Ok(())
}
