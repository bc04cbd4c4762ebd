use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_dba::llms::OpenAi;
use core_dba::{chat_reply, generate_schema, prepare_diagram, setup_logging};

#[derive(Parser)]
#[command(name = "db-architect")]
#[command(about = "Generate database schemas from plain-text descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a full schema bundle from a description
    Generate {
        /// Plain-text description of the database
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// File containing the description
        #[arg(short, long, value_parser = validate_input_file)]
        file: Option<PathBuf>,

        /// Write the JSON result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Send one chat message and print the reply
    Chat {
        /// The message to send
        #[arg(short, long)]
        message: String,
    },

    /// Check that a file holds a valid erDiagram string
    ValidateDiagram {
        #[arg(short, long, value_parser = validate_input_file)]
        file: PathBuf,
    },
}

fn validate_input_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if !path.exists() {
        return Err(format!("Input path does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Input path is not a file: {}", path.display()));
    }

    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging("core_dba=info");

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate { text, file, output } => {
            let description = match (text, file) {
                (Some(text), _) => text,
                (None, Some(file)) => std::fs::read_to_string(&file)?,
                (None, None) => anyhow::bail!("one of --text or --file is required"),
            };

            let provider = OpenAi::from_env();
            let generated = generate_schema(&provider, &description).await?;
            let json = serde_json::to_string_pretty(&generated)?;

            match output {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{}", json),
            }
        }

        Commands::Chat { message } => {
            let provider = OpenAi::from_env();
            let reply = chat_reply(&provider, &message).await?;
            println!("{}", reply);
        }

        Commands::ValidateDiagram { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let validated = prepare_diagram(&raw)?;
            println!("{}", validated);
        }
    }

    Ok(())
}
