use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pdf_chat::Result;
use pdf_chat::commands::{ask, process_documents, show_status};
use pdf_chat::config::{Config, get_config_dir, run_interactive_config, show_config};
use pdf_chat::qa::DEFAULT_TOP_K;

#[derive(Parser)]
#[command(name = "pdf-chat")]
#[command(about = "Index PDF documents and answer questions grounded in their content")]
#[command(version)]
struct Cli {
    /// Directory holding the configuration file and the persisted index
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure Gemini models and chunking settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Extract, chunk, embed, and index one or more PDF files
    Process {
        /// Paths to the PDF files to ingest
        pdfs: Vec<PathBuf>,
    },
    /// Ask a question against the indexed documents
    Ask {
        /// The question to answer
        question: String,
        /// Number of context chunks to retrieve
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
    },
    /// Show configuration and index status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config_dir = match cli.data_dir {
        Some(dir) => dir,
        None => get_config_dir()?,
    };

    // The credential is read from the environment once, here, and handed to
    // the service clients through the config object.
    let api_key = std::env::var("GOOGLE_API_KEY").ok();
    let config = Config::load(&config_dir)?.with_api_key(api_key);

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config(&config)?;
            } else {
                run_interactive_config(config)?;
            }
        }
        Commands::Process { pdfs } => {
            process_documents(&config, &pdfs).await?;
        }
        Commands::Ask { question, top_k } => {
            let answer = ask(&config, &question, top_k).await?;
            println!("{answer}");
        }
        Commands::Status => {
            show_status(&config).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["pdf-chat", "status"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            matches!(parsed.command, Commands::Status);
        }
    }

    #[test]
    fn process_command_with_pdfs() {
        let cli = Cli::try_parse_from(["pdf-chat", "process", "a.pdf", "b.pdf"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Process { pdfs } = parsed.command {
                assert_eq!(pdfs, vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")]);
            }
        }
    }

    #[test]
    fn ask_command_defaults_top_k() {
        let cli = Cli::try_parse_from(["pdf-chat", "ask", "what is this about?"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ask { question, top_k } = parsed.command {
                assert_eq!(question, "what is this about?");
                assert_eq!(top_k, DEFAULT_TOP_K);
            }
        }
    }

    #[test]
    fn ask_command_with_top_k() {
        let cli = Cli::try_parse_from(["pdf-chat", "ask", "question", "--top-k", "8"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ask { top_k, .. } = parsed.command {
                assert_eq!(top_k, 8);
            }
        }
    }

    #[test]
    fn config_show_flag() {
        let cli = Cli::try_parse_from(["pdf-chat", "config", "--show"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Config { show } = parsed.command {
                assert!(show);
            }
        }
    }

    #[test]
    fn data_dir_is_global() {
        let cli = Cli::try_parse_from(["pdf-chat", "status", "--data-dir", "/tmp/elsewhere"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            assert_eq!(parsed.data_dir, Some(PathBuf::from("/tmp/elsewhere")));
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["pdf-chat", "invalid"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["pdf-chat", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
