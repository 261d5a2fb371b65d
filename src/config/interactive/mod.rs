
use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input};

use super::{Config, GeminiConfig};
use crate::embeddings::chunking::ChunkingConfig;

#[inline]
pub fn run_interactive_config(mut config: Config) -> Result<()> {
    eprintln!("{}", style("🔧 PDF Chat Configuration Setup").bold().cyan());
    eprintln!();

    eprintln!("{}", style("Gemini Configuration").bold().yellow());
    eprintln!("Configure the models used for embedding and answer generation.");
    eprintln!("The API key itself is read from GOOGLE_API_KEY at startup, not stored here.");
    eprintln!();

    configure_gemini(&mut config.gemini)?;

    eprintln!();
    eprintln!("{}", style("Chunking Configuration").bold().yellow());
    configure_chunking(&mut config.chunking)?;

    eprintln!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        eprintln!("{}", style("✓ Configuration saved successfully!").green());
        eprintln!(
            "Configuration saved to: {}",
            style(config.config_file_path().display()).cyan()
        );
    } else {
        eprintln!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config(config: &Config) -> Result<()> {
    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();
    eprint!("{}", render_config(config));
    eprintln!();
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );

    Ok(())
}

fn render_config(config: &Config) -> String {
    let api_key_status = if config.gemini.api_key.is_some() {
        "set"
    } else {
        "not set (export GOOGLE_API_KEY)"
    };

    format!(
        "Gemini Settings:\n\
         \x20 API Base: {}\n\
         \x20 API Key: {}\n\
         \x20 Embedding Model: {}\n\
         \x20 Generation Model: {}\n\
         \x20 Batch Size: {}\n\
         \x20 Temperature: {}\n\
         Chunking Settings:\n\
         \x20 Max Chunk Size: {}\n\
         \x20 Overlap Size: {}\n\
         Index Location: {}\n",
        config.gemini.api_base,
        api_key_status,
        config.gemini.embedding_model,
        config.gemini.generation_model,
        config.gemini.batch_size,
        config.gemini.temperature,
        config.chunking.max_chunk_size,
        config.chunking.overlap_size,
        config.index_path().display(),
    )
}

fn configure_gemini(gemini: &mut GeminiConfig) -> Result<()> {
    gemini.embedding_model = Input::new()
        .with_prompt("Embedding model")
        .default(gemini.embedding_model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    gemini.generation_model = Input::new()
        .with_prompt("Generation model")
        .default(gemini.generation_model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    gemini.batch_size = Input::new()
        .with_prompt("Embedding batch size")
        .default(gemini.batch_size)
        .validate_with(|input: &u32| -> Result<(), &str> {
            if *input == 0 || *input > 100 {
                Err("Batch size must be between 1 and 100")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    gemini.temperature = Input::new()
        .with_prompt("Generation temperature")
        .default(gemini.temperature)
        .validate_with(|input: &f32| -> Result<(), &str> {
            if (0.0..=2.0).contains(input) {
                Ok(())
            } else {
                Err("Temperature must be between 0.0 and 2.0")
            }
        })
        .interact_text()?;

    Ok(())
}

fn configure_chunking(chunking: &mut ChunkingConfig) -> Result<()> {
    chunking.max_chunk_size = Input::new()
        .with_prompt("Max chunk size (characters)")
        .default(chunking.max_chunk_size)
        .validate_with(|input: &usize| -> Result<(), &str> {
            if *input == 0 {
                Err("Max chunk size cannot be zero")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let max_chunk_size = chunking.max_chunk_size;
    chunking.overlap_size = Input::new()
        .with_prompt("Chunk overlap (characters)")
        .default(chunking.overlap_size.min(max_chunk_size - 1))
        .validate_with(move |input: &usize| -> Result<(), String> {
            if *input >= max_chunk_size {
                Err(format!(
                    "Overlap must be smaller than the max chunk size ({max_chunk_size})"
                ))
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    Ok(())
}
