//! Kennel CLI
//!
//! Runs the Kennel server and talks to it from the command line.

mod client;

use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kennel_api::{ApiConfig, ApiServer, RegisterRequest, SearchRequest};
use kennel_core::constants::STATUS_OK;
use kennel_core::types::{MatchMode, Pet, PetFilter};
use kennel_registry::query::Query;
use kennel_registry::{MemoryRegistry, Registry};

use crate::client::KennelClient;

/// Kennel - pet registration and lookup
#[derive(Parser)]
#[command(name = "kennel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Server base URL for client commands
    #[arg(long, global = true, env = "KENNEL_SERVER", default_value = "http://127.0.0.1:3001")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,
        /// Bind address
        #[arg(short, long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Register a pet
    Register {
        #[arg(long)]
        name: String,
        /// Male, Female or Null
        #[arg(long)]
        gender: String,
        #[arg(long, allow_hyphen_values = true)]
        age: String,
        #[arg(long)]
        breed: String,
        /// Image file to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Search pets; any matching field is enough unless --all is given
    Search {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        age: Option<String>,
        #[arg(long)]
        breed: Option<String>,
        /// Require every given field to match
        #[arg(long)]
        all: bool,
        /// Write each result's image into this directory
        #[arg(long)]
        save_images: Option<PathBuf>,
    },

    /// Benchmark registration and search against an in-memory registry
    Bench {
        /// Number of pets to register
        #[arg(short, long, default_value = "10000")]
        count: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "kennel=debug,info"
    } else {
        "kennel=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(port, &bind).await,
        Commands::Register {
            name,
            gender,
            age,
            breed,
            image,
        } => cmd_register(&cli.server, name, gender, age, breed, image.as_deref()).await,
        Commands::Search {
            name,
            gender,
            age,
            breed,
            all,
            save_images,
        } => {
            let request = SearchRequest {
                name,
                gender,
                age: age.map(Value::String),
                breed,
                mode: all.then(|| MatchMode::All.to_string()),
            };
            cmd_search(&cli.server, request, save_images.as_deref()).await
        }
        Commands::Bench { count } => cmd_bench(count).await,
    }
}

/// Run API server
async fn cmd_serve(port: u16, bind: &str) -> Result<()> {
    println!("{}", "🐾 Starting Kennel API server...".cyan().bold());
    println!("   {} http://{}:{}", "Listening on:".green(), bind, port);
    println!("   {} http://{}:{}/health", "Health check:".dimmed(), bind, port);
    println!("\n   Press Ctrl+C to stop.\n");

    let config = ApiConfig::from_env().context("Invalid server configuration")?;
    let server = ApiServer::new(config);

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    server.run(addr).await?;

    Ok(())
}

/// Register a pet on the server
async fn cmd_register(
    server: &str,
    name: String,
    gender: String,
    age: String,
    breed: String,
    image: Option<&Path>,
) -> Result<()> {
    let image = match image {
        Some(path) => Some(
            std::fs::read(path)
                .with_context(|| format!("Failed to read image {}", path.display()))?,
        ),
        None => None,
    };

    let request = RegisterRequest {
        name,
        gender,
        age: Value::String(age),
        breed,
        image: image.map(hex::encode),
    };

    let response = KennelClient::new(server).register(&request).await?;

    if response.status_code == STATUS_OK {
        let record = response
            .record
            .map(|r| r.to_string())
            .unwrap_or_default();
        println!("{} {} {}", "✅".green(), response.message, record.dimmed());
    } else {
        println!(
            "{} {} (status {})",
            "❌ Registration rejected:".red().bold(),
            response.message,
            response.status_code
        );
    }

    Ok(())
}

/// Search the server and print results
async fn cmd_search(server: &str, request: SearchRequest, save_dir: Option<&Path>) -> Result<()> {
    let response = KennelClient::new(server).search(&request).await?;

    if response.pets.is_empty() {
        println!("{}", "No pets found.".yellow());
        return Ok(());
    }

    println!(
        "{} {} pet(s) found ({} mode):",
        "✅".green(),
        response.total,
        response.mode
    );

    if let Some(dir) = save_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let mut saved = HashSet::new();

    for dto in response.pets {
        let pet = Pet::try_from(dto).context("Server returned an invalid image")?;
        println!(
            "   {} {}  {} {}  {} {}  {} {}",
            "name:".dimmed(),
            pet.name,
            "gender:".dimmed(),
            pet.gender,
            "age:".dimmed(),
            pet.age,
            "breed:".dimmed(),
            pet.breed
        );

        if let Some(dir) = save_dir {
            let path = dir.join(image_file_name(&pet, &mut saved));
            std::fs::write(&path, &pet.image)
                .with_context(|| format!("Failed to save image {}", path.display()))?;
            println!("      {} {}", "image:".dimmed(), path.display());
        }
    }

    Ok(())
}

/// File name for a saved image: `<name>, <gender>, <age>, <breed>.jpg`.
///
/// Record fields come from the server, so the result is forced to be a
/// single plain component inside the target directory. Names already in
/// `used` get a numeric suffix instead of overwriting an earlier image.
fn image_file_name(pet: &Pet, used: &mut HashSet<String>) -> String {
    let cleaned: String = pet
        .to_string()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = match cleaned.trim_start_matches('.').trim() {
        "" => "pet".to_string(),
        stem => stem.to_string(),
    };

    let mut file_name = format!("{stem}.jpg");
    let mut suffix = 1;
    while !used.insert(file_name.clone()) {
        file_name = format!("{stem}-{suffix}.jpg");
        suffix += 1;
    }
    file_name
}

/// Run benchmarks
async fn cmd_bench(count: usize) -> Result<()> {
    const BREEDS: [&str; 5] = ["Labrador", "Poodle", "Husky", "Pug", "Corgi"];
    const GENDERS: [&str; 3] = ["Male", "Female", "Null"];

    println!("{} {} pets", "📊 Benchmarking with".cyan().bold(), count);

    println!("\n{}", "1. Registering pets...".dimmed());
    let registry = MemoryRegistry::with_capacity(count);

    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("   [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    for i in 0..count {
        let pet = Pet::new(
            format!("pet-{i}"),
            GENDERS[i % GENDERS.len()],
            (i % 20) as u32,
            BREEDS[i % BREEDS.len()],
        )
        .with_image(vec![(i % 256) as u8; 64]);
        registry.append(pet).await?;
        pb.inc(1);
    }
    pb.finish();
    println!("   ✓ Registered {} pets: {:?}", count, start.elapsed());

    println!("\n{}", "2. Searching...".dimmed());
    let filter = PetFilter::new().breed("Husky").age(7);
    for mode in [MatchMode::Any, MatchMode::All] {
        let start = Instant::now();
        let found = Query::new(filter.clone()).mode(mode).run(&registry).await?;
        let elapsed = start.elapsed();

        println!(
            "   ✓ {} mode: {} matches in {:?} ({:.2}µs per pet)",
            mode,
            found.len(),
            elapsed,
            elapsed.as_micros() as f64 / count.max(1) as f64
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from(["kennel", "search", "--breed", "Labrador", "--age", "3", "--all"]);
        match cli.command {
            Commands::Search { breed, age, all, name, .. } => {
                assert_eq!(breed.as_deref(), Some("Labrador"));
                assert_eq!(age.as_deref(), Some("3"));
                assert!(all);
                assert!(name.is_none());
            }
            _ => panic!("expected search"),
        }
    }

    fn pet_named(name: &str) -> Pet {
        Pet::new(name, "Male", 1, "Pug")
    }

    #[test]
    fn test_image_file_name_stays_inside_target_dir() {
        let dir = Path::new("/tmp/kennel-images");
        let mut used = HashSet::new();

        for name in ["../escaped", "/etc/passwd", "..", "..\\win", "a/../../b", "\n"] {
            let file_name = image_file_name(&pet_named(name), &mut used);
            assert!(!file_name.contains('/') && !file_name.contains('\\'), "{file_name}");
            assert!(!file_name.starts_with('.'), "{file_name}");

            let path = dir.join(&file_name);
            assert_eq!(path.parent(), Some(dir), "{}", path.display());
            assert_eq!(path.components().count(), dir.components().count() + 1);
        }
    }

    #[test]
    fn test_image_file_name_keeps_readable_names() {
        let mut used = HashSet::new();
        let pet = Pet::new("Rex", "Male", 3, "Pug");
        assert_eq!(image_file_name(&pet, &mut used), "Rex, Male, 3, Pug.jpg");
    }

    #[test]
    fn test_image_file_name_does_not_overwrite_duplicates() {
        let mut used = HashSet::new();
        let pet = pet_named("Rex");

        let first = image_file_name(&pet, &mut used);
        let second = image_file_name(&pet, &mut used);
        let third = image_file_name(&pet, &mut used);

        assert_eq!(first, "Rex, Male, 1, Pug.jpg");
        assert_eq!(second, "Rex, Male, 1, Pug-1.jpg");
        assert_eq!(third, "Rex, Male, 1, Pug-2.jpg");
    }

    #[test]
    fn test_register_accepts_negative_age_for_server_validation() {
        let cli = Cli::parse_from([
            "kennel", "register", "--name", "Rex", "--gender", "Male", "--age", "-1", "--breed", "Pug",
        ]);
        assert!(matches!(cli.command, Commands::Register { ref age, .. } if age == "-1"));
        assert_eq!(cli.server, "http://127.0.0.1:3001");
    }
}
