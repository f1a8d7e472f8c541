//! bitext-rs CLI application
//!
//! Command-line interface for the bitext-rs library.

use bitext_rs::{
    Config, Document, EmbeddingIndexer, EmbeddingProvider, HashEmbeddings, OpenAiEmbeddings,
    PhraseSegmenter, QdrantStore,
};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "bitext-rs")]
#[command(about = "Bilingual phrase-pair segmentation, alignment and semantic indexing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a corpus of bilingual documents into the vector store
    Index {
        /// JSON file holding an array of documents
        #[arg(short, long)]
        documents: PathBuf,

        /// Configuration file (JSON); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the collection name from the config
        #[arg(long)]
        collection: Option<String>,

        /// Use the deterministic offline embedding provider instead of the
        /// configured endpoint
        #[arg(long)]
        offline: bool,

        /// Write the run summary as JSON to this file
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Print the phrase split of a text file for one language
    Segment {
        /// Text file to segment
        #[arg(short, long)]
        file: PathBuf,

        /// Language tag (must have a configured profile, e.g. "ar" or "fr")
        #[arg(short, long)]
        language: String,

        /// Configuration file (JSON); defaults apply when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            documents,
            config,
            collection,
            offline,
            summary,
        } => {
            index_command(documents, config, collection, offline, summary).await?;
        }
        Commands::Segment {
            file,
            language,
            config,
        } => {
            segment_command(file, language, config)?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

async fn index_command(
    documents_path: PathBuf,
    config_path: Option<PathBuf>,
    collection: Option<String>,
    offline: bool,
    summary_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;
    if let Some(name) = collection {
        config.collection.name = name;
    }

    println!("📚 Loading documents from {}", documents_path.display());
    let content = std::fs::read_to_string(&documents_path)?;
    let documents: Vec<Document> = serde_json::from_str(&content)?;

    if documents.is_empty() {
        eprintln!("❌ No documents found in {}", documents_path.display());
        return Ok(());
    }

    let provider: Arc<dyn EmbeddingProvider> = if offline {
        println!("🧮 Using deterministic offline embeddings");
        Arc::new(HashEmbeddings::default())
    } else {
        Arc::new(OpenAiEmbeddings::new(&config.embedding)?)
    };
    let store = Arc::new(QdrantStore::new(&config.store)?);

    let collection_name = config.collection.name.clone();
    let indexer = EmbeddingIndexer::new(config, provider, store)?;

    let dimension = indexer.ensure_collection().await?;
    println!(
        "🗂️  Collection '{}' ready with vector size {}",
        collection_name, dimension
    );

    let bar = ProgressBar::new(documents.len() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40.cyan/blue} {pos}/{len} documents",
    )?);

    let summary = indexer
        .index_documents_with_progress(&documents, |completed, _total| {
            bar.set_position(completed as u64);
        })
        .await?;
    bar.finish();

    println!("✅ Indexing complete!");
    println!("   📊 Records: {}", summary.inserted_count);
    println!("   📄 Documents: {}", summary.documents_processed);
    if summary.documents_skipped > 0 {
        println!("   ⚠️  Skipped: {}", summary.documents_skipped);
    }
    for report in &summary.per_document {
        println!(
            "      document {} → {} records",
            report.document_id, report.record_count
        );
    }

    if let Some(path) = summary_path {
        std::fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
        println!("   📋 Summary written to {}", path.display());
    }

    Ok(())
}

fn segment_command(
    file: PathBuf,
    language: String,
    config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;

    let profile = config.language_profile(&language)?;
    let segmenter = PhraseSegmenter::new(profile, &config.segmentation)?;

    let text = std::fs::read_to_string(&file)?;
    let phrases = segmenter.segment(&text);

    if phrases.is_empty() {
        println!("❌ No phrases extracted from {}", file.display());
        return Ok(());
    }

    println!("📋 {} phrases ({}):", phrases.len(), language);
    for (i, phrase) in phrases.iter().enumerate() {
        println!("{:4}. {}", i, phrase);
    }

    Ok(())
}
