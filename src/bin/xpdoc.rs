use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use xp_doc2html::Attributes;
use xp_doc2html::Converter;
use xp_doc2html::DefaultAttributes;
use xp_doc2html::Release;
use xp_doc2html::Source;

#[derive(Parser)]
#[command(name = "xpdoc")]
#[command(about = "Convert markdown documents to embeddable HTML fragments")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a document to an HTML fragment
    Convert {
        /// Input file path or http(s) URL
        #[arg(short, long)]
        input: String,

        /// Output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Output file name, defaults to the input name with an `.html` suffix
        #[arg(short, long)]
        name: Option<String>,

        /// Release version, exposed as `version` and `majorMinorVersion`
        #[arg(short, long)]
        release: Option<String>,

        /// Base directory for includes of remote documents
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Attribute override, `key=value` or `key`. May be repeated
        #[arg(short, long = "attribute", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,
    },

    /// Print the attributes declared in a document header as JSON
    Attributes {
        /// Input file path or http(s) URL
        #[arg(short, long)]
        input: String,

        /// Attribute override, `key=value` or `key`. May be repeated
        #[arg(short, long = "attribute", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,
    },
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
    Attributes::parse_pair(s).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output_dir,
            name,
            release,
            root,
            attributes,
        } => {
            convert_command(input, output_dir, name, release, root, attributes)?;
        }
        Commands::Attributes { input, attributes } => {
            attributes_command(input, attributes)?;
        }
    }

    Ok(())
}

fn convert_command(
    input: String,
    output_dir: PathBuf,
    name: Option<String>,
    release: Option<String>,
    root: PathBuf,
    attributes: Vec<(String, String)>,
) -> Result<()> {
    let source: Source = input.parse()?;

    let name = match name {
        Some(n) => n,
        None => {
            let stem = source
                .stem()
                .with_context(|| format!("Cannot derive output name from: {}", source))?;
            format!("{}.html", stem)
        }
    };

    let defaults = match release {
        Some(v) => DefaultAttributes::from_release(&Release::new(v)),
        None => DefaultAttributes::default(),
    };

    // Create output directory if it doesn't exist
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    log::info!("Converting {} to {}", source, output_dir.join(&name).display());

    let converter = Converter::new(root, defaults)?;

    let overrides: Attributes = attributes.into_iter().collect();
    let resolved = converter
        .convert(&overrides, &source, &output_dir, &name)
        .with_context(|| format!("Failed to convert: {}", source))?;

    converter.shutdown();

    println!("Converted {} to {}", source, output_dir.join(&name).display());
    if let Some(title) = resolved.get("doctitle") {
        println!("Title: {}", title);
    }

    Ok(())
}

fn attributes_command(input: String, attributes: Vec<(String, String)>) -> Result<()> {
    let source: Source = input.parse()?;

    let converter = Converter::new(".", DefaultAttributes::default())?;

    let overrides: Attributes = attributes.into_iter().collect();
    let overrides = (!overrides.is_empty()).then_some(&overrides);

    let parsed = converter
        .parse_attributes(&source, overrides)
        .with_context(|| format!("Failed to parse attributes of: {}", source))?;

    converter.shutdown();

    println!("{}", serde_json::to_string_pretty(&parsed)?);

    Ok(())
}
