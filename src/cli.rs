//! Command line front end
//!
//! Thin wrapper over the library for inspecting destinations and links from a
//! shell. Results are printed to stdout as JSON or as a destination token.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::AnchorConfig;
use crate::destination::{self, DestinationRecord};
use crate::geometry::{PartialPoint, Rect, YAxis};
use crate::link::{FileRef, FsPathResolver, LinkResolver, LinkSource};
use crate::resolver::{self, AnnotationCandidate};
use crate::selection::{merge_line_rects, MergeOptions};

#[derive(Debug, Parser)]
#[command(name = "pdf-anchor")]
#[command(about = "Inspect PDF destinations, wikilinks and annotation lookups")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode a destination subpath into JSON.
    Decode {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Build a destination subpath.
    Encode {
        #[arg(long)]
        page: u32,
        #[arg(long)]
        annotation: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        left: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        top: Option<f64>,
        /// Rectangle as `left,bottom,right,top`
        #[arg(long, value_name = "L,B,R,T", allow_hyphen_values = true)]
        rect: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Resolve a wikilink written in a file of the vault.
    Link {
        #[arg(value_name = "WIKILINK")]
        wikilink: String,
        /// Vault-relative path of the file containing the link
        #[arg(long, value_name = "FILE")]
        context: String,
        /// Vault root directory
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
    },
    /// Pick the annotation nearest to a point from a JSON candidate list.
    Nearest {
        #[arg(value_name = "CANDIDATES_JSON")]
        candidates: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        left: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        top: Option<f64>,
    },
    /// Merge glyph rectangles from a JSON list into line rectangles.
    Merge {
        #[arg(value_name = "RECTS_JSON")]
        rects: PathBuf,
        /// Input uses PDF orientation (y grows upwards)
        #[arg(long)]
        y_up: bool,
    },
}

pub async fn run<I, T>(args: I, config: &AnchorConfig) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Decode { token } => run_decode(&token),
        Commands::Encode {
            page,
            annotation,
            left,
            top,
            rect,
            color,
        } => run_encode(page, annotation, left, top, rect.as_deref(), color),
        Commands::Link {
            wikilink,
            context,
            root,
        } => run_link(&wikilink, &context, root).await,
        Commands::Nearest {
            candidates,
            left,
            top,
        } => run_nearest(&candidates, left, top).await,
        Commands::Merge { rects, y_up } => {
            let y_axis = if y_up { YAxis::Up } else { YAxis::Down };
            let options = MergeOptions {
                y_axis,
                ..config.merge_options()
            };
            run_merge(&rects, &options).await
        }
    }
}

fn run_decode(token: &str) -> Result<()> {
    let record = destination::decode(token).context("failed to decode destination")?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn run_encode(
    page: u32,
    annotation: Option<String>,
    left: Option<f64>,
    top: Option<f64>,
    rect: Option<&str>,
    color: Option<String>,
) -> Result<()> {
    if page == 0 {
        bail!("page numbers start at 1");
    }

    let mut record = DestinationRecord::page(page);
    if let Some(id) = annotation {
        record = record.with_annotation(id);
    }
    if left.is_some() || top.is_some() {
        record = record.with_offset(left, top);
    }
    if let Some(rect) = rect {
        record = record.with_rect(parse_rect_arg(rect)?);
    }
    if let Some(color) = color {
        record = record.with_color(color);
    }

    println!("{}", destination::encode(&record));
    Ok(())
}

/// `left,bottom,right,top` as written in destination tokens
fn parse_rect_arg(value: &str) -> Result<Rect> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("invalid rectangle '{value}'"))?;

    match parts.as_slice() {
        &[left, bottom, right, top] => Ok(Rect::new(left, top, right, bottom)),
        _ => bail!("rectangle needs four numbers, got '{value}'"),
    }
}

async fn run_link(wikilink: &str, context: &str, root: PathBuf) -> Result<()> {
    let links = LinkResolver::new(Arc::new(FsPathResolver::new(root)));
    let source = LinkSource::Wikilink(wikilink.to_string());

    let target = links
        .resolve(&source, &FileRef::new(context))
        .await
        .context("failed to resolve link")?;
    let Some(target) = target else {
        bail!("no file matches '{wikilink}'");
    };

    println!("{}", serde_json::to_string_pretty(&target)?);
    Ok(())
}

async fn run_nearest(path: &Path, left: Option<f64>, top: Option<f64>) -> Result<()> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let candidates: Vec<AnnotationCandidate> =
        serde_json::from_str(&data).context("invalid candidate list")?;

    match resolver::resolve(&candidates, PartialPoint::new(left, top)) {
        Some(id) => {
            println!("{id}");
            Ok(())
        }
        None => bail!("no annotation matches"),
    }
}

async fn run_merge(path: &Path, options: &MergeOptions) -> Result<()> {
    let data = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rects: Vec<Rect> = serde_json::from_str(&data).context("invalid rectangle list")?;

    let merged = merge_line_rects(&rects, options);
    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}
