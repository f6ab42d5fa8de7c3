mod data;
mod link;
mod model;
mod render;

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use itertools::{Itertools, MinMaxResult};

use model::Episode;

#[derive(Parser)]
#[command(
    name = "bili_timeline",
    about = "Static timeline / game-index page builder for bilibili markpoints"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the page from episode data and a template
    Build {
        /// Episode data document (JSON array)
        #[arg(long, default_value = "data.json")]
        data: PathBuf,
        /// Page template containing the two substitution markers
        #[arg(long, default_value = "template.html")]
        template: PathBuf,
        /// Output document
        #[arg(short, long, default_value = "index.html")]
        out: PathBuf,
    },
    /// Show corpus statistics
    Stats {
        #[arg(long, default_value = "data.json")]
        data: PathBuf,
    },
    /// Per-game overview table
    Games {
        #[arg(long, default_value = "data.json")]
        data: PathBuf,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build { data, template, out } => {
            let episodes = data::load_episodes(&data)?;
            let template_text = data::load_template(&template)?;
            let html = render::build_page(&episodes, &template_text)?;
            data::write_page(&out, &html)?;
            println!(
                "Built {}: {} episodes, {} segments, {} games.",
                out.display(),
                episodes.len(),
                segment_count(&episodes),
                distinct_games(&episodes),
            );
            Ok(())
        }
        Commands::Stats { data } => {
            let episodes = data::load_episodes(&data)?;
            println!("Episodes:  {}", episodes.len());
            println!("Segments:  {}", segment_count(&episodes));
            println!("Games:     {}", distinct_games(&episodes));
            match episodes.iter().map(|e| e.pubdate.as_str()).minmax() {
                MinMaxResult::NoElements => {}
                MinMaxResult::OneElement(only) => {
                    println!("Published: {}", render::format_pubdate(only)?);
                }
                MinMaxResult::MinMax(first, last) => {
                    println!("First:     {}", render::format_pubdate(first)?);
                    println!("Latest:    {}", render::format_pubdate(last)?);
                }
            }
            Ok(())
        }
        Commands::Games { data, limit } => {
            let episodes = data::load_episodes(&data)?;
            let rows = render::games::overview(&episodes);
            if rows.is_empty() {
                println!("No games found.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<28} | {:>5} | {:<10} | {:<10}",
                "#", "Game", "Times", "First", "Last"
            );
            println!("{}", "-".repeat(68));
            for (i, row) in rows.iter().take(limit).enumerate() {
                println!(
                    "{:>3} | {:<28} | {:>5} | {:<10} | {:<10}",
                    i + 1,
                    truncate(&row.name, 28),
                    row.appearances,
                    render::format_pubdate(&row.first)?,
                    render::format_pubdate(&row.last)?,
                );
            }
            println!("\n{} games total", rows.len());
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn segment_count(episodes: &[Episode]) -> usize {
    episodes.iter().map(|e| e.records.len()).sum()
}

fn distinct_games(episodes: &[Episode]) -> usize {
    episodes
        .iter()
        .flat_map(|e| &e.records)
        .map(|s| s.name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
