//! Ripple Sheets CLI - drive a sheet from scripts or the scripted demo

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ripple_sheets::prelude::*;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ripple")]
#[command(author, version, about = "Reactive toy spreadsheet engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply `ADDR = FORMULA` lines from a script and print the grid
    Run {
        /// Script file (default: stdin)
        script: Option<PathBuf>,

        /// Number of rows (lettered A onward, max 26)
        #[arg(long, default_value = "5")]
        rows: usize,

        /// Number of columns (numbered 1 onward)
        #[arg(long, default_value = "5")]
        columns: usize,

        /// Print the grid after every applied line
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the scripted walkthrough: cascades, edge re-pointing, and a
    /// rejected circular reference
    Demo {
        /// Number of rows (min 5 for the walkthrough, max 26)
        #[arg(long, default_value = "5")]
        rows: usize,

        /// Number of columns (min 5 for the walkthrough)
        #[arg(long, default_value = "5")]
        columns: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            rows,
            columns,
            verbose,
        } => run_script(script.as_deref(), rows, columns, verbose),
        Commands::Demo { rows, columns } => run_demo(rows, columns),
    }
}

fn run_script(
    script: Option<&std::path::Path>,
    rows: usize,
    columns: usize,
    verbose: bool,
) -> Result<()> {
    let source = match script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read script from stdin")?;
            buffer
        }
    };

    let mut sheet = Sheet::new(rows, columns)?;

    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (address, formula) = parse_line(line).with_context(|| format!("line {}", index + 1))?;
        sheet
            .set(address, formula)
            .with_context(|| format!("line {}: {}", index + 1, line))?;

        if verbose {
            println!("> {line}");
            print!("{sheet}");
            println!();
        }
    }

    print!("{sheet}");
    Ok(())
}

/// Split a script line into its address and formula parts
fn parse_line(line: &str) -> Result<(&str, &str)> {
    let Some((address, formula)) = line.split_once('=') else {
        bail!("expected 'ADDR = FORMULA', got '{line}'");
    };
    let address = address.trim();
    let formula = formula.trim();
    if address.is_empty() || formula.is_empty() {
        bail!("expected 'ADDR = FORMULA', got '{line}'");
    }
    Ok((address, formula))
}

fn run_demo(rows: usize, columns: usize) -> Result<()> {
    if rows < 5 || columns < 5 {
        bail!("the walkthrough needs at least a 5x5 sheet");
    }

    let mut sheet = Sheet::new(rows, columns)?;
    println!("empty {rows}x{columns} sheet");
    print!("{sheet}");
    println!();

    let steps = [
        ("A1", "2"),
        ("A2", "5"),
        ("A3", "A1+A2"),
        ("A1", "4"),
        ("A4", "A1+A3"),
    ];
    for (address, formula) in steps {
        apply(&mut sheet, address, formula)?;
    }

    // A1 = A3 would close A1 -> A3 -> A1; the sheet must be untouched
    println!("> A1 = A3");
    match sheet.set("A1", "A3") {
        Ok(_) => bail!("expected the circular reference to be rejected"),
        Err(err) => println!("rejected: {err}"),
    }
    print!("{sheet}");
    println!();

    for (address, formula) in [
        ("A4", "2"),
        ("B3", "A1+A3+A4"),
        ("A1", "5"),
        ("C5", "B3+A3"),
        ("A1", "6"),
        ("B3", "A1+A4+3"),
    ] {
        apply(&mut sheet, address, formula)?;
    }

    Ok(())
}

fn apply(sheet: &mut Sheet, address: &str, formula: &str) -> Result<()> {
    println!("> {address} = {formula}");
    let stats = sheet
        .set(address, formula)
        .with_context(|| format!("Failed to set {address} = {formula}"))?;
    println!(
        "recalculated {} cell(s), {} edge(s) attached, {} detached",
        stats.cells_recalculated, stats.edges_attached, stats.edges_detached
    );
    print!("{sheet}");
    println!();
    Ok(())
}
