use anyhow::Context;
use clap::Parser;
use optable_gen::document::Document;
use optable_gen::render::{TableKind, render_table, write_table};
use std::io;
use std::path::PathBuf;

/// Generate opcode size and cycle lookup tables from an HTML instruction table
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Table body to print
    #[arg(value_enum, default_value_t = TableKind::Cycles)]
    table: TableKind,
    /// HTML reference table
    #[arg(short, long, default_value = "table.html")]
    input: PathBuf,
}

pub fn main() -> anyhow::Result<()> {
    // logs go to stderr, stdout only carries the table body
    env_logger::init();

    let cli = Cli::parse();
    let document = Document::open(&cli.input)?;
    let lines = render_table(&document, cli.table)
        .with_context(|| format!("could not render {} table", cli.table))?;
    write_table(io::stdout().lock(), &lines).context("could not write table")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["optable_gen"]).unwrap();
        assert_eq!(cli.table, TableKind::Cycles);
        assert_eq!(cli.input, PathBuf::from("table.html"));
    }

    #[test]
    fn test_size_table_with_input() {
        let cli = Cli::try_parse_from(["optable_gen", "size", "-i", "x.html"]).unwrap();
        assert_eq!(cli.table, TableKind::Size);
        assert_eq!(cli.input, PathBuf::from("x.html"));

        let cli = Cli::try_parse_from(["optable_gen", "cycles", "--input", "y.html"]).unwrap();
        assert_eq!(cli.table, TableKind::Cycles);
        assert_eq!(cli.input, PathBuf::from("y.html"));
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        assert!(Cli::try_parse_from(["optable_gen", "bogus"]).is_err());
    }
}
