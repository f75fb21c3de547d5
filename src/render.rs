use crate::document::Document;
use crate::extract::{ExtractError, resolve_cycles, resolve_size};
use crate::opcode::OPCODES;
use clap::ValueEnum;
use itertools::Itertools;
use log::{info, trace};
use std::fmt::{Display, Formatter};
use std::io::Write;
use strum::Display;

/// Number of table entries per printed line
pub const ENTRIES_PER_LINE: usize = 6;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Display, ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum TableKind {
    Size,
    Cycles,
}

/// One `key => value` arm of the generated lookup table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TableEntry<V> {
    pub opcode: u8,
    pub value: V,
}

impl<V: Display> Display for TableEntry<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#04x} => {}, ", self.opcode, self.value)
    }
}

fn collect_entries<V>(
    document: &Document,
    resolve: impl Fn(&Document, u8) -> Result<Option<V>, ExtractError>,
) -> Result<Vec<TableEntry<V>>, ExtractError> {
    let mut entries = vec![];
    for opcode in OPCODES {
        match resolve(document, opcode)? {
            Some(value) => entries.push(TableEntry { opcode, value }),
            None => trace!("{opcode:#04x}: no value, skipping"),
        }
    }
    Ok(entries)
}

fn wrap_lines<V: Display>(entries: &[TableEntry<V>]) -> Vec<String> {
    entries
        .chunks(ENTRIES_PER_LINE)
        .map(|line| line.iter().join(""))
        .collect()
}

pub fn render_size_table(document: &Document) -> Result<Vec<String>, ExtractError> {
    let entries = collect_entries(document, resolve_size)?;
    info!("Rendered {} size entries", entries.len());
    Ok(wrap_lines(&entries))
}

pub fn render_cycles_table(document: &Document) -> Result<Vec<String>, ExtractError> {
    let entries = collect_entries(document, resolve_cycles)?;
    info!("Rendered {} cycles entries", entries.len());
    Ok(wrap_lines(&entries))
}

pub fn render_table(document: &Document, kind: TableKind) -> Result<Vec<String>, ExtractError> {
    match kind {
        TableKind::Size => render_size_table(document),
        TableKind::Cycles => render_cycles_table(document),
    }
}

pub fn write_table(mut out: impl Write, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
