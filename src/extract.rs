use crate::document::Document;
use crate::opcode::{get_override, record_id};
use itertools::Itertools;
use log::debug;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Field label of the instruction length in bytes
pub const FIELD_BYTES: &str = "bytes";
/// Field label of the instruction timing in clock cycles
pub const FIELD_CYCLES: &str = "cycles";

/// Clock cycles per machine cycle
pub const CLOCKS_PER_MACHINE_CYCLE: u32 = 4;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{opcode:#04x}: malformed {field} value {text:?}")]
    MalformedNumber {
        opcode: u8,
        field: &'static str,
        text: String,
    },
    #[error("{opcode:#04x}: conditional cycles must have exactly two parts, got {text:?}")]
    MalformedConditional { opcode: u8, text: String },
}

/// Machine cycles taken by one instruction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CycleValue {
    Fixed(u32),
    /// (branch taken, branch not taken)
    Conditional(u32, u32),
}

impl Display for CycleValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            CycleValue::Fixed(cycles) => write!(f, "{cycles}"),
            CycleValue::Conditional(taken, not_taken) => {
                write!(f, "if (cond) {taken} else {not_taken}")
            }
        }
    }
}

fn field_text<'d>(document: &'d Document, opcode: u8, label: &str) -> Option<&'d str> {
    document.record(&record_id(opcode))?.field(label)
}

fn parse_number(opcode: u8, field: &'static str, text: &str) -> Result<u32, ExtractError> {
    text.trim()
        .parse()
        .map_err(|_| ExtractError::MalformedNumber {
            opcode,
            field,
            text: text.to_owned(),
        })
}

fn parse_cycles(opcode: u8, text: &str) -> Result<u32, ExtractError> {
    Ok(parse_number(opcode, FIELD_CYCLES, text)? / CLOCKS_PER_MACHINE_CYCLE)
}

/// Instruction length in bytes, `None` if the table has no such record or field.
pub fn resolve_size(document: &Document, opcode: u8) -> Result<Option<u32>, ExtractError> {
    if let Some(ovr) = get_override(opcode) {
        debug!("{opcode:#04x}: using size override {}", ovr.size);
        return Ok(Some(ovr.size));
    }

    let Some(text) = field_text(document, opcode, FIELD_BYTES) else {
        return Ok(None);
    };
    parse_number(opcode, FIELD_BYTES, text).map(Some)
}

/// Instruction timing in machine cycles, `None` if the table has no such record or field.
///
/// A field like `12/8` lists the clock cycles with the branch taken and not taken,
/// which resolves to a [`CycleValue::Conditional`] in the same order.
pub fn resolve_cycles(document: &Document, opcode: u8) -> Result<Option<CycleValue>, ExtractError> {
    if let Some(ovr) = get_override(opcode) {
        debug!("{opcode:#04x}: using cycles override {}", ovr.cycles);
        return Ok(Some(ovr.cycles));
    }

    let Some(text) = field_text(document, opcode, FIELD_CYCLES) else {
        return Ok(None);
    };
    let cycles = if text.contains('/') {
        let (taken, not_taken) = text
            .split('/')
            .collect_tuple()
            .ok_or_else(|| ExtractError::MalformedConditional {
                opcode,
                text: text.to_owned(),
            })?;
        CycleValue::Conditional(
            parse_cycles(opcode, taken)?,
            parse_cycles(opcode, not_taken)?,
        )
    } else {
        CycleValue::Fixed(parse_cycles(opcode, text)?)
    };
    Ok(Some(cycles))
}
