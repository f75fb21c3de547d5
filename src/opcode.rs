use crate::extract::CycleValue;
use lazy_static::lazy_static;
use std::ops::RangeInclusive;

/// Every opcode byte, in table order
pub const OPCODES: RangeInclusive<u8> = 0x00..=0xFF;

/// Prefix byte of the extended instruction set
pub const PREFIX_CB: u8 = 0xCB;

/// Identifier of the record documenting `opcode` in the reference table.
pub fn record_id(opcode: u8) -> String {
    format!("op-{opcode:02x}")
}

/// Fixed metadata for an opcode the reference table does not describe as a single instruction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Override {
    pub byte: u8,
    pub size: u32,
    pub cycles: CycleValue,
}

impl Override {
    const fn new(byte: u8, size: u32, cycles: u32) -> Self {
        Self {
            byte,
            size,
            cycles: CycleValue::Fixed(cycles),
        }
    }
}

pub static OVERRIDES: [Override; 1] = [
    Override::new(PREFIX_CB, 2, 2), // prefix byte, the cb-table carries the real timing
];

lazy_static! {
    /// Lookup table for overrides by opcode byte
    static ref OVERRIDE_BY_OPCODE_BYTE: [Option<&'static Override>; 256] = {
        let mut overrides: [Option<&'static Override>; 256] = [None; 256];
        for ovr in &OVERRIDES {
            let n = ovr.byte as usize;
            let p = &mut overrides[n];
            if let Some(current) = p {
                panic!("{n:#X}: override already present | current={current:?} new={ovr:?}");
            } else {
                *p = Some(ovr);
            }
        }
        overrides
    };
}

pub fn get_override(opcode: u8) -> Option<&'static Override> {
    OVERRIDE_BY_OPCODE_BYTE[opcode as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_is_lowercase_zero_padded() {
        assert_eq!(record_id(0x00), "op-00");
        assert_eq!(record_id(10), "op-0a");
        assert_eq!(record_id(0xCB), "op-cb");
        assert_eq!(record_id(0xFF), "op-ff");
    }

    #[test]
    fn test_prefix_override() {
        let ovr = get_override(PREFIX_CB).unwrap();
        assert_eq!(ovr.size, 2);
        assert_eq!(ovr.cycles, CycleValue::Fixed(2));
    }

    #[test]
    fn test_only_listed_opcodes_are_overridden() {
        let overridden: Vec<u8> = OPCODES.filter(|&o| get_override(o).is_some()).collect();
        assert_eq!(overridden, vec![PREFIX_CB]);
    }
}
