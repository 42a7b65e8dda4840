use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{check_range, Result};
use crate::instructions::Opcode;

/// Size of a state-machine instruction memory.
pub const MAX_INSTRUCTIONS: usize = 32;

/// Width of the field shared by delay and side-set, bits 12-8.
pub const SHARED_FIELD_BITS: u8 = 5;

/// Side-set configuration. `width` counts value bits only; an optional
/// side-set spends one more bit of the shared field on the enable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SideSet {
    pub width: u8,
    pub optional: bool,
    pub pindirs: bool, // side-set drives pin directions instead of levels
}

impl SideSet {
    pub fn new(width: u8, optional: bool, pindirs: bool) -> Result<Self> {
        let max = if optional { SHARED_FIELD_BITS - 1 } else { SHARED_FIELD_BITS };
        check_range("side-set width", width as u32, 0, max as u32)?;
        Ok(Self { width, optional, pindirs })
    }

    pub const fn is_enabled(&self) -> bool {
        self.width > 0
    }

    /// Bits of the shared field consumed by side-set, enable flag included.
    pub const fn bits(&self) -> u8 {
        if self.width == 0 {
            0
        } else {
            self.width + self.optional as u8
        }
    }

    pub const fn delay_bits(&self) -> u8 {
        SHARED_FIELD_BITS - self.bits()
    }

    pub const fn max_delay(&self) -> u8 {
        ((1u16 << self.delay_bits()) - 1) as u8
    }

    pub const fn max_value(&self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }
}

/// An assembled program, ready to be loaded into instruction memory.
/// Only produced by [`crate::ProgramBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    code: Vec<u16>,
    wrap_target: u8,
    wrap: u8,
    side_set: SideSet,
    symbols: BTreeMap<String, u8>,
}

impl Program {
    pub(crate) fn new(
        code: Vec<u16>,
        wrap_target: u8,
        wrap: u8,
        side_set: SideSet,
        symbols: BTreeMap<String, u8>,
    ) -> Self {
        Self { code, wrap_target, wrap, side_set, symbols }
    }

    pub fn words(&self) -> &[u16] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn wrap_target(&self) -> u8 {
        self.wrap_target
    }

    pub fn wrap(&self) -> u8 {
        self.wrap
    }

    pub fn side_set(&self) -> SideSet {
        self.side_set
    }

    /// Label name to address.
    pub fn symbols(&self) -> &BTreeMap<String, u8> {
        &self.symbols
    }

    /// Little-endian image, two bytes per word.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.code.iter().flat_map(|w| w.to_le_bytes()).collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ss = self.side_set;
        if ss.is_enabled() {
            write!(f, ".side_set {}", ss.width)?;
            if ss.optional {
                write!(f, " opt")?;
            }
            if ss.pindirs {
                write!(f, " pindirs")?;
            }
            writeln!(f)?;
        }
        for (addr, &word) in self.code.iter().enumerate() {
            let addr = addr as u8;
            if addr == self.wrap_target {
                writeln!(f, ".wrap_target")?;
            }
            for (name, _) in self.symbols.iter().filter(|&(_, &a)| a == addr) {
                writeln!(f, "{name}:")?;
            }
            writeln!(f, "    {addr:2}: {word:#06x} ; {}", Opcode::of(word).mnemonic())?;
            if addr == self.wrap {
                writeln!(f, ".wrap")?;
            }
        }
        Ok(())
    }
}
