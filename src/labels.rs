use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use crate::encoder::jmp_target;
use crate::error::{AsmError, Result, UnresolvedJump};
use crate::instructions::Opcode;

/// Label definitions plus the jumps waiting on them.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    defs: HashMap<String, u8>,
    refs: BTreeMap<u8, String>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, addr: u8) -> Result<()> {
        if let Some(&first) = self.defs.get(name) {
            return Err(AsmError::DuplicateLabel { name: name.to_string(), first, second: addr });
        }
        self.defs.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn reference(&mut self, addr: u8, name: &str) {
        self.refs.insert(addr, name.to_string());
    }

    pub fn lookup(&self, name: &str) -> Option<u8> {
        self.defs.get(name).copied()
    }

    /// Backpatches every JMP in `words` in one pass and consumes the pending
    /// references. Undefined targets and targets past the last instruction are
    /// collected and reported together.
    pub fn resolve(&mut self, words: &mut [u16]) -> Result<()> {
        let refs = std::mem::take(&mut self.refs);
        let count = words.len();
        let mut unresolved = Vec::new();
        for (addr, word) in words.iter_mut().enumerate() {
            if Opcode::of(*word) != Opcode::Jmp {
                continue;
            }
            let addr = addr as u8;
            let Some(name) = refs.get(&addr) else { continue };
            match self.lookup(name) {
                Some(target) if target as usize >= count => {
                    unresolved.push(UnresolvedJump::past_end(addr, name, target));
                }
                Some(target) => {
                    trace!(addr, label = %name, target, "resolve jmp");
                    *word = jmp_target(*word, target);
                }
                None => unresolved.push(UnresolvedJump::undefined(addr, name)),
            }
        }
        if !unresolved.is_empty() {
            return Err(AsmError::UnresolvedLabels(unresolved));
        }
        Ok(())
    }

    pub fn into_symbols(self) -> BTreeMap<String, u8> {
        self.defs.into_iter().collect()
    }
}
