use bitflags::bitflags;
use tracing::{debug, trace};

use crate::encoder;
use crate::error::{AsmError, Result};
use crate::instructions::Opcode;
use crate::labels::LabelTable;
use crate::operands::{
    Blocking, InSrc, IrqMode, JmpCond, MovDest, MovOp, MovSrc, OutDest, SetDest, WaitSrc,
};
use crate::program::{Program, SideSet, MAX_INSTRUCTIONS};

bitflags! {
    /// Qualifiers already applied to a slot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct Qualifiers: u8 {
        const DELAY = 1 << 0;
        const SIDE = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    word: u16,
    quals: Qualifiers,
}

/// Accumulates a PIO program in call order.
///
/// Instructions append one word each; directives only touch metadata;
/// `delay` and `side` patch the most recently emitted instruction.
///
/// ```
/// use pio_rs::{Blocking, JmpCond, MovDest, MovSrc, OutDest, ProgramBuilder, SetDest};
///
/// # fn main() -> pio_rs::Result<()> {
/// let mut b = ProgramBuilder::new();
/// b.pull(Blocking::Block)?
///     .out(OutDest::Y, 32)?
///     .wrap_target()?
///     .mov(MovDest::X, MovSrc::Y)?
///     .set(SetDest::Pins, 1)?
///     .label("lp1")?
///     .jmp(JmpCond::XDec, "lp1")?
///     .wrap()?;
/// let program = b.build()?;
/// assert_eq!(program.words(), &[0x80a0, 0x6040, 0xa022, 0xe001, 0x0044]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProgramBuilder {
    slots: Vec<Slot>,
    wrap_target: Option<u8>,
    wrap: Option<u8>,
    side_set: Option<SideSet>,
    labels: LabelTable,
    last: Option<u8>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self { slots: Vec::with_capacity(MAX_INSTRUCTIONS), ..Self::default() }
    }

    /// Address the next instruction will occupy.
    pub fn count(&self) -> usize {
        self.slots.len()
    }

    fn emit(&mut self, word: u16) -> Result<&mut Self> {
        if self.slots.len() >= MAX_INSTRUCTIONS {
            return Err(AsmError::ProgramTooLarge);
        }
        let addr = self.slots.len() as u8;
        trace!(addr, word = %format!("{word:#06x}"), op = Opcode::of(word).mnemonic(), "emit");
        self.slots.push(Slot { word, quals: Qualifiers::empty() });
        self.last = Some(addr);
        Ok(self)
    }

    pub fn jmp(&mut self, cond: JmpCond, label: &str) -> Result<&mut Self> {
        let addr = self.slots.len() as u8;
        self.emit(encoder::jmp(cond))?;
        self.labels.reference(addr, label);
        Ok(self)
    }

    pub fn wait(&mut self, polarity: bool, src: WaitSrc, index: u8) -> Result<&mut Self> {
        self.emit(encoder::wait(polarity, src, index)?)
    }

    pub fn in_(&mut self, src: InSrc, bit_count: u8) -> Result<&mut Self> {
        self.emit(encoder::in_(src, bit_count)?)
    }

    pub fn out(&mut self, dest: OutDest, bit_count: u8) -> Result<&mut Self> {
        self.emit(encoder::out(dest, bit_count)?)
    }

    /// Blocking PUSH, `push block`.
    pub fn push_block(&mut self) -> Result<&mut Self> {
        self.push(Blocking::default())
    }

    pub fn push(&mut self, blocking: Blocking) -> Result<&mut Self> {
        self.emit(encoder::push(false, blocking))
    }

    pub fn push_if_full(&mut self, blocking: Blocking) -> Result<&mut Self> {
        self.emit(encoder::push(true, blocking))
    }

    /// Blocking PULL, `pull block`.
    pub fn pull_block(&mut self) -> Result<&mut Self> {
        self.pull(Blocking::default())
    }

    pub fn pull(&mut self, blocking: Blocking) -> Result<&mut Self> {
        self.emit(encoder::pull(false, blocking))
    }

    pub fn pull_if_empty(&mut self, blocking: Blocking) -> Result<&mut Self> {
        self.emit(encoder::pull(true, blocking))
    }

    pub fn mov(&mut self, dest: MovDest, src: MovSrc) -> Result<&mut Self> {
        self.emit(encoder::mov(dest, MovOp::None, src))
    }

    pub fn mov_op(&mut self, dest: MovDest, op: MovOp, src: MovSrc) -> Result<&mut Self> {
        self.emit(encoder::mov(dest, op, src))
    }

    pub fn irq(&mut self, mode: IrqMode, index: u8) -> Result<&mut Self> {
        self.emit(encoder::irq(mode, index)?)
    }

    pub fn set(&mut self, dest: SetDest, data: u8) -> Result<&mut Self> {
        self.emit(encoder::set(dest, data)?)
    }

    pub fn nop(&mut self) -> Result<&mut Self> {
        self.emit(encoder::nop())
    }

    /// Names the address of the next instruction.
    pub fn label(&mut self, name: &str) -> Result<&mut Self> {
        let addr = self.slots.len() as u8;
        self.labels.define(name, addr)?;
        debug!(label = name, addr, "label");
        Ok(self)
    }

    pub fn wrap_target(&mut self) -> Result<&mut Self> {
        self.wrap_target = Some(self.slots.len() as u8);
        Ok(self)
    }

    pub fn wrap(&mut self) -> Result<&mut Self> {
        let last = self.slots.len().checked_sub(1).ok_or(AsmError::NoInstruction { what: "wrap" })?;
        self.wrap = Some(last as u8);
        Ok(self)
    }

    pub fn side_set(&mut self, width: u8, optional: bool) -> Result<&mut Self> {
        self.configure_side_set(SideSet::new(width, optional, false)?)
    }

    /// Like [`side_set`](Self::side_set), but the side value drives pin
    /// directions.
    pub fn side_set_pindirs(&mut self, width: u8, optional: bool) -> Result<&mut Self> {
        self.configure_side_set(SideSet::new(width, optional, true)?)
    }

    fn configure_side_set(&mut self, side_set: SideSet) -> Result<&mut Self> {
        if self.side_set.is_some() {
            return Err(AsmError::MisconfiguredSideSet("side_set given more than once"));
        }
        if !self.slots.is_empty() {
            return Err(AsmError::MisconfiguredSideSet("side_set after the first instruction"));
        }
        debug!(width = side_set.width, optional = side_set.optional, pindirs = side_set.pindirs, "side_set");
        self.side_set = Some(side_set);
        Ok(self)
    }

    fn side_config(&self) -> SideSet {
        self.side_set.unwrap_or_default()
    }

    fn qualify(
        &mut self,
        what: &'static str,
        flag: Qualifiers,
        patch: impl FnOnce(u16, SideSet) -> Result<u16>,
    ) -> Result<&mut Self> {
        let addr = self.last.ok_or(AsmError::NoInstruction { what })?;
        let side_set = self.side_config();
        let slot = &mut self.slots[addr as usize];
        if slot.quals.contains(flag) {
            return Err(AsmError::DuplicateQualifier { what, addr });
        }
        slot.word = patch(slot.word, side_set)?;
        slot.quals.insert(flag);
        Ok(self)
    }

    /// Adds `cycles` idle cycles after the last instruction.
    pub fn delay(&mut self, cycles: u8) -> Result<&mut Self> {
        self.qualify("delay", Qualifiers::DELAY, |w, ss| encoder::apply_delay(w, cycles, ss))
    }

    /// Drives `value` on the side-set pins while the last instruction runs.
    pub fn side(&mut self, value: u8) -> Result<&mut Self> {
        self.qualify("side", Qualifiers::SIDE, |w, ss| encoder::apply_side(w, value, ss))
    }

    /// Resolves labels, checks the wrap window and freezes the program.
    pub fn build(mut self) -> Result<Program> {
        let count = self.slots.len();
        if count == 0 {
            return Err(AsmError::EmptyProgram);
        }
        let side_set = self.side_config();
        if side_set.is_enabled() && !side_set.optional {
            if let Some(addr) = self.slots.iter().position(|s| !s.quals.contains(Qualifiers::SIDE)) {
                return Err(AsmError::MissingSideSet { addr: addr as u8 });
            }
        }

        let mut code: Vec<u16> = self.slots.iter().map(|s| s.word).collect();
        self.labels.resolve(&mut code)?;

        let wrap_target = self.wrap_target.unwrap_or(0);
        let wrap = self.wrap.unwrap_or((count - 1) as u8);
        if wrap_target > wrap || wrap as usize >= count {
            return Err(AsmError::InvalidWrap { wrap_target, wrap, count });
        }

        debug!(count, wrap_target, wrap, "program built");
        Ok(Program::new(code, wrap_target, wrap, side_set, self.labels.into_symbols()))
    }
}
