//! Instruction word encoding.
//!
//! ```text
//!  15..13   12..8              7..5       4..0
//!  opcode   side-set | delay   selector   immediate / index / address
//! ```
//!
//! Every function here is pure and range-checks its immediates. JMP leaves
//! the address field zero; the finalizer patches it.

use bitflags::bitflags;

use crate::error::{check_range, AsmError, Result};
use crate::instructions::Opcode;
use crate::operands::{
    Blocking, InSrc, IrqMode, JmpCond, MovDest, MovOp, MovSrc, OutDest, SetDest, WaitSrc,
};
use crate::program::SideSet;

pub const SELECTOR_SHIFT: u16 = 5;
pub const DELAY_SHIFT: u16 = 8;
pub const SIDE_ENABLE: u16 = 1 << 12;
pub const LOW_MASK: u16 = 0x1F;

bitflags! {
    /// Selector bits of PUSH and PULL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FifoFlags: u16 {
        const PULL = 1 << 7;
        const IF_FULL_OR_EMPTY = 1 << 6;
        const BLOCK = 1 << 5;
    }
}

bitflags! {
    /// Selector bits of IRQ. Bit 7 is always zero.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IrqFlags: u16 {
        const CLEAR = 1 << 6;
        const WAIT = 1 << 5;
    }
}

fn word(op: Opcode, selector: u16, low: u16) -> u16 {
    op.group() | (selector & 0b111) << SELECTOR_SHIFT | (low & LOW_MASK)
}

fn index(what: &'static str, value: u8) -> Result<u16> {
    check_range(what, value as u32, 0, LOW_MASK as u32).map(|v| v as u16)
}

// A full 32-bit shift is encoded as 0.
fn bit_count(value: u8) -> Result<u16> {
    check_range("bit count", value as u32, 1, 32).map(|v| (v % 32) as u16)
}

pub fn jmp(cond: JmpCond) -> u16 {
    word(Opcode::Jmp, cond as u16, 0)
}

/// Patches a resolved target into a JMP word.
pub fn jmp_target(word: u16, addr: u8) -> u16 {
    word | (addr as u16 & LOW_MASK)
}

/// `polarity` is the level (or flag state) to wait for.
pub fn wait(polarity: bool, src: WaitSrc, idx: u8) -> Result<u16> {
    Ok(word(Opcode::Wait, (polarity as u16) << 2 | src as u16, index("wait index", idx)?))
}

pub fn in_(src: InSrc, bits: u8) -> Result<u16> {
    Ok(word(Opcode::In, src as u16, bit_count(bits)?))
}

pub fn out(dest: OutDest, bits: u8) -> Result<u16> {
    Ok(word(Opcode::Out, dest as u16, bit_count(bits)?))
}

fn fifo(mut flags: FifoFlags, blocking: Blocking) -> u16 {
    flags.set(FifoFlags::BLOCK, blocking == Blocking::Block);
    Opcode::PushPull.group() | flags.bits()
}

pub fn push(if_full: bool, blocking: Blocking) -> u16 {
    let mut flags = FifoFlags::empty();
    flags.set(FifoFlags::IF_FULL_OR_EMPTY, if_full);
    fifo(flags, blocking)
}

pub fn pull(if_empty: bool, blocking: Blocking) -> u16 {
    let mut flags = FifoFlags::PULL;
    flags.set(FifoFlags::IF_FULL_OR_EMPTY, if_empty);
    fifo(flags, blocking)
}

pub fn mov(dest: MovDest, op: MovOp, src: MovSrc) -> u16 {
    word(Opcode::Mov, dest as u16, (op as u16) << 3 | src as u16)
}

pub fn nop() -> u16 {
    mov(MovDest::Y, MovOp::None, MovSrc::Y)
}

pub fn irq(mode: IrqMode, idx: u8) -> Result<u16> {
    let (clear, wait) = mode.flags();
    let mut flags = IrqFlags::empty();
    flags.set(IrqFlags::CLEAR, clear);
    flags.set(IrqFlags::WAIT, wait);
    Ok(Opcode::Irq.group() | flags.bits() | index("irq index", idx)?)
}

pub fn set(dest: SetDest, data: u8) -> Result<u16> {
    Ok(word(Opcode::Set, dest as u16, index("set data", data)?))
}

/// ORs a delay into the low end of the shared field.
pub fn apply_delay(word: u16, cycles: u8, side_set: SideSet) -> Result<u16> {
    check_range("delay", cycles as u32, 0, side_set.max_delay() as u32)?;
    Ok(word | (cycles as u16) << DELAY_SHIFT)
}

/// ORs a side-set value into the high end of the shared field.
pub fn apply_side(word: u16, value: u8, side_set: SideSet) -> Result<u16> {
    if !side_set.is_enabled() {
        return Err(AsmError::MisconfiguredSideSet("side value used without a side_set directive"));
    }
    check_range("side-set value", value as u32, 0, side_set.max_value() as u32)?;
    let width = side_set.width as u16;
    let value = value as u16;
    Ok(if side_set.optional {
        word | SIDE_ENABLE | value << (12 - width)
    } else {
        word | value << (13 - width)
    })
}
