//! Operand domains. Each instruction role gets its own closed enum so an
//! operand that is illegal for a given instruction cannot be expressed.
//! Discriminants are the hardware field encodings.

/// JMP condition, bits 7-5 of a jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum JmpCond {
    Always = 0,
    NotX = 1,  // !x
    XDec = 2,  // x--
    NotY = 3,  // !y
    YDec = 4,  // y--
    XNotY = 5, // x!=y
    Pin = 6,
    NotOsre = 7, // !osre
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WaitSrc {
    Gpio = 0,
    Pin = 1,
    Irq = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InSrc {
    Pins = 0,
    X = 1,
    Y = 2,
    Null = 3,
    Isr = 6,
    Osr = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OutDest {
    Pins = 0,
    X = 1,
    Y = 2,
    Null = 3,
    Pindirs = 4,
    Pc = 5,
    Isr = 6,
    Exec = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MovDest {
    Pins = 0,
    X = 1,
    Y = 2,
    Exec = 4,
    Pc = 5,
    Isr = 6,
    Osr = 7,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MovSrc {
    Pins = 0,
    X = 1,
    Y = 2,
    Null = 3,
    Status = 5,
    Isr = 6,
    Osr = 7,
}

/// Operation applied to the source of a MOV, bits 4-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum MovOp {
    #[default]
    None = 0,
    Invert = 1,
    Reverse = 2,
}

/// SET destination. Selector values 3, 5, 6 and 7 are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SetDest {
    Pins = 0,
    X = 1,
    Y = 2,
    Pindirs = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrqMode {
    /// Raise the flag and continue.
    Set,
    /// Raise the flag and stall until it is cleared.
    Block,
    Clear,
}

impl IrqMode {
    /// `(clear, wait)` flag pair.
    pub const fn flags(self) -> (bool, bool) {
        match self {
            IrqMode::Set => (false, false),
            IrqMode::Block => (false, true),
            IrqMode::Clear => (true, false),
        }
    }
}

/// Whether a PUSH/PULL stalls on a full/empty FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Blocking {
    #[default]
    Block,
    NoBlock,
}

const REL: u8 = 0b10000;

/// Marks an IRQ/WAIT index as relative to the executing state-machine.
pub const fn rel(index: u8) -> u8 {
    index | REL
}
