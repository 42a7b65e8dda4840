use serde::Serialize;

/// Opcode group held in bits 15-13 of every instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Opcode {
    Jmp = 0,
    Wait = 1,
    In = 2,
    Out = 3,
    PushPull = 4,
    Mov = 5,
    Irq = 6,
    Set = 7,
}

#[derive(Debug, Clone, Copy)]
pub struct OpcodeDesc {
    pub op: Opcode,
    pub mnemonic: &'static str,
}

// Indexed by group number.
pub const TABLE: &[OpcodeDesc] = &[
    OpcodeDesc {
        op: Opcode::Jmp,
        mnemonic: "jmp",
    },
    OpcodeDesc {
        op: Opcode::Wait,
        mnemonic: "wait",
    },
    OpcodeDesc {
        op: Opcode::In,
        mnemonic: "in",
    },
    OpcodeDesc {
        op: Opcode::Out,
        mnemonic: "out",
    },
    OpcodeDesc {
        op: Opcode::PushPull,
        mnemonic: "push/pull",
    },
    OpcodeDesc {
        op: Opcode::Mov,
        mnemonic: "mov",
    },
    OpcodeDesc {
        op: Opcode::Irq,
        mnemonic: "irq",
    },
    OpcodeDesc {
        op: Opcode::Set,
        mnemonic: "set",
    },
];

pub const OPCODE_SHIFT: u16 = 13;

impl Opcode {
    pub fn of(word: u16) -> Self {
        TABLE[(word >> OPCODE_SHIFT) as usize].op
    }

    pub const fn group(self) -> u16 {
        (self as u16) << OPCODE_SHIFT
    }

    pub fn mnemonic(self) -> &'static str {
        TABLE[self as usize].mnemonic
    }
}
