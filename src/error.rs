use std::fmt;

use crate::program::MAX_INSTRUCTIONS;

pub type Result<T> = std::result::Result<T, AsmError>;

/// Why a jump could not be backpatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpFault {
    /// The label was never defined.
    Undefined,
    /// The label sits after the last instruction.
    PastEnd { target: u8 },
}

/// A jump whose target could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedJump {
    pub addr: u8,
    pub label: String,
    pub fault: JumpFault,
}

impl UnresolvedJump {
    pub fn undefined(addr: u8, label: &str) -> Self {
        Self { addr, label: label.to_string(), fault: JumpFault::Undefined }
    }

    pub fn past_end(addr: u8, label: &str, target: u8) -> Self {
        Self { addr, label: label.to_string(), fault: JumpFault::PastEnd { target } }
    }
}

impl fmt::Display for UnresolvedJump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` (jmp at {})", self.label, self.addr)?;
        match self.fault {
            JumpFault::Undefined => write!(f, " is undefined"),
            JumpFault::PastEnd { target } => write!(f, " names {target}, past the last instruction"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("unresolved jump(s): {}", join(.0))]
    UnresolvedLabels(Vec<UnresolvedJump>),
    #[error("label `{name}` already defined at {first}, redefined at {second}")]
    DuplicateLabel { name: String, first: u8, second: u8 },
    #[error("program exceeds {} instructions", MAX_INSTRUCTIONS)]
    ProgramTooLarge,
    #[error("{what} {value} outside {min}..={max}")]
    InvalidOperand { what: &'static str, value: u32, min: u32, max: u32 },
    #[error("side-set misconfigured: {0}")]
    MisconfiguredSideSet(&'static str),
    #[error("instruction at {addr} has no side-set value but side-set is mandatory")]
    MissingSideSet { addr: u8 },
    #[error("{what} needs a preceding instruction")]
    NoInstruction { what: &'static str },
    #[error("{what} applied twice to instruction at {addr}")]
    DuplicateQualifier { what: &'static str, addr: u8 },
    #[error("wrap window {wrap_target}..={wrap} invalid for {count} instruction(s)")]
    InvalidWrap { wrap_target: u8, wrap: u8, count: usize },
    #[error("program has no instructions")]
    EmptyProgram,
}

impl AsmError {
    pub(crate) fn operand(what: &'static str, value: u32, min: u32, max: u32) -> Self {
        Self::InvalidOperand { what, value, min, max }
    }
}

/// Range check shared by every immediate-bearing operand.
pub(crate) fn check_range(what: &'static str, value: u32, min: u32, max: u32) -> Result<u32> {
    if value < min || value > max {
        return Err(AsmError::operand(what, value, min, max));
    }
    Ok(value)
}

fn join(jumps: &[UnresolvedJump]) -> String {
    jumps.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
