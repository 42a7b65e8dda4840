pub mod builder;
pub mod encoder;
pub mod error;
pub mod instructions;
pub mod labels;
pub mod operands;
pub mod program;
pub mod programs;

pub use builder::ProgramBuilder;
pub use error::{AsmError, JumpFault, Result, UnresolvedJump};
pub use instructions::Opcode;
pub use operands::{
    rel, Blocking, InSrc, IrqMode, JmpCond, MovDest, MovOp, MovSrc, OutDest, SetDest, WaitSrc,
};
pub use program::{Program, SideSet, MAX_INSTRUCTIONS};
