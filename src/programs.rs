//! Ready-made programs, mostly from the pico-examples repository.

use crate::builder::ProgramBuilder;
use crate::error::Result;
use crate::operands::{
    rel, InSrc, IrqMode, JmpCond, MovDest, MovSrc, OutDest, SetDest, WaitSrc,
};
use crate::program::Program;

pub type Assemble = fn() -> Result<Program>;

pub const CATALOG: &[(&str, Assemble)] = &[("blink", blink), ("i2c", i2c), ("ws2812", ws2812)];

pub fn by_name(name: &str) -> Option<Assemble> {
    CATALOG.iter().find(|(n, _)| *n == name).map(|&(_, f)| f)
}

/// Toggles a pin, holding each level for `y + 1` loop iterations. `y` is
/// pulled from the TX FIFO once at start.
pub fn blink() -> Result<Program> {
    let mut b = ProgramBuilder::new();
    b.pull_block()?
        .out(OutDest::Y, 32)?
        .wrap_target()?
        .mov(MovDest::X, MovSrc::Y)?
        .set(SetDest::Pins, 1)? // LED on
        .label("lp1")?
        .jmp(JmpCond::XDec, "lp1")?
        .mov(MovDest::X, MovSrc::Y)?
        .set(SetDest::Pins, 0)? // LED off
        .label("lp2")?
        .jmp(JmpCond::XDec, "lp2")?
        .wrap()?;
    b.build()
}

/// I2C byte transfer. SDA is the out/in/set pin, SCL the side-set pin (driven
/// through pindirs for open-drain). The TX FIFO carries either data records or
/// instructions for the state-machine to execute.
pub fn i2c() -> Result<Program> {
    let mut b = ProgramBuilder::new();
    b.side_set_pindirs(1, true)?
        .label("do_nack")?
        .jmp(JmpCond::YDec, "entry_point")? // NAK was expected
        .irq(IrqMode::Block, rel(0))? // otherwise stop and ask for help
        .label("do_byte")?
        .set(SetDest::X, 7)?
        .label("bitloop")?
        .out(OutDest::Pindirs, 1)?.delay(7)?
        .nop()?.side(1)?.delay(2)? // SCL rising edge
        .wait(true, WaitSrc::Pin, 1)?.delay(4)? // clock stretching
        .in_(InSrc::Pins, 1)?.delay(7)?
        .jmp(JmpCond::XDec, "bitloop")?.side(0)?.delay(7)?
        // ACK
        .out(OutDest::Pindirs, 1)?.delay(7)?
        .nop()?.side(1)?.delay(7)?
        .wait(true, WaitSrc::Pin, 1)?.delay(7)?
        .jmp(JmpCond::Pin, "do_nack")?.side(0)?.delay(2)?
        .label("entry_point")?
        .wrap_target()?
        .out(OutDest::X, 6)? // instruction count
        .out(OutDest::Y, 1)? // NAK ignore bit
        .jmp(JmpCond::NotX, "do_byte")?
        .out(OutDest::Null, 32)?
        .label("do_exec")?
        .out(OutDest::Exec, 16)?
        .jmp(JmpCond::XDec, "do_exec")?
        .wrap()?;
    b.build()
}

/// WS2812 LED driver at 10 cycles per bit, data on the side-set pin.
pub fn ws2812() -> Result<Program> {
    const T1: u8 = 2;
    const T2: u8 = 5;
    const T3: u8 = 3;

    let mut b = ProgramBuilder::new();
    b.side_set(1, false)?
        .wrap_target()?
        .label("bitloop")?
        .out(OutDest::X, 1)?.side(0)?.delay(T3 - 1)?
        .jmp(JmpCond::NotX, "do_zero")?.side(1)?.delay(T1 - 1)?
        .label("do_one")?
        .jmp(JmpCond::Always, "bitloop")?.side(1)?.delay(T2 - 1)?
        .label("do_zero")?
        .nop()?.side(0)?.delay(T2 - 1)?
        .wrap()?;
    b.build()
}
