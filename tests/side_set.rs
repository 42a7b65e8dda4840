use pio_rs::{AsmError, JmpCond, ProgramBuilder, SetDest};
use pretty_assertions::assert_eq;

#[test]
fn optional_width_one_sets_enable_and_value() {
    let mut b = ProgramBuilder::new();
    b.side_set(1, true).unwrap().nop().unwrap().side(1).unwrap();
    let w = b.build().unwrap().words()[0];
    assert_eq!(w & (1 << 12), 1 << 12);
    assert_eq!(w & (1 << 11), 1 << 11);
    assert_eq!(w, 0xb842);
}

#[test]
fn mandatory_width_one_uses_top_bit_only() {
    let mut b = ProgramBuilder::new();
    b.side_set(1, false).unwrap().nop().unwrap().side(1).unwrap();
    let w = b.build().unwrap().words()[0];
    assert_eq!(w, 0xb042);
    assert_eq!(w & (1 << 11), 0);
}

#[test]
fn optional_side_may_be_omitted() {
    let mut b = ProgramBuilder::new();
    b.side_set(2, true).unwrap()
        .nop().unwrap()
        .nop().unwrap().side(3).unwrap().delay(3).unwrap();
    let p = b.build().unwrap();
    // enable bit 12, value in 11..10, delay in 9..8
    assert_eq!(p.words(), &[0xa042, 0xbf42]);
}

#[test]
fn mandatory_side_must_be_on_every_instruction() {
    let mut b = ProgramBuilder::new();
    b.side_set(2, false).unwrap()
        .nop().unwrap().side(2).unwrap()
        .set(SetDest::X, 1).unwrap();
    assert_eq!(b.build().unwrap_err(), AsmError::MissingSideSet { addr: 1 });
}

#[test]
fn wide_side_set_limits_delay() {
    let mut b = ProgramBuilder::new();
    b.side_set(5, false).unwrap().nop().unwrap().side(0x1f).unwrap();
    assert!(matches!(b.delay(1), Err(AsmError::InvalidOperand { what: "delay", max: 0, .. })));
    b.delay(0).unwrap();
    assert_eq!(b.build().unwrap().words(), &[0xbf42]);
}

#[test]
fn side_value_must_fit_width() {
    let mut b = ProgramBuilder::new();
    b.side_set(2, true).unwrap().nop().unwrap();
    assert!(matches!(b.side(4), Err(AsmError::InvalidOperand { what: "side-set value", .. })));
}

#[test]
fn side_without_side_set_rejected() {
    let mut b = ProgramBuilder::new();
    b.nop().unwrap();
    assert!(matches!(b.side(0), Err(AsmError::MisconfiguredSideSet(_))));
}

#[test]
fn side_set_only_once_and_before_instructions() {
    let mut b = ProgramBuilder::new();
    b.side_set(1, false).unwrap();
    assert!(matches!(b.side_set(1, false), Err(AsmError::MisconfiguredSideSet(_))));

    let mut b = ProgramBuilder::new();
    b.jmp(JmpCond::Always, "x").unwrap();
    assert!(matches!(b.side_set(1, true), Err(AsmError::MisconfiguredSideSet(_))));
}

#[test]
fn side_set_width_bounds() {
    let mut b = ProgramBuilder::new();
    assert!(matches!(b.side_set(6, false), Err(AsmError::InvalidOperand { .. })));
    assert!(matches!(b.side_set(5, true), Err(AsmError::InvalidOperand { .. })));
    b.side_set(4, true).unwrap();
}
