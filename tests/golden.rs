use pio_rs::programs;
use pio_rs::{Blocking, JmpCond, MovDest, MovSrc, OutDest, ProgramBuilder, SetDest};
use pretty_assertions::assert_eq;

#[test]
fn blink_inline() {
    let mut b = ProgramBuilder::new();
    b.pull(Blocking::Block).unwrap()
        .out(OutDest::Y, 32).unwrap()
        .wrap_target().unwrap()
        .mov(MovDest::X, MovSrc::Y).unwrap()
        .set(SetDest::Pins, 1).unwrap()
        .label("lp1").unwrap()
        .jmp(JmpCond::XDec, "lp1").unwrap()
        .mov(MovDest::X, MovSrc::Y).unwrap()
        .set(SetDest::Pins, 0).unwrap()
        .label("lp2").unwrap()
        .jmp(JmpCond::XDec, "lp2").unwrap()
        .wrap().unwrap();
    let p = b.build().unwrap();

    assert_eq!(p.words(), &[0x80a0, 0x6040, 0xa022, 0xe001, 0x0044, 0xa022, 0xe000, 0x0047]);
    assert_eq!(p.wrap_target(), 2);
    assert_eq!(p.wrap(), 7);
    assert_eq!(p.side_set().width, 0);
    assert_eq!(p, programs::blink().unwrap());
}

#[test]
fn i2c_catalog() {
    let p = programs::i2c().unwrap();
    assert_eq!(
        p.words(),
        &[
            0x008c, 0xc030, 0xe027, 0x6781, 0xba42, 0x24a1, 0x4701, 0x1743, 0x6781, 0xbf42,
            0x27a1, 0x12c0, 0x6026, 0x6041, 0x0022, 0x6060, 0x60f0, 0x0050,
        ]
    );
    assert_eq!(p.wrap_target(), 12);
    assert_eq!(p.wrap(), 17);
    let ss = p.side_set();
    assert_eq!((ss.width, ss.optional, ss.pindirs), (1, true, true));
    assert_eq!(p.symbols().get("bitloop"), Some(&3));
    assert_eq!(p.symbols().get("do_exec"), Some(&16));
}

#[test]
fn ws2812_catalog() {
    let p = programs::ws2812().unwrap();
    assert_eq!(p.words(), &[0x6221, 0x1123, 0x1400, 0xa442]);
    assert_eq!((p.wrap_target(), p.wrap()), (0, 3));
    assert!(!p.side_set().optional);
}

#[test]
fn catalog_lookup() {
    assert!(programs::by_name("ws2812").is_some());
    assert!(programs::by_name("uart_tx").is_none());
    for (name, assemble) in programs::CATALOG {
        let p = assemble().unwrap();
        assert!(p.wrap_target() <= p.wrap(), "{name}");
        assert!((p.wrap() as usize) < p.len(), "{name}");
    }
}

#[test]
fn image_bytes_are_little_endian() {
    let p = programs::blink().unwrap();
    let bytes = p.to_le_bytes();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..4], &[0xa0, 0x80, 0x40, 0x60]);
}
