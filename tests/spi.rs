//! SPI binding tests against embedded-hal-mock

use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use sh1106::{
    Builder, BuilderError, Config, Dimensions, Display, InterfaceKind, MAX_SPI_FREQUENCY_HZ, Mode,
    SpiInterface,
};

fn config(width: u16, height: u16) -> Config {
    Builder::new()
        .dimensions(Dimensions::new(width, height).unwrap())
        .build()
        .unwrap()
}

/// Expectations for one transfer: one CS window, DC settled first
struct Expected {
    spi: Vec<SpiTransaction<u8>>,
    cs: Vec<PinTransaction>,
    dc: Vec<PinTransaction>,
}

impl Expected {
    fn new() -> Self {
        Self {
            spi: Vec::new(),
            cs: Vec::new(),
            dc: Vec::new(),
        }
    }

    fn transfer(&mut self, data_mode: bool, bytes: &[u8]) {
        self.dc.push(PinTransaction::set(if data_mode {
            PinState::High
        } else {
            PinState::Low
        }));
        self.cs.push(PinTransaction::set(PinState::Low));
        self.spi.push(SpiTransaction::write_vec(bytes.to_vec()));
        self.spi.push(SpiTransaction::flush());
        self.cs.push(PinTransaction::set(PinState::High));
    }
}

#[test]
fn test_frequency_limit() {
    let mut spi = SpiMock::new(&[]);
    let mut cs = PinMock::new(&[]);
    let mut dc = PinMock::new(&[]);

    let result = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), MAX_SPI_FREQUENCY_HZ + 1);
    assert!(matches!(
        result,
        Err(BuilderError::UnsupportedSpiFrequency {
            hz: 2_000_001,
            max: 2_000_000
        })
    ));

    let interface = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), 2_000_000).unwrap();
    assert_eq!(interface.frequency_hz(), 2_000_000);

    spi.done();
    cs.done();
    dc.done();
}

#[test]
fn test_init_sequence_on_the_wire() {
    let mut expected = Expected::new();
    // Chip select parked high before anything else
    expected.cs.push(PinTransaction::set(PinState::High));
    for command in [
        &[0xAE][..],
        &[0xD5, 0x80],
        &[0xA8, 0x3F],
        &[0xD3, 0x00],
        &[0x40],
        &[0x8D, 0x14],
        &[0x20, 0x00],
        &[0xA1],
        &[0xC8],
        &[0xDA, 0x12],
        &[0x81, 0x80],
        &[0xD9, 0xF1],
        &[0xDB, 0x40],
        &[0xA4],
        &[0xA6],
    ] {
        expected.transfer(false, command);
    }
    for page in 0..8u8 {
        for command in [0xB0 | page, 0x02, 0x10] {
            expected.transfer(false, &[command]);
        }
        expected.transfer(true, &[0x00; 128]);
    }
    expected.transfer(false, &[0xAF]);

    let mut spi = SpiMock::new(&expected.spi);
    let mut cs = PinMock::new(&expected.cs);
    let mut dc = PinMock::new(&expected.dc);
    let mut rst = PinMock::new(&[
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);

    let mut buffer = [0u8; 1024];
    let interface = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), MAX_SPI_FREQUENCY_HZ).unwrap();
    let mut display = Display::buffered(interface, &mut buffer, config(128, 64)).unwrap();
    display.init(&mut rst.clone(), &mut NoopDelay).unwrap();

    spi.done();
    cs.done();
    dc.done();
    rst.done();
}

#[test]
fn test_flush_frames_every_page() {
    let mut expected = Expected::new();
    for page in 0..8u8 {
        for command in [0xB0 | page, 0x02, 0x10] {
            expected.transfer(false, &[command]);
        }
        // 32-row panel: pages 4..8 are written blank
        let fill = if page < 4 { 0xFF } else { 0x00 };
        expected.transfer(true, &[fill; 128]);
    }

    let mut spi = SpiMock::new(&expected.spi);
    let mut cs = PinMock::new(&expected.cs);
    let mut dc = PinMock::new(&expected.dc);

    let mut buffer = [0u8; 512];
    let interface = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), 1_000_000).unwrap();
    let mut display = Display::buffered(interface, &mut buffer, config(128, 32)).unwrap();
    assert_eq!(display.mode(), Mode::Spi4Wire);

    display.fill(true).unwrap();
    display.flush().unwrap();

    spi.done();
    cs.done();
    dc.done();
}

#[test]
fn test_contrast_is_one_command_window() {
    let mut expected = Expected::new();
    expected.transfer(false, &[0x81, 0x7F]);
    expected.transfer(false, &[0xAE]);

    let mut spi = SpiMock::new(&expected.spi);
    let mut cs = PinMock::new(&expected.cs);
    let mut dc = PinMock::new(&expected.dc);

    let mut buffer = [0u8; 1024];
    let interface = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), 1_000_000).unwrap();
    let mut display = Display::buffered(interface, &mut buffer, config(128, 64)).unwrap();
    display.set_brightness(0.5).unwrap();
    display.set_display_on(false).unwrap();

    spi.done();
    cs.done();
    dc.done();
}

#[test]
fn test_direct_and_three_wire_rejected() {
    let mut spi = SpiMock::new(&[]);
    let mut cs = PinMock::new(&[]);
    let mut dc = PinMock::new(&[]);

    let interface = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), 1_000_000).unwrap();
    assert!(matches!(
        Display::direct(interface, config(128, 64)),
        Err(BuilderError::ModeMismatch {
            mode: Mode::I2cDirect,
            kind: InterfaceKind::Serial4Wire
        })
    ));

    let interface = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), 1_000_000).unwrap();
    let mut buffer = [0u8; 1024];
    assert!(matches!(
        Display::with_mode(interface, Mode::Spi3Wire, Some(&mut buffer), config(128, 64)),
        Err(BuilderError::UnsupportedMode(Mode::Spi3Wire))
    ));

    spi.done();
    cs.done();
    dc.done();
}

#[test]
fn test_detect_always_true() {
    let mut spi = SpiMock::new(&[]);
    let mut cs = PinMock::new(&[]);
    let mut dc = PinMock::new(&[]);

    let mut buffer = [0u8; 1024];
    let interface = SpiInterface::new(spi.clone(), cs.clone(), dc.clone(), 1_000_000).unwrap();
    let mut display = Display::buffered(interface, &mut buffer, config(128, 64)).unwrap();
    assert!(display.detect());

    spi.done();
    cs.done();
    dc.done();
}
