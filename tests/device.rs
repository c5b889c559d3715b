use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::{
    delay::NoopDelay,
    i2c::{Mock as I2cMock, Transaction},
};
use qn8066::{
    Device, Error, IntCtrl, ProgramId, RdsSession, RdsTransmitter, RegisterAccess, Status3,
    TxState, I2C_ADDRESS,
};

#[test]
fn reads_typed_status_register() {
    let expectations = [Transaction::write_read(I2C_ADDRESS, vec![0x1A], vec![0b0011_0100])];
    let mut device = Device::new(I2cMock::new(&expectations));

    let status: Status3 = device.read_register().unwrap();
    assert!(status.rds_tx_updated);
    assert_eq!(status.audio_peak, 0b0110);

    device.release().done();
}

#[test]
fn enabling_rds_preserves_other_system2_bits() {
    let expectations = [
        Transaction::write_read(I2C_ADDRESS, vec![0x01], vec![0b0000_0011]),
        Transaction::write(I2C_ADDRESS, vec![0x01, 0b0100_0011]),
    ];
    let mut device = Device::new(I2cMock::new(&expectations));

    device.set_tx_rds(true).unwrap();

    device.release().done();
}

#[test]
fn toggles_rds_ready() {
    let expectations = [
        Transaction::write_read(I2C_ADDRESS, vec![0x01], vec![0x42]),
        Transaction::write(I2C_ADDRESS, vec![0x01, 0x40]),
    ];
    let mut device = Device::new(I2cMock::new(&expectations));

    device.toggle_rds_ready().unwrap();

    device.release().done();
}

#[test]
fn writes_rds_buffer_in_address_order() {
    let expectations: Vec<Transaction> = (0u8..8)
        .map(|i| Transaction::write(I2C_ADDRESS, vec![0x1C + i, b'A' + i]))
        .collect();
    let mut device = Device::new(I2cMock::new(&expectations));

    device.write_rds_buffer(*b"ABCDEFGH").unwrap();

    device.release().done();
}

#[test]
fn rds_deviation_and_line_in() {
    let expectations = [
        Transaction::write_read(I2C_ADDRESS, vec![0x26], vec![0x80 | 0x3C]),
        Transaction::write(I2C_ADDRESS, vec![0x26, 0x80 | 0x50]),
        Transaction::write_read(I2C_ADDRESS, vec![0x26], vec![0x80 | 0x50]),
        Transaction::write(I2C_ADDRESS, vec![0x26, 0x50]),
    ];
    let mut device = Device::new(I2cMock::new(&expectations));

    device.set_rds_frequency_deviation(0x50).unwrap();
    device.set_rds_line_in(false).unwrap();

    device.release().done();
}

#[test]
fn rds_4k_mode_keeps_channel_bits() {
    let expectations = [
        Transaction::write_read(I2C_ADDRESS, vec![0x19], vec![0b0000_0010]),
        Transaction::write(I2C_ADDRESS, vec![0x19, 0b0000_1010]),
    ];
    let mut device = Device::new(I2cMock::new(&expectations));

    device.set_rds_4k_mode(true).unwrap();

    device.release().done();
}

#[test]
fn writes_typed_register() {
    let expectations = [Transaction::write(I2C_ADDRESS, vec![0x19, 0x80])];
    let mut device = Device::new(I2cMock::new(&expectations));

    device
        .write_register(IntCtrl {
            rds_int_enable: true,
            ..Default::default()
        })
        .unwrap();

    device.release().done();
}

#[test]
fn bus_errors_are_reported() {
    let expectations =
        [Transaction::write_read(I2C_ADDRESS, vec![0x1A], vec![0x00]).with_error(ErrorKind::Other)];
    let mut device = Device::new(I2cMock::new(&expectations));

    assert!(matches!(device.read_raw(0x1A), Err(Error::BusError)));

    device.release().done();
}

#[test]
fn sends_one_group_over_i2c() {
    let mut session = RdsSession::new(ProgramId::new(0x1234));
    session.set_program_type(1);
    let group = qn8066::build_station_name_group(&session, 0);

    let mut expectations = vec![Transaction::write_read(I2C_ADDRESS, vec![0x1A], vec![0x00])];
    for (i, byte) in group.to_bytes().into_iter().enumerate() {
        expectations.push(Transaction::write(I2C_ADDRESS, vec![0x1C + i as u8, byte]));
    }
    expectations.extend([
        Transaction::write_read(I2C_ADDRESS, vec![0x01], vec![0x40]),
        Transaction::write(I2C_ADDRESS, vec![0x01, 0x42]),
        Transaction::write_read(I2C_ADDRESS, vec![0x1A], vec![0x00]),
        Transaction::write_read(I2C_ADDRESS, vec![0x1A], vec![0x04]),
    ]);

    let mut rds = RdsTransmitter::new(Device::new(I2cMock::new(&expectations)), NoopDelay::new());
    let state = rds.send_group(&mut session, &group).unwrap();

    assert_eq!(state, TxState::Acked);
    assert!(!session.error());

    let (device, _) = rds.release();
    device.release().done();
}

#[test]
fn bus_error_aborts_send() {
    let mut session = RdsSession::new(ProgramId::new(0x1234));
    let expectations =
        [Transaction::write_read(I2C_ADDRESS, vec![0x1A], vec![0x00]).with_error(ErrorKind::Other)];

    let mut rds = RdsTransmitter::new(Device::new(I2cMock::new(&expectations)), NoopDelay::new());
    let result = rds.send_station_name(&mut session, "STATIONX");

    assert!(matches!(result, Err(Error::BusError)));
    assert_eq!(rds.state(), TxState::Idle);

    let (device, _) = rds.release();
    device.release().done();
}
