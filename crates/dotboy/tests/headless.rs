use dotboy::RunInfo;
use dotboy_gb::machine::PALETTE;
use dotboy_gb::FRAME_BYTES;

/// 32 KiB image whose entry point spins on `JR -2`.
fn spin_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0100] = 0x18; // JR -2
    rom[0x0101] = 0xFE;
    rom[0x0134..0x0138].copy_from_slice(b"SPIN");
    rom
}

#[test]
fn runs_frames_and_writes_last_frame() {
    let out = std::env::temp_dir().join(format!("dotboy-headless-{}.rgba", std::process::id()));
    let info = RunInfo::builder()
        .frames(3)
        .output(Some(out.clone()))
        .build();

    let frame = dotboy::run(info, &spin_rom()).unwrap();
    assert_eq!(frame.len(), FRAME_BYTES);
    assert_eq!(frame[..4], PALETTE[0].to_bytes());

    let written = std::fs::read(&out).unwrap();
    assert_eq!(written, frame);
    let _ = std::fs::remove_file(out);
}

#[test]
fn truncated_cartridge_is_reported() {
    let err = dotboy::run(RunInfo::builder().frames(1).build(), &[0u8; 0x40]).unwrap_err();
    assert!(format!("{:#}", err).contains("malformed cartridge"));
}

#[test]
fn run_info_builder_accepts_optional_paths() {
    let info = RunInfo::builder().output(None).boot_rom(None).build();
    assert_eq!(info.frames, 60);
    assert!(info.output.is_none());
    assert!(info.boot_rom.is_none());

    let info = RunInfo::builder().frames(2).boot_rom(Some(vec![0u8; 0x100])).build();
    assert_eq!(info.boot_rom.as_deref().map(<[u8]>::len), Some(0x100));
    let frame = dotboy::run(info, &spin_rom()).unwrap();
    assert_eq!(frame.len(), FRAME_BYTES);
}
