use once_cell::sync::OnceCell;

use super::ppu::Ppu;
use super::*;
use crate::cpu::{Bus, InterruptFlags};
use crate::error::GbError;

static SPIN_ROM: OnceCell<Vec<u8>> = OnceCell::new();

/// 32 KiB ROM-only image titled "TEST" whose entry point is `JR -2`.
fn spin_rom() -> &'static [u8] {
    SPIN_ROM.get_or_init(|| rom_with(&[0x18, 0xFE]))
}

/// ROM-only image with `program` at the 0x0100 entry point.
fn rom_with(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0134..0x0138].copy_from_slice(b"TEST");
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom
}

fn machine_with(program: &[u8]) -> GameBoy {
    let mut gb = GameBoy::new();
    gb.load_rom(&rom_with(program)).unwrap();
    gb
}

/// Bus in post-boot state with IF cleared and the LCD on.
fn ppu_bus() -> GameBoyBus {
    let mut bus = GameBoyBus::default();
    bus.set_io(io::IF, 0);
    bus.set_io(io::STAT, 0x80);
    bus
}

fn run_line(ppu: &mut Ppu, bus: &mut GameBoyBus) {
    ppu.step(bus, 80);
    ppu.step(bus, 172);
    ppu.step(bus, 204);
}

#[test]
fn ppu_walks_oam_vram_hblank_then_next_line_without_interrupts() {
    let mut bus = ppu_bus();
    let mut ppu = Ppu::new();
    assert_eq!(ppu.mode(), PpuMode::OamScan);
    assert_eq!(ppu.line(), 0);

    ppu.step(&mut bus, 80);
    assert_eq!(ppu.mode(), PpuMode::VramRead);
    assert_eq!(bus.io(io::STAT) & 0x03, 3);

    ppu.step(&mut bus, 172);
    assert_eq!(ppu.mode(), PpuMode::HBlank);
    assert_eq!(bus.io(io::STAT) & 0x03, 0);

    ppu.step(&mut bus, 204);
    assert_eq!(ppu.mode(), PpuMode::OamScan);
    assert_eq!(ppu.line(), 1);
    assert_eq!(bus.io(io::LY), 1);

    assert_eq!(bus.io(io::IF) & 0x03, 0);
}

#[test]
fn ppu_stays_in_mode_until_threshold() {
    let mut bus = ppu_bus();
    let mut ppu = Ppu::new();
    ppu.step(&mut bus, 79);
    assert_eq!(ppu.mode(), PpuMode::OamScan);
    ppu.step(&mut bus, 1);
    assert_eq!(ppu.mode(), PpuMode::VramRead);
}

#[test]
fn vblank_entry_requests_interrupts_and_composes_a_frame() {
    let mut bus = ppu_bus();
    bus.set_io(io::STAT, 0x80 | Stat::VBLANK_INT.bits());
    let mut ppu = Ppu::new();

    for _ in 0..143 {
        run_line(&mut ppu, &mut bus);
    }
    assert_eq!(ppu.line(), 143);
    assert_eq!(ppu.frames(), 0);
    assert_eq!(bus.io(io::IF), 0);

    run_line(&mut ppu, &mut bus);
    assert_eq!(ppu.mode(), PpuMode::VBlank);
    assert_eq!(ppu.line(), 144);
    assert_eq!(ppu.frames(), 1);
    assert_eq!(
        bus.io(io::IF),
        (InterruptFlags::VBLANK | InterruptFlags::LCD_STAT).bits()
    );

    for _ in 144..153 {
        ppu.step(&mut bus, 456);
        assert_eq!(ppu.mode(), PpuMode::VBlank);
    }
    assert_eq!(ppu.line(), 153);
    ppu.step(&mut bus, 456);
    assert_eq!(ppu.mode(), PpuMode::OamScan);
    assert_eq!(ppu.line(), 0);
    assert_eq!(bus.io(io::LY), 0);
}

#[test]
fn mode_entry_stat_interrupts_follow_enable_bits() {
    let mut bus = ppu_bus();
    bus.set_io(io::STAT, 0x80 | Stat::HBLANK_INT.bits());
    let mut ppu = Ppu::new();
    ppu.step(&mut bus, 80);
    assert_eq!(bus.io(io::IF), 0);
    ppu.step(&mut bus, 172);
    assert_eq!(bus.io(io::IF), InterruptFlags::LCD_STAT.bits());

    bus.set_io(io::IF, 0);
    bus.set_io(io::STAT, 0x80 | Stat::OAM_INT.bits());
    ppu.step(&mut bus, 204);
    assert_eq!(ppu.mode(), PpuMode::OamScan);
    assert_eq!(bus.io(io::IF), InterruptFlags::LCD_STAT.bits());
}

#[test]
fn mode_counter_restarts_on_every_transition() {
    let mut bus = ppu_bus();
    let mut ppu = Ppu::new();

    // The 10 cycles past the OAM threshold are dropped.
    ppu.step(&mut bus, 90);
    assert_eq!(ppu.mode(), PpuMode::VramRead);
    ppu.step(&mut bus, 165);
    assert_eq!(ppu.mode(), PpuMode::VramRead);
    ppu.step(&mut bus, 7);
    assert_eq!(ppu.mode(), PpuMode::HBlank);
}

#[test]
fn coincidence_requests_stat_interrupt_on_every_equal_step() {
    let mut bus = ppu_bus();
    bus.set_io(io::LYC, 1);
    bus.set_io(io::STAT, 0x80 | Stat::LYC_INT.bits());
    let mut ppu = Ppu::new();

    ppu.step(&mut bus, 4);
    assert_eq!(bus.io(io::STAT) & Stat::COINCIDENCE.bits(), 0);
    assert_eq!(bus.io(io::IF), 0);

    run_line(&mut ppu, &mut bus);
    assert_eq!(ppu.line(), 1);
    assert_ne!(bus.io(io::STAT) & Stat::COINCIDENCE.bits(), 0);
    assert_eq!(bus.io(io::IF), InterruptFlags::LCD_STAT.bits());

    // Still equal: requested again.
    bus.set_io(io::IF, 0);
    ppu.step(&mut bus, 4);
    assert_eq!(bus.io(io::IF), InterruptFlags::LCD_STAT.bits());
    assert_ne!(bus.io(io::STAT) & Stat::COINCIDENCE.bits(), 0);

    bus.set_io(io::IF, 0);
    ppu.step(&mut bus, 76);
    assert_eq!(ppu.mode(), PpuMode::VramRead);
    assert_eq!(bus.io(io::IF), InterruptFlags::LCD_STAT.bits());

    // Next line clears the coincidence bit and stops the requests.
    ppu.step(&mut bus, 172);
    bus.set_io(io::IF, 0);
    ppu.step(&mut bus, 204);
    assert_eq!(ppu.line(), 2);
    assert_eq!(bus.io(io::STAT) & Stat::COINCIDENCE.bits(), 0);
    assert_eq!(bus.io(io::IF), 0);
}

#[test]
fn coincidence_without_its_enable_bit_only_sets_status() {
    let mut bus = ppu_bus();
    bus.set_io(io::LYC, 0);
    let mut ppu = Ppu::new();

    ppu.step(&mut bus, 4);
    assert_ne!(bus.io(io::STAT) & Stat::COINCIDENCE.bits(), 0);
    assert_eq!(bus.io(io::IF), 0);

    bus.set_io(io::STAT, 0x80 | Stat::LYC_INT.bits());
    ppu.step(&mut bus, 4);
    assert_eq!(bus.io(io::IF), InterruptFlags::LCD_STAT.bits());
    bus.set_io(io::IF, 0);
    ppu.step(&mut bus, 4);
    assert_eq!(bus.io(io::IF), InterruptFlags::LCD_STAT.bits());
}

#[test]
fn lcd_off_resets_scanline_and_forces_idle_status() {
    let mut bus = ppu_bus();
    let mut ppu = Ppu::new();
    for _ in 0..5 {
        run_line(&mut ppu, &mut bus);
    }
    ppu.step(&mut bus, 40);
    assert_eq!(bus.io(io::LY), 5);

    bus.set_io(io::LCDC, 0x11);
    ppu.step(&mut bus, 4);
    assert_eq!(ppu.line(), 0);
    assert_eq!(bus.io(io::LY), 0);
    assert_eq!(bus.io(io::STAT), 0x80);

    // Frame goes blank while the display is off.
    let shade = PALETTE[0].to_bytes();
    assert!(ppu.frame().chunks_exact(4).all(|px| px == shade));

    // Turning it back on starts from OAM scan on line 0 with a fresh counter.
    bus.set_io(io::LCDC, 0x91);
    ppu.step(&mut bus, 79);
    assert_eq!(ppu.mode(), PpuMode::OamScan);
    ppu.step(&mut bus, 1);
    assert_eq!(ppu.mode(), PpuMode::VramRead);
}

#[test]
fn cartridge_title_is_trimmed() {
    let mut gb = GameBoy::new();
    let header = gb.load_rom(spin_rom()).unwrap();
    assert_eq!(header.title, "TEST");
    assert_eq!(header.cartridge_type, 0x00);
    assert_eq!(gb.cartridge().map(|h| h.title.as_str()), Some("TEST"));
}

#[test]
fn truncated_cartridge_is_rejected() {
    let mut gb = GameBoy::new();
    let err = gb.load_rom(&[0u8; 0x0140]).unwrap_err();
    assert!(matches!(err, GbError::MalformedCartridge { len: 0x0140, .. }));
    assert!(gb.cartridge().is_none());
}

#[test]
fn spinning_cartridge_produces_identical_frames() {
    let mut gb = GameBoy::new();
    gb.load_rom(spin_rom()).unwrap();

    let first = gb.step_frame().unwrap().to_vec();
    assert_eq!(first.len(), crate::FRAME_BYTES);
    for _ in 0..4 {
        let next = gb.step_frame().unwrap();
        assert_eq!(next, &first[..]);
    }
    assert!(gb.frames_rendered() >= 4);
    assert_eq!(gb.cpu.regs.pc, 0x0100);
}

#[test]
fn frame_budget_is_clock_over_rate() {
    assert_eq!(CYCLES_PER_FRAME, 69_905);
    assert_eq!(GameBoyConfig::default().cycles_per_frame(), CYCLES_PER_FRAME);
    let config = GameBoyConfig::builder().clock_hz(1_000).frame_rate(10).build();
    assert_eq!(config.cycles_per_frame(), 100);
}

#[test]
fn scheduler_applies_ei_after_one_instruction() {
    let mut gb = machine_with(&[
        0xFB, // EI
        0x00, // NOP
        0x18, 0xFE, // JR -2
    ]);
    gb.write8(io::IE, InterruptFlags::VBLANK.bits());
    gb.write8(io::IF, InterruptFlags::VBLANK.bits());
    gb.cpu.regs.sp = 0xDFFE;

    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.pc, 0x0101);
    assert!(!gb.cpu.ime);

    let cycles = gb.step().unwrap();
    assert_eq!(cycles, 4 + crate::cpu::INTERRUPT_CYCLES);
    assert_eq!(gb.cpu.regs.pc, 0x0040);
    assert_eq!(gb.read8(0xDFFC), 0x02);
    assert_eq!(gb.read8(0xDFFD), 0x01);
    assert_eq!(gb.read8(io::IF) & 0x1F, 0);
}

#[test]
fn dispatch_discards_an_ei_issued_while_already_enabled() {
    let mut rom = rom_with(&[
        0xFB, // EI
        0x18, 0xFE, // JR -2
    ]);
    rom[0x0040] = 0x00; // NOP
    rom[0x0041] = 0x00; // NOP
    let mut gb = GameBoy::new();
    gb.load_rom(&rom).unwrap();
    gb.cpu.ime = true;
    gb.cpu.regs.sp = 0xDFFE;
    let both = (InterruptFlags::VBLANK | InterruptFlags::LCD_STAT).bits();
    gb.write8(io::IE, both);
    gb.write8(io::IF, both);

    // EI runs, then VBlank is dispatched.
    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.pc, 0x0040);
    assert!(!gb.cpu.ime);
    assert!(!gb.cpu.ime_pending());

    // The handler is not interrupted by the still-pending LCD-status request.
    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.pc, 0x0041);
    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.pc, 0x0042);
    assert!(!gb.cpu.ime);
    assert_ne!(gb.read8(io::IF) & InterruptFlags::LCD_STAT.bits(), 0);
}

#[test]
fn vblank_handler_runs_and_returns() {
    let mut rom = rom_with(&[
        0xFB, // EI
        0x18, 0xFE, // JR -2
    ]);
    rom[0x0040..0x0046].copy_from_slice(&[
        0x3C, // INC A
        0xEA, 0x00, 0xC0, // LD (0xC000),A
        0xD9, // RETI
        0x00,
    ]);
    let mut gb = GameBoy::new();
    gb.load_rom(&rom).unwrap();
    gb.cpu.regs.a = 0;
    gb.write8(io::IF, 0);
    gb.write8(io::IE, InterruptFlags::VBLANK.bits());

    gb.step_frame().unwrap();
    gb.step_frame().unwrap();
    let count = gb.read8(0xC000);
    assert!((1..=2).contains(&count), "count={count}");
    assert!(gb.cpu.ime);
}

#[test]
fn halted_cpu_wakes_when_vblank_is_requested() {
    let mut gb = machine_with(&[
        0x76, // HALT
        0x18, 0xFE, // JR -2
    ]);
    gb.write8(io::IF, 0);
    gb.write8(io::IE, 0);

    gb.step().unwrap();
    assert!(gb.cpu.halted);
    assert_eq!(gb.step().unwrap(), 4);
    assert!(gb.cpu.halted);

    gb.step_frame().unwrap();
    assert!(!gb.cpu.halted);
    assert_eq!(gb.cpu.regs.pc, 0x0101);
}

#[test]
fn unimplemented_opcode_stops_the_frame() {
    let mut gb = machine_with(&[0x00, 0xDD]);
    let err = gb.step_frame().unwrap_err();
    assert_eq!(
        err,
        GbError::UnimplementedOpcode {
            opcode: 0xDD,
            pc: 0x0101
        }
    );
}

#[test]
fn timer_overflow_reloads_and_requests_interrupt() {
    let mut bus = GameBoyBus::default();
    bus.write8(io::DIV, 0);
    bus.write8(io::TAC, 0x05); // enabled, 16-cycle period
    bus.write8(io::TIMA, 0xFF);
    bus.write8(io::TMA, 0xAB);
    bus.write8(io::IF, 0);

    bus.tick_timer(15);
    assert_eq!(bus.read8(io::TIMA), 0xFF);
    assert_eq!(bus.read8(io::IF) & 0x04, 0);

    bus.tick_timer(1);
    assert_eq!(bus.read8(io::TIMA), 0xAB);
    assert_ne!(bus.read8(io::IF) & 0x04, 0);
}

#[test]
fn div_counts_every_256_cycles_and_resets_on_write() {
    let mut bus = GameBoyBus::default();
    assert_eq!(bus.read8(io::DIV), 0xAB);
    bus.write8(io::DIV, 0x42);
    assert_eq!(bus.read8(io::DIV), 0);
    bus.tick_timer(255);
    assert_eq!(bus.read8(io::DIV), 0);
    bus.tick_timer(1);
    assert_eq!(bus.read8(io::DIV), 1);
}

#[test]
fn disabled_timer_does_not_count() {
    let mut bus = GameBoyBus::default();
    bus.write8(io::TAC, 0x01);
    bus.write8(io::TIMA, 0x10);
    bus.tick_timer(1024);
    assert_eq!(bus.read8(io::TIMA), 0x10);
    assert_eq!(bus.read8(io::TAC), 0xF9);
}

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut bus = GameBoyBus::default();
    bus.write8(0xC123, 0x5A);
    assert_eq!(bus.read8(0xE123), 0x5A);
    bus.write8(0xFDFF, 0xA5);
    assert_eq!(bus.read8(0xDDFF), 0xA5);
}

#[test]
fn rom_is_read_only_and_unusable_area_reads_ff() {
    let mut gb = machine_with(&[0x00]);
    gb.write8(0x0134, 0xFF);
    assert_eq!(gb.read8(0x0134), b'T');
    gb.write8(0xFEA0, 0x12);
    assert_eq!(gb.read8(0xFEA0), 0xFF);
}

#[test]
fn interrupt_registers_live_at_ff0f_and_ffff() {
    let mut bus = GameBoyBus::default();
    bus.write8(io::IF, 0xFF);
    assert_eq!(bus.read8(io::IF), 0xFF);
    assert_eq!(bus.io(io::IF), 0x1F);
    bus.write8(io::IF, 0x00);
    assert_eq!(bus.read8(io::IF), 0xE0);

    bus.write8(0xFFFF, 0x05);
    assert_eq!(bus.read8(crate::cpu::IE_ADDR), 0x05);
    assert_eq!(bus.read8(0xFFFE), 0x00);
}

#[test]
fn ly_is_read_only_and_stat_low_bits_are_preserved() {
    let mut bus = ppu_bus();
    bus.set_io(io::LY, 7);
    bus.write8(io::LY, 0);
    assert_eq!(bus.read8(io::LY), 7);

    bus.set_io(io::STAT, 0x83);
    bus.write8(io::STAT, 0x48);
    assert_eq!(bus.read8(io::STAT), 0x80 | 0x48 | 0x03);
}

#[test]
fn oam_dma_copies_160_bytes() {
    let mut bus = GameBoyBus::default();
    for i in 0..0xA0u16 {
        bus.write8(0xC000 + i, i as u8 ^ 0x5A);
    }
    bus.write8(io::DMA, 0xC0);
    for i in 0..0xA0u16 {
        assert_eq!(bus.read8(0xFE00 + i), i as u8 ^ 0x5A);
    }
    assert_eq!(bus.read8(io::DMA), 0xC0);
}

#[test]
fn boot_rom_overlays_until_disabled() {
    let mut boot = vec![0u8; 0x100];
    boot[0] = 0x31;
    let config = GameBoyConfig::builder().boot_rom(boot).build();
    let mut gb = GameBoy::with_config(config);
    gb.load_rom(spin_rom()).unwrap();

    assert_eq!(gb.cpu.regs.pc, 0x0000);
    assert!(gb.boot_rom_mapped());
    assert_eq!(gb.read8(0x0000), 0x31);
    // Above the overlay the cartridge shows through.
    assert_eq!(gb.read8(0x0100), 0x18);

    gb.write8(io::BOOT, 0x01);
    assert!(!gb.boot_rom_mapped());
    assert_eq!(gb.read8(0x0000), 0x00);
}

#[test]
fn serial_transfer_is_captured() {
    let mut gb = machine_with(&[
        0x3E, b'o', // LD A,'o'
        0xE0, 0x01, // LDH (SB),A
        0x3E, 0x81, // LD A,0x81
        0xE0, 0x02, // LDH (SC),A
        0x18, 0xFE, // JR -2
    ]);
    for _ in 0..5 {
        gb.step().unwrap();
    }
    assert_eq!(gb.serial_output(), b"o");
    assert_eq!(gb.read8(io::SC) & 0x80, 0);
}

#[test]
fn key_press_selects_group_and_requests_joypad_interrupt() {
    use dotboy_common::key::Key;

    let mut gb = machine_with(&[0x00]);
    gb.write8(io::IF, 0);
    gb.write8(io::P1, 0x10); // select buttons
    assert_eq!(gb.read8(io::P1), 0xDF);

    gb.handle_key(Key::S, true); // Start
    assert_eq!(gb.read8(io::P1) & 0x0F, 0b0111);
    assert_eq!(gb.read8(io::IF) & 0x10, 0x10);

    // D-pad is not selected, so arrows do not show up.
    gb.handle_key(Key::Left, true);
    assert_eq!(gb.read8(io::P1) & 0x0F, 0b0111);

    gb.handle_key(Key::S, false);
    assert_eq!(gb.read8(io::P1) & 0x0F, 0b1111);
}

#[test]
fn enter_and_space_double_as_start_and_select() {
    use dotboy_common::key::Key;

    let mut gb = machine_with(&[0x00]);
    gb.write8(io::P1, 0x10);

    gb.handle_key(Key::Enter, true);
    assert_eq!(gb.read8(io::P1) & 0x0F, 0b0111);
    gb.handle_key(Key::Space, true);
    assert_eq!(gb.read8(io::P1) & 0x0F, 0b0011);

    gb.handle_key(Key::Enter, false);
    gb.handle_key(Key::Space, false);
    assert_eq!(gb.read8(io::P1) & 0x0F, 0b1111);
}

#[test]
fn scanline_tracks_ly_through_the_scheduler() {
    let mut gb = machine_with(&[0x18, 0xFE]);
    assert_eq!(gb.scanline(), 0);
    while gb.scanline() < 10 {
        gb.step().unwrap();
    }
    assert_eq!(gb.scanline(), 10);
    assert_eq!(gb.read8(io::LY), 10);
}
