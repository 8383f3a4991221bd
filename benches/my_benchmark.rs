use chip8_core::{ChipSet, Rom};
use criterion::{criterion_group, criterion_main, Criterion};

const ROM_NAME: &str = "LOOP";

/// Counts `V0` up, draws glyph `0` at `(V0, V1)` and jumps back to the start.
const LOOP_PROGRAM: [u8; 10] = [0x70, 0x01, 0xF0, 0x29, 0xD0, 0x15, 0x00, 0xE0, 0x12, 0x00];

static BASE_ROM: once_cell::sync::Lazy<Rom> = once_cell::sync::Lazy::new(|| {
    Rom::new(ROM_NAME, LOOP_PROGRAM.to_vec()).expect("The loop program is a valid rom.")
});

fn get_base() -> Rom {
    BASE_ROM.clone()
}

/// will setup the default configured chip
fn get_default_chip() -> ChipSet {
    ChipSet::new(get_base())
}

pub fn step_bench(c: &mut Criterion) {
    let mut chip = get_default_chip();
    c.bench_function("step_bench", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                let _ = chip.step();
            }
        });
    });
}

pub fn print_bench(c: &mut Criterion) {
    let chip = get_default_chip();
    c.bench_function("print_bench", |b| {
        b.iter(|| {
            let _ = format!("{}", chip);
        });
    });
}

criterion_group!(benches, step_bench, print_bench);
criterion_main!(benches);
