//! Benchmarks for the control loop and the drum mixer.
//!
//! Run with: cargo bench
//!
//! The scheduler runs once per control frame (about 1ms), the mixer once per
//! audio callback. Reference deadlines at 48kHz:
//!   - 64 samples  = 1.33ms
//!   - 256 samples = 5.33ms
//!   - 512 samples = 10.67ms

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use looptick::{
    drums::{DrumKit, DrumMessage, DrumMixer},
    io::KeyEvent,
    sequencing::Sequencer,
};

const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// Twelve pads, every one active with a different period
fn busy_sequencer() -> Sequencer {
    let mut seq = Sequencer::new(12, 6, 1_000, 1);
    let mut encoder = 0;
    for pad in 0..12 {
        seq.on_key_event(KeyEvent::press(pad));
        encoder += 10 + pad as i64 * 70;
        seq.on_encoder_changed(encoder);
        seq.on_key_event(KeyEvent::release(pad));
    }
    seq
}

fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequencing/poll");

    group.bench_function("12_pads_idle", |b| {
        let mut seq = Sequencer::new(12, 6, 1_000, 1);
        seq.poll(0, |_| {});
        b.iter(|| seq.poll(black_box(1), |tick| {
            black_box(tick);
        }))
    });

    group.bench_function("12_pads_running", |b| {
        let mut seq = busy_sequencer();
        let mut now = 0;
        b.iter(|| {
            now += 1;
            seq.poll(black_box(now), |tick| {
                black_box(tick);
            })
        })
    });

    group.finish();
}

fn bench_mixer(c: &mut Criterion) {
    let mut group = c.benchmark_group("drums/mixer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut mixer = DrumMixer::new(DrumKit::synthesized(48_000), 48_000.0, 0.8);
        group.bench_with_input(BenchmarkId::new("silent", size), &size, |b, _| {
            b.iter(|| mixer.render(black_box(&mut buffer)))
        });

        // source rate differs from output, so every voice interpolates
        let mut mixer = DrumMixer::new(DrumKit::synthesized(44_100), 48_000.0, 0.8);
        group.bench_with_input(BenchmarkId::new("both_slots", size), &size, |b, _| {
            b.iter(|| {
                mixer.handle(DrumMessage::Trigger { slot: 0 });
                mixer.handle(DrumMessage::Trigger { slot: 1 });
                mixer.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scheduler, bench_mixer);
criterion_main!(benches);
