use super::*;
use crate::emit::sink::InMemorySink;
use crate::foundation::core::{Color, Fps, Resolution, WorldPos};

fn opts(threading: EncodeThreading) -> EmitOpts {
    EmitOpts {
        layout: BarrelLayout::new(WorldPos::new(10, 100, -5), -1, 1),
        palette: Palette::default(),
        threading,
    }
}

fn clip(width: u32, height: u32, frames: usize) -> FrameSequence {
    FrameSequence::from_fn(
        Resolution::new(width, height).unwrap(),
        Fps::new(15, 1).unwrap(),
        frames,
        |f, p| Color::from_bit(((f / (1 + p.x as usize + p.y as usize)) % 2) as u8),
    )
    .unwrap()
}

#[test]
fn one_command_per_pixel_then_cleanup() {
    let seq = clip(3, 2, 20);
    let mut sink = InMemorySink::new();
    let stats = emit_function(&seq, &opts(EncodeThreading::sequential()), &mut sink).unwrap();

    assert!(sink.is_finished());
    assert_eq!(stats.pixels, 6);
    assert_eq!(sink.commands().len(), 7);
    assert_eq!(sink.config().unwrap().commands, 7);
    assert_eq!(sink.commands().last().unwrap(), CLEANUP_COMMAND);
    assert!(sink.commands()[..6].iter().all(|c| c.starts_with("setblock ")));
}

#[test]
fn commands_follow_column_major_order() {
    let seq = clip(2, 3, 4);
    let mut sink = InMemorySink::new();
    emit_function(&seq, &opts(EncodeThreading::sequential()), &mut sink).unwrap();

    let prefixes: Vec<&str> = sink.commands()[..6]
        .iter()
        .map(|c| c.split(" minecraft:barrel").next().unwrap())
        .collect();
    assert_eq!(
        prefixes,
        vec![
            "setblock 10 100 -5",
            "setblock 10 99 -5",
            "setblock 10 98 -5",
            "setblock 10 100 -4",
            "setblock 10 99 -4",
            "setblock 10 98 -4",
        ]
    );
}

#[test]
fn output_is_identical_across_thread_settings() {
    let seq = clip(7, 5, 300);

    let mut sequential = InMemorySink::new();
    emit_function(&seq, &opts(EncodeThreading::sequential()), &mut sequential).unwrap();

    for threads in [1, 2, 4] {
        let mut parallel = InMemorySink::new();
        let threading = EncodeThreading {
            parallel: true,
            threads: Some(threads),
            chunk_pixels: 3,
        };
        emit_function(&seq, &opts(threading), &mut parallel).unwrap();
        assert_eq!(parallel.to_text(), sequential.to_text());
        assert_eq!(parallel.digest_hex(), sequential.digest_hex());
    }
}

#[test]
fn overflow_is_reported_before_the_sink_starts() {
    // Pixel (1, 0) flips every frame: 730 frames -> 730 unit runs.
    let res = Resolution::new(2, 1).unwrap();
    let seq = FrameSequence::from_fn(res, Fps::new(30, 1).unwrap(), 730, |f, p| {
        if p.x == 1 {
            Color::from_bit((f % 2) as u8)
        } else {
            Color::Off
        }
    })
    .unwrap();

    let mut sink = InMemorySink::new();
    let err = emit_function(&seq, &opts(EncodeThreading::default()), &mut sink).unwrap_err();
    match err {
        ScreenError::CapacityOverflow {
            pixel,
            runs_required,
        } => {
            assert_eq!(pixel, PixelPos::new(1, 0));
            assert_eq!(runs_required, 730);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(sink.config().is_none());
    assert!(sink.commands().is_empty());
}

#[test]
fn exactly_full_barrel_is_emitted() {
    let res = Resolution::new(1, 1).unwrap();
    let seq = FrameSequence::from_fn(res, Fps::new(30, 1).unwrap(), 729, |f, _| {
        Color::from_bit((f % 2) as u8)
    })
    .unwrap();
    let mut sink = InMemorySink::new();
    let stats = emit_function(&seq, &opts(EncodeThreading::sequential()), &mut sink).unwrap();
    assert_eq!(stats.max_runs_per_pixel, 729);
    assert_eq!(stats.shulkers_total, 27);
    assert_eq!(sink.commands()[0].matches("white_shulker_box").count(), 27);
}

#[test]
fn check_capacity_reports_first_pixel_in_column_major_order() {
    let res = Resolution::new(2, 2).unwrap();
    let big = vec![Run::new(Color::On, 1); 800];
    let table = RunTable::from_pixel_runs(
        res,
        800,
        vec![vec![], big.clone(), big, vec![]],
    )
    .unwrap();
    match check_capacity(&table) {
        Err(ScreenError::CapacityOverflow {
            pixel,
            runs_required,
        }) => {
            assert_eq!(pixel, PixelPos::new(0, 1));
            assert_eq!(runs_required, 800);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
