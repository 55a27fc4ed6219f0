//! End-to-end ripple behavior against the recording renderer

use proptest::prelude::*;

use rippler::headless::{run_until_idle, run_with};
use rippler::renderer::{RecordingRenderer, RenderCall};
use rippler::ripple::{Grid, WaveTracker};
use rippler::{Rippler, Settings, Tile};

const EVENT_LIMIT: usize = 200_000;

fn new_rippler(width: f64, height: f64) -> Rippler<RecordingRenderer> {
    Rippler::new(Settings::default(), RecordingRenderer::new(), width, height).unwrap()
}

/// Click every tile in turn, letting the grid go idle between clicks
fn replay(width: f64, height: f64, clicks: &[(usize, usize)]) -> Vec<RenderCall> {
    let mut r = new_rippler(width, height);
    for &(row, col) in clicks {
        r.on_user_activate(r.generation(), Tile::new(row, col));
        assert!(run_until_idle(&mut r, EVENT_LIMIT).is_idle());
    }
    r.renderer_mut().take_calls()
}

#[test]
fn test_four_by_four_scenario() {
    let mut r = new_rippler(128.0, 128.0);
    assert_eq!(r.grid().dimensions(), (4, 4));

    let wave = r.on_user_activate(r.generation(), Tile::new(0, 0)).unwrap();
    assert_eq!(wave.get(), 1);
    assert_eq!(r.state().sources().origin(wave), Some(Tile::new(0, 0)));

    let finished = r.renderer_mut().pop_finished().unwrap();
    assert_eq!(finished.tile, Tile::new(0, 0));
    r.renderer_mut().take_calls();
    r.on_animation_complete(finished.generation, finished.tile);

    let bearings: Vec<(Tile, f32)> = r
        .renderer()
        .directives()
        .filter_map(|c| match c {
            RenderCall::Transform { target, transform } if target.tile != Tile::new(0, 0) => {
                Some((target.tile, transform.rotate_z))
            }
            _ => None,
        })
        .collect();

    let expected = [
        (Tile::new(0, 1), 0.0),
        (Tile::new(1, 0), 90.0),
        (Tile::new(1, 1), 45.0),
    ];
    assert_eq!(bearings.len(), expected.len());
    for ((tile, angle), (want_tile, want_angle)) in bearings.iter().zip(expected) {
        assert_eq!(*tile, want_tile);
        assert!((angle - want_angle).abs() < 0.001, "{} got {}", tile, angle);
        assert_eq!(r.state().wave_of(*tile), Some(wave));
    }
}

#[test]
fn test_opposite_corners_earlier_wave_wins_any_order() {
    let middle = [
        Tile::new(3, 3),
        Tile::new(3, 4),
        Tile::new(4, 3),
        Tile::new(4, 4),
    ];

    // Oldest transition first
    let mut fifo = new_rippler(256.0, 256.0);
    let generation = fifo.generation();
    let first = fifo.on_user_activate(generation, Tile::new(0, 0)).unwrap();
    let second = fifo.on_user_activate(generation, Tile::new(7, 7)).unwrap();
    assert!(run_until_idle(&mut fifo, EVENT_LIMIT).is_idle());

    // Transitions on the second click's half of the grid always finish first
    let mut late_first = new_rippler(256.0, 256.0);
    let generation = late_first.generation();
    late_first.on_user_activate(generation, Tile::new(0, 0));
    late_first.on_user_activate(generation, Tile::new(7, 7));
    let outcome = run_with(&mut late_first, EVENT_LIMIT, |t| t.tile.row + t.tile.col >= 7);
    assert!(outcome.is_idle());

    for tile in middle {
        assert_eq!(fifo.state().wave_of(tile), Some(first), "fifo {}", tile);
        assert_eq!(late_first.state().wave_of(tile), Some(first), "late-first {}", tile);
        assert_ne!(fifo.state().wave_of(tile), Some(second));
    }
}

#[test]
fn test_second_wave_drains_when_it_finishes_first() {
    let mut r = new_rippler(256.0, 256.0);
    let generation = r.generation();
    r.on_user_activate(generation, Tile::new(0, 0));
    let second = r.on_user_activate(generation, Tile::new(7, 7)).unwrap();

    // Run only the second wave until it has nothing left in flight
    let origin = Tile::new(0, 0);
    loop {
        let next = r.renderer_mut().pop_finished_where(|t| t.tile != origin);
        let Some(finished) = next else { break };
        r.on_animation_complete(finished.generation, finished.tile);
    }

    // Wave 2 covered everything except the first click's origin
    assert_eq!(r.state().claimed_by(second), 63);

    // Then the first wave sweeps back over the whole grid
    assert!(run_until_idle(&mut r, EVENT_LIMIT).is_idle());
    assert_eq!(r.state().claimed_by(second), 0);
}

#[test]
fn test_resize_mid_ripple_isolated() {
    let mut r = new_rippler(256.0, 256.0);
    let old = r.generation();
    r.on_user_activate(old, Tile::new(4, 4));
    for _ in 0..5 {
        rippler::headless::step(&mut r);
    }
    let pending: Vec<_> = r.renderer().in_flight().copied().collect();
    assert!(!pending.is_empty());

    r.rebuild(256.0, 256.0);
    r.renderer_mut().take_calls();
    for event in &pending {
        r.on_animation_complete(event.generation, event.tile);
    }

    assert!(r.renderer().calls().is_empty());
    assert!(r.renderer().is_idle());
    for tile in r.grid().tiles().collect::<Vec<_>>() {
        assert_eq!(r.state().wave_of(tile), None);
        assert_eq!(r.state().rotation_of(tile), 0);
    }
    assert_eq!(r.stats().stale_events, pending.len() as u64);
}

#[test]
fn test_determinism_same_clicks_same_trace() {
    let clicks = [(2, 3), (0, 0), (5, 1), (2, 3)];
    let a = replay(200.0, 200.0, &clicks);
    let b = replay(200.0, 200.0, &clicks);
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

proptest! {
    #[test]
    fn prop_grid_dimensions_floor(width in -500.0f64..2000.0, height in -500.0f64..2000.0, diameter in 1u32..100) {
        let grid = Grid::build(width, height, diameter);
        let expect = |extent: f64| if extent <= 0.0 { 0 } else { (extent / diameter as f64).floor() as usize };
        prop_assert_eq!(grid.dimensions(), (expect(width), expect(height)));
    }

    #[test]
    fn prop_neighbor_counts(wide in 2usize..12, tall in 2usize..12, row in 0usize..12, col in 0usize..12) {
        let grid = Grid::build((wide * 32) as f64, (tall * 32) as f64, 32);
        let tile = Tile::new(row % tall, col % wide);
        let on_row_edge = tile.row == 0 || tile.row == tall - 1;
        let on_col_edge = tile.col == 0 || tile.col == wide - 1;
        let expected = match (on_row_edge, on_col_edge) {
            (true, true) => 3,
            (true, false) | (false, true) => 5,
            (false, false) => 8,
        };
        let neighbors: Vec<Tile> = grid.neighbors_of(tile).collect();
        prop_assert_eq!(neighbors.len(), expected);
        prop_assert!(!neighbors.contains(&tile));
        for n in neighbors {
            prop_assert!(grid.contains(n));
            prop_assert!(n.row.abs_diff(tile.row) <= 1 && n.col.abs_diff(tile.col) <= 1);
        }
    }

    #[test]
    fn prop_record_if_newer_keeps_minimum(order in proptest::collection::vec(0usize..6, 1..20)) {
        let grid = Grid::build(32.0, 32.0, 32);
        let mut sources = rippler::ripple::ClickSources::new();
        let waves: Vec<_> = (0..6).map(|_| sources.push(Tile::new(0, 0))).collect();
        let mut tracker = WaveTracker::new(&grid);
        let tile = Tile::new(0, 0);

        let mut lowest: Option<rippler::WaveId> = None;
        for &i in &order {
            let wave = waves[i];
            let changed = tracker.record_if_newer(tile, wave);
            let expect_change = lowest.is_none_or(|low| wave < low);
            prop_assert_eq!(changed, expect_change);
            if expect_change {
                lowest = Some(wave);
            }
            prop_assert_eq!(tracker.wave_of(tile), lowest);
        }
    }

    #[test]
    fn prop_ripples_terminate(
        wide in 1usize..8,
        tall in 1usize..8,
        clicks in proptest::collection::vec((0usize..8, 0usize..8, 0usize..40), 1..5),
    ) {
        let mut r = new_rippler((wide * 32) as f64, (tall * 32) as f64);
        let generation = r.generation();
        for (row, col, steps) in clicks {
            // Out-of-range clicks are part of the input space and must be ignored
            r.on_user_activate(generation, Tile::new(row, col));
            for _ in 0..steps {
                rippler::headless::step(&mut r);
            }
        }
        let outcome = run_until_idle(&mut r, EVENT_LIMIT);
        prop_assert!(outcome.is_idle());
        for tile in r.grid().tiles().collect::<Vec<_>>() {
            prop_assert_eq!(r.state().rotation_of(tile) % 360, 0);
        }
    }

    #[test]
    fn prop_trace_is_deterministic(clicks in proptest::collection::vec((0usize..6, 0usize..6), 1..4)) {
        prop_assert_eq!(replay(192.0, 160.0, &clicks), replay(192.0, 160.0, &clicks));
    }
}
