//! Scenario tests: fan-out fringes, absorption, emitter cadence, and the
//! qualitative double-slit check.

use crate::config::Config;
use crate::direction::Direction;
use crate::edit::{Edit, EditKind};
use crate::tile::TileKind;
use crate::Grid;

fn grid(rows: usize, cols: usize) -> Grid {
    match Grid::new(rows, cols) {
        Ok(grid) => grid,
        Err(err) => panic!("construction rejected: {err}"),
    }
}

fn grid_with(rows: usize, cols: usize, config: Config) -> Grid {
    match Grid::with_config(rows, cols, config) {
        Ok(grid) => grid,
        Err(err) => panic!("construction rejected: {err}"),
    }
}

/// Helper: print the superposition field for debugging.
fn dump(grid: &Grid) {
    for row in 0..grid.rows() as i32 {
        let mut line = String::new();
        for col in 0..grid.cols() as i32 {
            let (kind, value) = grid.read_cell(row, col);
            if kind == TileKind::Wall {
                line.push_str("  ####");
            } else {
                line.push_str(&format!(" {value:5.2}"));
            }
        }
        eprintln!("r={row:2}: {line}");
    }
}

/// A wave injected rightward fans into three cells: the straight neighbor
/// strongest, the diagonal neighbors weaker, and everything decays back
/// to silence.
#[test]
fn injected_wave_fans_and_decays() {
    let mut grid = grid(3, 3);
    grid.submit_edit(Edit::new(EditKind::InjectWave, 1, 0));

    grid.step(0.0);
    // The pair is resident at the origin; the leftward twin will fall off
    // the grid edge on its first move.
    assert!((grid.read_cell(1, 0).1 - 2.0).abs() < 1e-6);

    grid.step(0.0);
    dump(&grid);
    let straight = grid.read_cell(1, 1).1;
    let upper = grid.read_cell(0, 1).1;
    let lower = grid.read_cell(2, 1).1;
    assert!((straight - 0.75).abs() < 1e-6);
    assert!((upper - 0.6375).abs() < 1e-6);
    assert!((lower - 0.6375).abs() < 1e-6);
    assert!(upper < straight);
    assert!(grid.read_cell(1, 0).1.abs() < 1e-6);

    for _ in 0..60 {
        grid.step(0.0);
    }
    for row in 0..3 {
        for col in 0..3 {
            assert_eq!(grid.particle_count(row, col), 0);
            assert!(grid.read_cell(row, col).1.abs() < 1e-3);
        }
    }
}

/// A wall in a one-cell channel: the wave dies there. No intensity ever
/// registers on the wall and nothing propagates past it.
#[test]
fn absorbing_wall_stops_the_wave() {
    let mut grid = grid(1, 4);
    grid.submit_edit(Edit::new(EditKind::ToggleWall, 0, 2));
    grid.submit_edit(Edit::new(EditKind::InjectWave, 0, 0));

    for _ in 0..20 {
        grid.step(0.0);
        assert_eq!(grid.read_cell(0, 2), (TileKind::Wall, -1.0));
        assert_eq!(grid.read_cell(0, 3).1, 0.0);
        assert_eq!(grid.particle_count(0, 3), 0);
    }
}

/// An emitter pulses nothing before its interval elapses, then seeds a
/// wavelet that shows up downstream one tick later.
#[test]
fn emitter_respects_its_interval() {
    let config = Config {
        emit_directions: vec![Direction::Right],
        emit_interval_ms: 100.0,
        ..Config::default()
    };
    let mut grid = grid_with(1, 3, config);
    grid.submit_edit(Edit::new(EditKind::ToggleEmitter, 0, 0));
    grid.step(0.0);
    assert_eq!(grid.read_cell(0, 0).0, TileKind::Emitter);

    // 50 ms of simulation time: still silent.
    grid.step(50.0);
    for col in 0..3 {
        assert_eq!(grid.particle_count(0, col), 0);
        assert_eq!(grid.read_cell(0, col).1, 0.0);
    }

    // The next 50 ms reach the interval: one wavelet is born on the
    // emitter, and acts on the following tick.
    grid.step(50.0);
    assert_eq!(grid.particle_count(0, 0), 1);
    assert!((grid.read_cell(0, 0).1 - 1.0).abs() < 1e-6);

    grid.step(0.0);
    assert!((grid.read_cell(0, 1).1 - 0.75).abs() < 1e-6);
}

/// Two in-phase emitters behind a wall with a single gap on their
/// midline: downstream of the gap the midline stays brighter than
/// off-axis cells. Qualitative double-slit acceptance check.
#[test]
fn double_slit_brightens_the_midline() {
    let rows = 13;
    let cols = 20;
    let midline = 6;
    let config = Config {
        emit_directions: vec![Direction::Right],
        emit_interval_ms: 100.0,
        ..Config::default()
    };
    let mut grid = grid_with(rows, cols, config);

    // Wall across column 5, except the gap on the midline.
    for row in 0..rows as i32 {
        if row != midline {
            grid.submit_edit(Edit::new(EditKind::ToggleWall, row, 5));
        }
    }
    // Emitters symmetric about the midline.
    grid.submit_edit(Edit::new(EditKind::ToggleEmitter, midline - 3, 0));
    grid.submit_edit(Edit::new(EditKind::ToggleEmitter, midline + 3, 0));

    // 100 ms per tick: both emitters pulse every step, in phase.
    for _ in 0..30 {
        grid.step(100.0);
    }
    dump(&grid);

    let on_axis = grid.read_cell(midline, 10).1;
    let above = grid.read_cell(midline - 4, 10).1;
    let below = grid.read_cell(midline + 4, 10).1;
    assert!(on_axis > 0.0, "no energy reached the midline probe");
    assert!(
        on_axis > above && on_axis > below,
        "midline {on_axis} vs off-axis {above} / {below}"
    );
}
