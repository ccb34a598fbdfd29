//! Ship and heart placement
//!
//! New ships only ever enter row 0, the row freshly scrolled in at the top of
//! the hidden buffer. Placement mixes scattering and clustering so the numbers
//! stay readable, and force-places the remainder of a wave's quota once the
//! row distribution limit is passed.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::adjacency::recompute_adjacency;
use super::grid::Grid;
use super::state::Wave;
use crate::config::Config;

/// Chance of scattering instead of clustering
pub const SCATTER_CHANCE: f64 = 0.4;
/// Fallback: chance of preferring a column that already holds a ship
pub const SHIP_COLUMN_CHANCE: f64 = 0.7;
/// Per-movement chance of dropping a heart into the buffer
pub const HEART_CHANCE: f64 = 0.05;
/// Movements before a mid-wave heart can appear
pub const HEART_MIN_MOVEMENTS: u32 = 5;

/// Column counts as dense if this many of its top rows show a high number
const DENSE_ROWS: usize = 2;
/// Adjacency value regarded as "high"
const DENSE_ADJACENCY: u8 = 3;
const SCATTER_ATTEMPTS: usize = 10;
/// Rows scanned for existing ships to cluster with
const CLUSTER_ROWS: usize = 4;
/// Wave-start ships as a fraction of the quota, capped
const SEED_FRACTION: f64 = 0.4;
const SEED_MAX: u32 = 6;
const SEED_ATTEMPTS: usize = 50;
const HEART_FALLBACK_ATTEMPTS: usize = 20;

/// First strategy tried for a regular spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Uniformly random column outside the dense ones
    Scatter,
    /// Next to a ship already in the top rows
    Cluster,
}

impl Strategy {
    fn roll(rng: &mut impl Rng) -> Self {
        if rng.random::<f64>() < SCATTER_CHANCE {
            Strategy::Scatter
        } else {
            Strategy::Cluster
        }
    }
}

/// Place the wave's next ship(s) into row 0.
///
/// Returns how many ships were placed. Never exceeds the wave quota.
pub fn spawn_ship(grid: &mut Grid, wave: &mut Wave, config: &Config, rng: &mut impl Rng) -> u32 {
    if wave.all_spawned() {
        return 0;
    }

    let limit = config.row_distribution_limit(wave.number);
    let placed = if wave.movement_count > limit {
        force_place(grid, wave.ships_to_spawn(), rng)
    } else {
        place_one(grid, rng) as u32
    };

    if placed > 0 {
        wave.ships_spawned += placed;
        log::debug!(
            "Spawned {} ship(s), {}/{} for wave {}",
            placed,
            wave.ships_spawned,
            wave.ships_in_wave,
            wave.number
        );
        recompute_adjacency(grid);
    }
    placed
}

/// Fill open row-0 columns in random order with up to `remaining` ships.
/// Whatever does not fit waits for the next spawn.
fn force_place(grid: &mut Grid, remaining: u32, rng: &mut impl Rng) -> u32 {
    let mut open = open_columns(grid);
    open.shuffle(rng);
    let mut placed = 0;
    for col in open.into_iter().take(remaining as usize) {
        put_ship(grid, 0, col);
        placed += 1;
    }
    placed
}

fn place_one(grid: &mut Grid, rng: &mut impl Rng) -> bool {
    let avoid = dense_columns(grid);

    let col = match Strategy::roll(rng) {
        Strategy::Scatter => scatter_column(grid, &avoid, rng),
        Strategy::Cluster => cluster_column(grid, &avoid, rng),
    }
    .or_else(|| fallback_column(grid, rng));

    match col {
        Some(col) => {
            put_ship(grid, 0, col);
            true
        }
        None => false,
    }
}

/// Columns where at least two of the top three rows already read 3+
fn dense_columns(grid: &Grid) -> Vec<usize> {
    let rows = grid.hidden_rows().min(3);
    (0..grid.cols())
        .filter(|&col| {
            (0..rows)
                .filter(|&row| grid.row(row)[col].adjacent_ships >= DENSE_ADJACENCY)
                .count()
                >= DENSE_ROWS
        })
        .collect()
}

fn is_open(grid: &Grid, col: usize) -> bool {
    !grid.row(0)[col].is_ship
}

fn open_columns(grid: &Grid) -> Vec<usize> {
    (0..grid.cols()).filter(|&c| is_open(grid, c)).collect()
}

fn scatter_column(grid: &Grid, avoid: &[usize], rng: &mut impl Rng) -> Option<usize> {
    (0..SCATTER_ATTEMPTS)
        .map(|_| rng.random_range(0..grid.cols()))
        .find(|&col| !avoid.contains(&col) && is_open(grid, col))
}

fn cluster_column(grid: &Grid, avoid: &[usize], rng: &mut impl Rng) -> Option<usize> {
    let rows = grid.hidden_rows().min(CLUSTER_ROWS);
    let anchors: Vec<usize> = (0..rows)
        .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
        .filter(|&(row, col)| grid.row(row)[col].is_ship && !avoid.contains(&col))
        .map(|(_, col)| col)
        .collect();

    let &target = anchors.choose(rng)?;
    // Same column first, then either side
    [
        target,
        target.saturating_sub(1),
        (target + 1).min(grid.cols() - 1),
    ]
    .into_iter()
    .find(|&col| is_open(grid, col) && !avoid.contains(&col))
}

fn fallback_column(grid: &Grid, rng: &mut impl Rng) -> Option<usize> {
    let ship_columns: Vec<usize> = (0..grid.cols())
        .filter(|&col| (1..grid.hidden_rows()).any(|row| grid.row(row)[col].is_ship))
        .collect();

    if !ship_columns.is_empty() && rng.random::<f64>() < SHIP_COLUMN_CHANCE {
        if let Some(&col) = ship_columns.choose(rng) {
            if is_open(grid, col) {
                return Some(col);
            }
        }
    }

    open_columns(grid).choose(rng).copied()
}

fn put_ship(grid: &mut Grid, row: usize, col: usize) {
    let cell = &mut grid.row_mut(row)[col];
    cell.is_ship = true;
    cell.is_revealed = false;
}

/// Initial ships for a new wave, scattered over the hidden buffer
pub fn seed_wave(grid: &mut Grid, wave: &mut Wave, rng: &mut impl Rng) -> u32 {
    let target = ((wave.ships_in_wave as f64 * SEED_FRACTION).ceil() as u32)
        .min(SEED_MAX)
        .min(wave.ships_in_wave);
    let mut placed = 0;

    for _ in 0..SEED_ATTEMPTS {
        if placed >= target {
            break;
        }
        let row = rng.random_range(0..grid.hidden_rows());
        let col = rng.random_range(0..grid.cols());
        if !grid.row(row)[col].is_ship {
            put_ship(grid, row, col);
            placed += 1;
        }
    }

    wave.ships_spawned += placed;
    recompute_adjacency(grid);
    placed
}

/// Drop a heart somewhere in the hidden buffer if the player is missing a
/// life. Prefers calm cells (no ship, no number); otherwise a few random
/// non-ship attempts. Returns the buffer-space cell used.
pub fn place_heart(
    grid: &mut Grid,
    wave: &mut Wave,
    lives: u8,
    config: &Config,
    rng: &mut impl Rng,
) -> Option<(usize, usize)> {
    if lives >= config.starting_lives {
        return None;
    }

    let calm: Vec<(usize, usize)> = (0..grid.hidden_rows())
        .flat_map(|row| (0..grid.cols()).map(move |col| (row, col)))
        .filter(|&(row, col)| {
            let cell = grid.row(row)[col];
            !cell.is_ship && cell.adjacent_ships == 0 && !cell.has_heart
        })
        .collect();

    let spot = calm.choose(rng).copied().or_else(|| {
        (0..HEART_FALLBACK_ATTEMPTS)
            .map(|_| {
                (
                    rng.random_range(0..grid.hidden_rows()),
                    rng.random_range(0..grid.cols()),
                )
            })
            .find(|&(row, col)| {
                let cell = grid.row(row)[col];
                !cell.is_ship && !cell.has_heart
            })
    })?;

    grid.row_mut(spot.0)[spot.1].has_heart = true;
    wave.heart_placed = true;
    log::debug!("Heart placed at buffer cell {:?}", spot);
    Some(spot)
}
