//! Regression tests for grid sizing and queries.
//!
//! Each test builds a grid over a deterministic cloud and checks exact cell
//! counts, bucket contents or query answers. A change in any of these values
//! means the grid layout changed, which callers relying on stable iteration
//! order will notice.
//!
//! Run with: cargo test -p point-grid grid_regression

use approx::assert_relative_eq;
use mesh_types::Vertex;
use nalgebra::Point3;
use point_grid::{Axis, CellCoord, Dimensionality, Grid, GridError, GridParams};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// =============================================================================
// Test Cloud Generation
// =============================================================================

/// The nine points `(i, j, 0)` for `i, j` in `0..3`.
fn lattice_3x3() -> Vec<Point3<f64>> {
    let mut pts = Vec::with_capacity(9);
    for j in 0..3 {
        for i in 0..3 {
            pts.push(Point3::new(f64::from(i), f64::from(j), 0.0));
        }
    }
    pts
}

/// `n` points uniformly distributed in `[-1, 1]^3`.
fn random_cloud(n: usize, seed: u64) -> Vec<Point3<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point3::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect()
}

fn brute_force_nearest(points: &[Point3<f64>], query: &Point3<f64>) -> f64 {
    points
        .iter()
        .map(|p| (p - query).norm())
        .fold(f64::INFINITY, f64::min)
}

// =============================================================================
// Sizing
// =============================================================================

#[test]
fn test_lattice_is_three_by_three() {
    let pts = lattice_3x3();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1)).unwrap();

    assert_eq!(grid.cell_count(), [3, 3, 1]);
    assert_eq!(
        grid.dimensionality(),
        Dimensionality::Planar { normal: Axis::Z }
    );
    // Inflated upper corner, untouched lower corner and flat axis.
    assert_relative_eq!(grid.bounds().max.x, 2.000_002, epsilon = 1e-12);
    assert_relative_eq!(grid.bounds().min.x, 0.0);
    assert_relative_eq!(grid.bounds().max.z, 0.0);

    for j in 0..3 {
        for i in 0..3 {
            assert_eq!(grid.bucket(CellCoord::new(i, j, 0)), &[i + 3 * j]);
        }
    }
}

#[test]
fn test_collinear_cloud_is_one_dimensional() {
    let pts: Vec<_> = (0..64)
        .map(|i| Point3::new(f64::from(i) * 0.25, -7.0, 12.5))
        .collect();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(2)).unwrap();

    assert_eq!(grid.dimensionality(), Dimensionality::Collinear(Axis::X));
    assert_eq!(grid.cell_count(), [32, 1, 1]);
    assert_relative_eq!(grid.step_size()[1], 0.0);
    assert_relative_eq!(grid.inverse_step_size()[1], 1.0);
}

#[test]
fn test_vertical_line_keeps_single_cells_elsewhere() {
    let pts: Vec<_> = (0..30)
        .map(|i| Vertex::from_coords(1.0, 1.0, f64::from(i)))
        .collect();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(3)).unwrap();
    assert_eq!(grid.cell_count(), [1, 1, 10]);
}

#[test]
fn test_default_density_on_random_cloud() {
    let pts = random_cloud(10_000, 7);
    let grid = Grid::new(&pts).unwrap();
    let stats = grid.stats();

    assert_eq!(grid.dimensionality(), Dimensionality::Volumetric);
    assert_eq!(stats.points, 10_000);
    assert!(stats.mean_bucket <= 512.0);
    // 10000 / 512 is just under 20 cells: 3 on the anchor axis, and the
    // others scaled from it by extent ratios just around 1.
    let counts = grid.cell_count();
    assert_eq!(counts[0], 3);
    assert!((3..=4).contains(&counts[1]));
    assert!((3..=4).contains(&counts[2]));
}

#[test]
fn test_counts_scale_from_rounded_anchor() {
    // Box [0, 1] x [0, 1.1] x [0, 1] with 100 points at one point per cell:
    // c0 = ceil(cbrt(100 / 1.1)) = 5, c1 = ceil(5 * 1.1) = 6, c2 = 5.
    let mut rng = StdRng::seed_from_u64(11);
    let mut pts = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.1, 1.0)];
    pts.extend((0..98).map(|_| {
        Point3::new(
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..1.1),
            rng.gen_range(0.0..1.0),
        )
    }));
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1)).unwrap();

    assert_eq!(grid.cell_count(), [5, 6, 5]);
    let total: usize = grid.occupied_cells().map(|(_, b)| b.len()).sum();
    assert_eq!(total, 100);
}

// =============================================================================
// Boundaries
// =============================================================================

#[test]
fn test_max_corner_point_lands_in_last_cell() {
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.5, 0.25, 0.75),
        Point3::new(0.1, 0.9, 0.3),
        Point3::new(0.6, 0.4, 0.2),
        Point3::new(0.8, 0.7, 0.9),
        Point3::new(0.2, 0.3, 0.6),
    ];
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1)).unwrap();
    let last = CellCoord::from(grid.cell_count().map(|c| c - 1));

    assert_eq!(grid.cell_count(), [2, 2, 2]);
    assert_eq!(grid.cell_of(&pts[1]), last);
    assert!(grid.bucket(last).contains(&1));
}

#[test]
fn test_negative_cloud_with_zero_corner() {
    let pts = [
        Point3::new(-2.0, -2.0, -2.0),
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(-1.0, -0.5, -1.5),
    ];
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1)).unwrap();
    let last = CellCoord::from(grid.cell_count().map(|c| c - 1));
    assert!(grid.bucket(last).contains(&1));
}

#[test]
fn test_large_offset_cloud() {
    // Far from the origin, with a spread much smaller than the coordinates.
    let base = 1.0e7;
    let pts: Vec<_> = (0..100)
        .map(|i| {
            let t = f64::from(i);
            Point3::new(base + (t * 0.37).sin(), base + (t * 0.71).cos(), base + t * 0.01)
        })
        .collect();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(4)).unwrap();
    let total: usize = grid.occupied_cells().map(|(_, b)| b.len()).sum();
    assert_eq!(total, 100);

    let query = Point3::new(base + 0.1, base - 0.2, base + 0.5);
    let found = grid.nearest(&query).unwrap();
    assert_relative_eq!(
        (found - query).norm(),
        brute_force_nearest(&pts, &query),
        epsilon = 1e-9
    );
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_lattice_queries() {
    let pts = lattice_3x3();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1)).unwrap();

    assert_eq!(
        grid.nearest(&Point3::new(1.1, 1.1, 0.0)),
        Some(&Point3::new(1.0, 1.0, 0.0))
    );
    assert_eq!(grid.nearest_index(&Point3::new(2.4, -0.3, 5.0)), Some(2));

    let cube = grid.points_within_cube(&Point3::new(1.0, 1.0, 0.0), 0.5);
    assert!(cube.contains(&&Point3::new(1.0, 1.0, 0.0)));
}

#[test]
fn test_lattice_cube_returns_whole_cells() {
    let pts = lattice_3x3();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1)).unwrap();
    let center = Point3::new(1.0, 1.0, 0.0);

    // The corners (0.5, 0.5) and (1.5, 1.5) resolve to cells 0 and 2 on both
    // axes, so every cell of the 3x3 grid is visited, axis 1 before axis 0.
    let found = grid.indices_within_cube(&center, 0.5);
    assert_eq!(found, vec![0, 3, 6, 1, 4, 7, 2, 5, 8]);

    let points = grid.points_within_cube(&center, 0.5);
    assert_eq!(points.len(), 9);
    for p in &pts {
        assert!(points.contains(&p));
    }

    // The centre and its four lattice neighbours are all reported.
    for index in [1, 3, 4, 5, 7] {
        assert!(found.contains(&index));
    }

    // Only the centre survives exact filtering.
    let exact: Vec<usize> = found
        .into_iter()
        .filter(|&i| (pts[i] - center).amax() <= 0.5)
        .collect();
    assert_eq!(exact, vec![4]);
}

#[test]
fn test_random_cloud_nearest_matches_brute_force() {
    let pts = random_cloud(10_000, 42);
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(16)).unwrap();

    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..500 {
        let query = Point3::new(
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.5..1.5),
            rng.gen_range(-1.5..1.5),
        );
        let found = grid.nearest(&query).unwrap();
        assert_relative_eq!(
            (found - query).norm(),
            brute_force_nearest(&pts, &query),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_random_line_nearest_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(77);
    let pts: Vec<_> = (0..10_000)
        .map(|_| Point3::new(0.5, rng.gen_range(-20.0..20.0), -3.0))
        .collect();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(4)).unwrap();
    assert_eq!(grid.dimensionality(), Dimensionality::Collinear(Axis::Y));

    for _ in 0..300 {
        let query = Point3::new(
            rng.gen_range(-2.0..2.0),
            rng.gen_range(-25.0..25.0),
            rng.gen_range(-5.0..5.0),
        );
        let found = grid.nearest(&query).unwrap();
        assert_relative_eq!(
            (found - query).norm(),
            brute_force_nearest(&pts, &query),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_random_plane_nearest_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(78);
    let pts: Vec<_> = (0..10_000)
        .map(|_| Point3::new(rng.gen_range(-3.0..3.0), 4.0, rng.gen_range(-1.0..1.0)))
        .collect();
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(8)).unwrap();
    assert_eq!(
        grid.dimensionality(),
        Dimensionality::Planar { normal: Axis::Y }
    );

    for _ in 0..300 {
        let query = Point3::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(3.0..5.0),
            rng.gen_range(-1.5..1.5),
        );
        let found = grid.nearest(&query).unwrap();
        assert_relative_eq!(
            (found - query).norm(),
            brute_force_nearest(&pts, &query),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_random_cloud_cube_matches_filter() {
    let pts = random_cloud(5_000, 99);
    let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(8)).unwrap();
    let center = Point3::new(0.1, -0.2, 0.3);
    let half = 0.25;

    let mut exact: Vec<usize> = grid
        .indices_within_cube(&center, half)
        .into_iter()
        .filter(|&i| (pts[i] - center).amax() <= half)
        .collect();
    exact.sort_unstable();

    let expected: Vec<usize> = (0..pts.len())
        .filter(|&i| (pts[i] - center).amax() <= half)
        .collect();
    assert_eq!(exact, expected);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_empty_grid_queries() {
    let pts: Vec<Point3<f64>> = Vec::new();
    let grid = Grid::new(&pts).unwrap();

    assert_eq!(grid.cell_count(), [1, 1, 1]);
    assert!(grid.nearest(&Point3::new(1.0, 2.0, 3.0)).is_none());
    assert!(matches!(
        grid.try_nearest(&Point3::new(1.0, 2.0, 3.0)),
        Err(GridError::EmptyGrid)
    ));
}

#[test]
fn test_vanishing_inflation_reports_out_of_range_cell() {
    // With no effective padding the largest point sits on the upper face of
    // the last cell; construction must fail instead of clamping it.
    let pts: Vec<_> = (0..10)
        .map(|i| Point3::new(f64::from(i), 0.0, 0.0))
        .collect();
    let params = GridParams::with_max_points_per_cell(1).inflation(1e-300);
    let result = Grid::build(&pts, &params);

    assert!(matches!(
        result,
        Err(GridError::CellOutOfRange {
            index: 9,
            axis: 0,
            cell_count: 10,
            ..
        })
    ));
}

#[test]
fn test_nan_point_rejected() {
    let pts = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(0.5, f64::NAN, 0.5),
    ];
    let err = Grid::new(&pts).unwrap_err();
    assert!(matches!(err, GridError::NonFiniteCoordinate { index: 2 }));
}

#[test]
fn test_infinite_point_rejected() {
    let pts = [Point3::new(f64::INFINITY, 0.0, 0.0)];
    assert!(matches!(
        Grid::new(&pts),
        Err(GridError::NonFiniteCoordinate { index: 0 })
    ));
}
