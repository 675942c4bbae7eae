use anyhow::Result;
use meshinterp::io::{DspLayout, MeshDump};
use meshinterp::{
    FieldInterpolator, Grid, InterpMethod, Point2, PrecomputedLinear, Projection,
    ScatteredInterpolator, strategy_for,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use tempfile::NamedTempFile;

const CELLS_X: usize = 4;
const CELLS_Y: usize = 3;
const H: f64 = 0.5;

fn field(x: f64, y: f64) -> f64 {
    2.0 * x - 3.0 * y + 1.0
}

/// Writes a dump of six-node triangles covering [0, 2] x [0, 1.5] at z = 0.25,
/// with the data on the default lines.
fn write_dump() -> Result<NamedTempFile> {
    let cols = 2 * CELLS_X + 1;
    let rows = 2 * CELLS_Y + 1;
    let id = |i: usize, j: usize| j * cols + i + 1;

    let mut nodes = Vec::new();
    let mut values = Vec::new();
    for j in 0..rows {
        for i in 0..cols {
            let (x, y) = (i as f64 * H / 2.0, j as f64 * H / 2.0);
            nodes.push(format!("{x}, {y}, 0.25"));
            values.push(format!("{}", field(x, y)));
        }
    }

    let mut elements = vec!["4".to_string(), "0".to_string()];
    let mut push_triangle = |p: (usize, usize), q: (usize, usize), r: (usize, usize)| {
        let mid = |a: (usize, usize), b: (usize, usize)| ((a.0 + b.0) / 2, (a.1 + b.1) / 2);
        let local = [p, mid(p, q), q, mid(p, r), mid(q, r), r];
        elements.extend(["2", "3", "3", "0", "6"].map(String::from));
        elements.extend(local.iter().map(|&(i, j)| id(i, j).to_string()));
    };
    for b in 0..CELLS_Y {
        for a in 0..CELLS_X {
            let (i, j) = (2 * a, 2 * b);
            push_triangle((i, j), (i + 2, j), (i, j + 2));
            push_triangle((i + 2, j), (i + 2, j + 2), (i, j + 2));
        }
    }

    let mut file = NamedTempFile::new()?;
    for k in 1..91 {
        writeln!(file, "$header line {k}")?;
    }
    writeln!(file, "elements({})", elements.join(", "))?;
    writeln!(file, "nodes({})", nodes.join(", "))?;
    writeln!(file, "solution(1, 0, 0, {})", values.join(", "))?;
    writeln!(file, "$end")?;
    Ok(file)
}

#[test]
fn test_dump_to_targets_linear_and_cubic() -> Result<()> {
    let file = write_dump()?;
    let dump = MeshDump::read(file.path(), &DspLayout::default())?;
    assert_eq!(dump.elements.len(), 2 * CELLS_X * CELLS_Y);

    let projection = dump.detect_projection()?;
    assert_eq!(projection, Projection::XY);

    let raw = dump.boundary_data(projection)?;
    assert_eq!(raw.len(), 6 * dump.elements.len());
    let source = raw.deduplicated()?;
    assert_eq!(source.len(), dump.nodes.len());

    let mut rng = StdRng::seed_from_u64(2024);
    let mut targets: Vec<Point2> = (0..300)
        .map(|_| Point2::new(rng.gen_range(0.0..2.0), rng.gen_range(0.0..1.5)))
        .collect();
    targets.push(Point2::new(-0.5, 0.5));
    targets.push(Point2::new(1.0, 7.0));

    for method in [InterpMethod::Linear, InterpMethod::Cubic] {
        let values = strategy_for(method).interpolate(&source, &targets)?;
        for (q, v) in targets.iter().zip(&values).take(300) {
            assert!((v - field(q.x, q.y)).abs() < 1e-9, "{method} at {q}: {v}");
        }
        assert!(values[300].is_nan());
        assert!(values[301].is_nan());
    }
    Ok(())
}

#[test]
fn test_map_reuse_across_fields() -> Result<()> {
    let file = write_dump()?;
    let dump = MeshDump::read(file.path(), &DspLayout::default())?;
    let source = dump.boundary_data(Projection::XY)?.deduplicated()?;

    let targets = vec![Point2::new(0.3, 0.7), Point2::new(1.9, 0.1), Point2::new(3.0, 0.0)];
    let (unique, map) = PrecomputedLinear.build_map(&source, &targets)?;
    assert_eq!(map.num_outside(), 1);

    let a = unique.values.clone();
    let b: Vec<f64> = unique.points.iter().map(|p| p.x * p.y).collect();
    let sum: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();

    let batch = map.evaluate_batch(&[a, b, sum])?;
    for k in 0..2 {
        assert!((batch[2][k] - (batch[0][k] + batch[1][k])).abs() < 1e-12);
    }
    assert!(batch[2][2].is_nan());
    assert!(map.evaluate(&[1.0, 2.0]).is_err());
    Ok(())
}

#[test]
fn test_grid_over_dump() -> Result<()> {
    let file = write_dump()?;
    let dump = MeshDump::read(file.path(), &DspLayout::default())?;
    let source = dump.boundary_data(Projection::XY)?;

    let grid = Grid::spanning(&source.points, 21, 16)?;
    let interp = ScatteredInterpolator::from_point_set(&source, InterpMethod::Cubic)?;
    let result = interp.evaluate_grid(&grid)?;
    assert_eq!(result.values.dim(), (16, 21));
    assert_eq!(result.coverage(), 1.0);
    assert!((result.values[[15, 20]] - field(2.0, 1.5)).abs() < 1e-9);

    let outlines = dump.element_outlines(Projection::XY);
    assert!(outlines.iter().all(|o| o.len() == 4 && o[0] == o[3]));
    Ok(())
}
