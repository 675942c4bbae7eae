//! Piecewise cubic interpolation on the triangulation.
//!
//! Each vertex gets a gradient estimated by least squares over the vertices it
//! shares an edge with. Each triangle is then split at its centroid into three
//! cubic pieces (Clough-Tocher), giving a surface with continuous slope that
//! interpolates the vertex values and reproduces linear fields exactly.

use crate::geom::point::Point2;
use crate::geom::triangles::triangle_centroid;
use crate::geom::vector::Vector2;
use crate::interp::triangulation::Triangulation;

/// Per-vertex gradients `(df/dx, df/dy)` by least squares.
///
/// For vertex `i` with neighbors `j` it solves the normal equations of
/// `f_j - f_i = g_i . (p_j - p_i)`. A singular system gives a zero gradient.
pub fn estimate_gradients(tri: &Triangulation, values: &[f64]) -> Vec<Vector2> {
    let pts = tri.points();
    tri.vertex_neighbors()
        .iter()
        .enumerate()
        .map(|(i, adj)| {
            let (mut a00, mut a01, mut a11, mut b0, mut b1) = (0.0, 0.0, 0.0, 0.0, 0.0);
            for &j in adj {
                let d = pts[j] - pts[i];
                let df = values[j] - values[i];
                a00 += d.dx * d.dx;
                a01 += d.dx * d.dy;
                a11 += d.dy * d.dy;
                b0 += d.dx * df;
                b1 += d.dy * df;
            }
            let det = a00 * a11 - a01 * a01;
            // Relative to the spread of the neighbors
            if det.abs() <= 1e-12 * a00 * a11 {
                return Vector2::new(0.0, 0.0);
            }
            Vector2::new((a11 * b0 - a01 * b1) / det, (a00 * b1 - a01 * b0) / det)
        })
        .collect()
}

/// Bézier ordinates of one Clough-Tocher macro triangle.
///
/// The triangle is split at its centroid into three cubic pieces. Indices
/// follow the triangle's vertices; `mid[k]` belongs to the edge opposite
/// vertex `k`.
struct CloughTocher {
    /// `edge[a][b]`: ordinate next to vertex `a` on the edge towards `b`.
    edge: [[f64; 3]; 3],
    /// Next to vertex `a` on the split edge towards the centroid.
    spoke: [f64; 3],
    mid: [f64; 3],
    /// Next to the centroid on the split edge towards vertex `a`.
    inner: [f64; 3],
    center: f64,
}

impl CloughTocher {
    fn new(p: [Point2; 3], f: [f64; 3], g: [Vector2; 3]) -> Self {
        let centroid = triangle_centroid(p[0], p[1], p[2]);

        let mut edge = [[0.0; 3]; 3];
        for a in 0..3 {
            for b in 0..3 {
                edge[a][b] = f[a] + g[a].dot(p[b] - p[a]) / 3.0;
            }
        }
        let spoke: [f64; 3] = std::array::from_fn(|a| f[a] + g[a].dot(centroid - p[a]) / 3.0);

        // Cross-edge derivative linear along each outer edge, so that
        // neighbors sharing the edge data join with a continuous slope
        let mid: [f64; 3] = std::array::from_fn(|k| {
            let (a, b) = ((k + 1) % 3, (k + 2) % 3);
            let e = p[b] - p[a];
            let w = centroid - p[a];
            let n = Vector2::new(-e.dy, e.dx);
            let det = e.cross(w);
            let alpha_c = e.cross(n) / det;
            let alpha_b = n.cross(w) / det;
            let alpha_a = -alpha_b - alpha_c;

            let d_a = alpha_a * f[a] + alpha_b * edge[a][b] + alpha_c * spoke[a];
            let d_b = alpha_a * edge[b][a] + alpha_b * f[b] + alpha_c * spoke[b];
            (0.5 * (d_a + d_b) - alpha_a * edge[a][b] - alpha_b * edge[b][a]) / alpha_c
        });

        // Slope continuity across the split edges
        let inner: [f64; 3] = std::array::from_fn(|a| {
            (spoke[a] + mid[(a + 1) % 3] + mid[(a + 2) % 3]) / 3.0
        });
        let center = (inner[0] + inner[1] + inner[2]) / 3.0;

        Self {
            edge,
            spoke,
            mid,
            inner,
            center,
        }
    }

    /// Evaluates the piece holding barycentric point `b`.
    fn evaluate(&self, f: [f64; 3], b: [f64; 3]) -> f64 {
        // The piece lacks the vertex with the smallest weight
        let k = (0..3)
            .min_by(|&i, &j| b[i].total_cmp(&b[j]))
            .unwrap_or(0);
        let (a, c) = ((k + 1) % 3, (k + 2) % 3);
        let m = b[k];
        let (la, lc, lo) = (b[a] - m, b[c] - m, 3.0 * m);

        f[a] * la * la * la
            + f[c] * lc * lc * lc
            + self.center * lo * lo * lo
            + 3.0
                * (self.edge[a][c] * la * la * lc
                    + self.edge[c][a] * la * lc * lc
                    + self.spoke[a] * la * la * lo
                    + self.spoke[c] * lc * lc * lo
                    + self.inner[a] * la * lo * lo
                    + self.inner[c] * lc * lo * lo)
            + 6.0 * self.mid[k] * la * lc * lo
    }
}

/// Value of the Clough-Tocher interpolant of `triangle` at barycentric
/// coordinates `b`.
///
/// Adjacent triangles join with continuous value and slope; quadratic fields
/// are reproduced when the gradients are exact.
pub fn evaluate_patch(
    tri: &Triangulation,
    triangle: usize,
    values: &[f64],
    gradients: &[Vector2],
    b: [f64; 3],
) -> f64 {
    let idx = tri.triangles()[triangle].as_array();
    let pts = tri.points();
    let p = idx.map(|i| pts[i]);
    let f = idx.map(|i| values[i]);
    let g = idx.map(|i| gradients[i]);
    CloughTocher::new(p, f, g).evaluate(f, b)
}
