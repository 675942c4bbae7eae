//! Maxwell boundary dump (`.dsp`) parser.
//!
//! Only three lines of the dump matter. Each holds one parenthesised,
//! comma-separated list:
//!
//! ```text
//! elements := diag diag element*
//! element  := kind int int 0 n id{n}
//! nodes    := (x y z)*
//! solution := diag diag diag value*
//! ```
//!
//! Node ids are 1-based in the file and 0-based in memory.

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::geom::point::{Point, Point2};
use crate::geom::projection::Projection;
use crate::geom::triangles::triangle_centroid;
use crate::interp::PointSet;

const ELEMENT_DIAG: usize = 2;
const SOLUTION_DIAG: usize = 3;
const ELEMENT_HEADER: usize = 5;

/// 1-based line numbers of the three data blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DspLayout {
    pub elements_line: usize,
    pub nodes_line: usize,
    pub solution_line: usize,
}

impl DspLayout {
    pub fn new() -> Self {
        Self {
            elements_line: 91,
            nodes_line: 92,
            solution_line: 93,
        }
    }
}

impl Default for DspLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// One boundary element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// First header entry (2 for the usual second-order triangle).
    pub kind: i64,
    /// 0-based node indices.
    pub nodes: Vec<usize>,
}

impl Element {
    /// Local indices of the corner nodes.
    ///
    /// Six-node triangles keep their corners at 0, 2 and 5.
    pub fn corner_indices(&self) -> Vec<usize> {
        match self.nodes.len() {
            6 => vec![0, 2, 5],
            n => (0..n).collect(),
        }
    }
}

/// How the solution block lines up with the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionLayout {
    /// One value per node, indexed by node id.
    PerNode,
    /// One value per element node, in element order.
    PerElementNode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshDump {
    pub elements: Vec<Element>,
    pub nodes: Vec<Point>,
    pub solution: Vec<f64>,
}

impl MeshDump {
    pub fn read(path: &Path, layout: &DspLayout) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Self::parse(&text, layout)
            .with_context(|| format!("Failed to parse boundary dump: {}", path.display()))
    }

    pub fn parse(text: &str, layout: &DspLayout) -> Result<Self> {
        let lines: Vec<&str> = text.lines().collect();

        let node_tokens = block_tokens(&lines, layout.nodes_line, "nodes")?;
        let nodes = parse_nodes(&node_tokens).with_context(|| line_ctx(layout.nodes_line))?;

        let element_tokens = block_tokens(&lines, layout.elements_line, "elements")?;
        let elements = parse_elements(&element_tokens, nodes.len())
            .with_context(|| line_ctx(layout.elements_line))?;

        let solution_tokens = block_tokens(&lines, layout.solution_line, "solution")?;
        let solution =
            parse_solution(&solution_tokens).with_context(|| line_ctx(layout.solution_line))?;

        let dump = Self {
            elements,
            nodes,
            solution,
        };
        tracing::info!(
            elements = dump.elements.len(),
            nodes = dump.nodes.len(),
            values = dump.solution.len(),
            "parsed boundary dump"
        );
        if dump.solution_layout().is_none() {
            tracing::warn!(
                values = dump.solution.len(),
                nodes = dump.nodes.len(),
                element_nodes = dump.num_element_nodes(),
                "solution length matches neither nodes nor element nodes"
            );
        }
        Ok(dump)
    }

    /// Total number of node references over all elements.
    pub fn num_element_nodes(&self) -> usize {
        self.elements.iter().map(|e| e.nodes.len()).sum()
    }

    /// Per-node layout wins when both counts coincide.
    pub fn solution_layout(&self) -> Option<SolutionLayout> {
        if self.solution.len() == self.nodes.len() {
            Some(SolutionLayout::PerNode)
        } else if self.solution.len() == self.num_element_nodes() {
            Some(SolutionLayout::PerElementNode)
        } else {
            None
        }
    }

    pub fn detect_projection(&self) -> Result<Projection> {
        Projection::detect(&self.nodes)
    }

    /// Element nodes projected to the plane, with their values.
    ///
    /// Shared nodes appear once per element using them; deduplicate before
    /// triangulating.
    pub fn boundary_data(&self, projection: Projection) -> Result<PointSet> {
        let layout = self.solution_layout().ok_or_else(|| {
            anyhow!(
                "Solution has {} values, expected {} (per node) or {} (per element node)",
                self.solution.len(),
                self.nodes.len(),
                self.num_element_nodes()
            )
        })?;

        let mut points = Vec::with_capacity(self.num_element_nodes());
        let mut values = Vec::with_capacity(self.num_element_nodes());
        let mut k = 0;
        for element in &self.elements {
            for &n in &element.nodes {
                points.push(projection.project(self.nodes[n]));
                values.push(match layout {
                    SolutionLayout::PerNode => self.solution[n],
                    SolutionLayout::PerElementNode => self.solution[k],
                });
                k += 1;
            }
        }
        Ok(PointSet::new(points, values)?)
    }

    /// Closed corner polygon of every element.
    pub fn element_outlines(&self, projection: Projection) -> Vec<Vec<Point2>> {
        self.elements
            .iter()
            .map(|element| {
                let mut outline: Vec<Point2> = element
                    .corner_indices()
                    .into_iter()
                    .map(|i| projection.project(self.nodes[element.nodes[i]]))
                    .collect();
                if let Some(&first) = outline.first() {
                    outline.push(first);
                }
                outline
            })
            .collect()
    }

    /// Mean of the nodes of every element.
    pub fn element_centroids(&self, projection: Projection) -> Vec<Point2> {
        self.elements
            .iter()
            .map(|element| {
                let pts: Vec<Point2> = element
                    .nodes
                    .iter()
                    .map(|&n| projection.project(self.nodes[n]))
                    .collect();
                match pts.as_slice() {
                    [a, b, c] => triangle_centroid(*a, *b, *c),
                    _ => {
                        let n = pts.len().max(1) as f64;
                        let (sx, sy) = pts.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
                        Point2::new(sx / n, sy / n)
                    }
                }
            })
            .collect()
    }
}

fn line_ctx(line: usize) -> String {
    format!("Invalid data on line {}", line)
}

/// Entries of the first `( ... )` group on a 1-based line.
fn block_tokens<'a>(lines: &[&'a str], line: usize, block: &str) -> Result<Vec<&'a str>> {
    let text = line
        .checked_sub(1)
        .and_then(|i| lines.get(i))
        .ok_or_else(|| anyhow!("Missing {} line {} (file has {} lines)", block, line, lines.len()))?;

    let open = text
        .find('(')
        .ok_or_else(|| anyhow!("No '(' on {} line {}", block, line))?;
    let close = text[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| anyhow!("Unterminated list on {} line {}", block, line))?;

    let inner = text[open + 1..close].trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(',').map(str::trim).collect())
}

fn parse_int(token: &str, pos: usize) -> Result<i64> {
    token
        .parse::<i64>()
        .with_context(|| format!("Entry {} is not an integer: '{}'", pos, token))
}

fn parse_float(token: &str, pos: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .with_context(|| format!("Entry {} is not a number: '{}'", pos, token))
}

fn parse_nodes(tokens: &[&str]) -> Result<Vec<Point>> {
    if tokens.len() % 3 != 0 {
        bail!("Node list has {} entries, not a multiple of 3", tokens.len());
    }
    let coords = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| parse_float(t, i))
        .collect::<Result<Vec<f64>>>()?;
    Ok(coords
        .chunks_exact(3)
        .map(|c| Point::new(c[0], c[1], c[2]))
        .collect())
}

fn parse_elements(tokens: &[&str], num_nodes: usize) -> Result<Vec<Element>> {
    if tokens.len() < ELEMENT_DIAG {
        bail!("Element list is shorter than its {} diagnostic entries", ELEMENT_DIAG);
    }
    let ints = tokens
        .iter()
        .enumerate()
        .map(|(i, t)| parse_int(t, i))
        .collect::<Result<Vec<i64>>>()?;

    let mut elements = Vec::new();
    let mut pos = ELEMENT_DIAG;
    while pos < ints.len() {
        let header = ints
            .get(pos..pos + ELEMENT_HEADER)
            .ok_or_else(|| anyhow!("Truncated element header at entry {}", pos))?;
        if header[3] != 0 {
            bail!(
                "Element header at entry {} has {} where 0 is expected",
                pos,
                header[3]
            );
        }
        let count = usize::try_from(header[4])
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| anyhow!("Invalid node count {} at entry {}", header[4], pos + 4))?;

        let start = pos + ELEMENT_HEADER;
        let ids = ints
            .get(start..start + count)
            .ok_or_else(|| anyhow!("Truncated element at entry {}: expected {} node ids", pos, count))?;
        let nodes = ids
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                usize::try_from(id)
                    .ok()
                    .filter(|&id| (1..=num_nodes).contains(&id))
                    .map(|id| id - 1)
                    .ok_or_else(|| {
                        anyhow!(
                            "Node id {} at entry {} is out of range 1..={}",
                            id,
                            start + i,
                            num_nodes
                        )
                    })
            })
            .collect::<Result<Vec<usize>>>()?;

        elements.push(Element {
            kind: header[0],
            nodes,
        });
        pos = start + count;
    }
    Ok(elements)
}

fn parse_solution(tokens: &[&str]) -> Result<Vec<f64>> {
    if tokens.len() < SOLUTION_DIAG {
        bail!("Solution list is shorter than its {} diagnostic entries", SOLUTION_DIAG);
    }
    tokens
        .iter()
        .enumerate()
        .skip(SOLUTION_DIAG)
        .map(|(i, t)| parse_float(t, i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const LAYOUT: DspLayout = DspLayout {
        elements_line: 2,
        nodes_line: 3,
        solution_line: 4,
    };

    /// Two 6-node triangles sharing an edge in the plane y = 0.5.
    fn sample() -> String {
        let nodes = [
            (0.0, 0.0),
            (0.5, 0.0),
            (1.0, 0.0),
            (0.0, 0.5),
            (0.5, 0.5),
            (0.0, 1.0),
            (1.0, 0.5),
            (1.0, 1.0),
            (0.5, 1.0),
        ];
        let node_list: Vec<String> = nodes
            .iter()
            .map(|(x, z)| format!("{}, 0.5, {}", x, z))
            .collect();
        let values: Vec<String> = (0..9).map(|i| format!("{}", i as f64 * 0.5)).collect();
        format!(
            "header\nelems(7, 2, 2, 3, 3, 0, 6, 1, 2, 3, 4, 5, 6, 2, 3, 3, 0, 6, 3, 7, 8, 5, 9, 6)\nnodes({})\nsol(0, 0, 0, {})\n",
            node_list.join(", "),
            values.join(", ")
        )
    }

    #[test]
    fn test_parse_sample() -> Result<()> {
        let dump = MeshDump::parse(&sample(), &LAYOUT)?;
        assert_eq!(dump.nodes.len(), 9);
        assert_eq!(dump.elements.len(), 2);
        assert_eq!(dump.elements[0].nodes, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(dump.elements[1].kind, 2);
        assert_eq!(dump.solution.len(), 9);
        assert_eq!(dump.solution_layout(), Some(SolutionLayout::PerNode));
        assert_eq!(dump.detect_projection()?, Projection::XZ);
        Ok(())
    }

    #[test]
    fn test_boundary_data_per_node() -> Result<()> {
        let dump = MeshDump::parse(&sample(), &LAYOUT)?;
        let data = dump.boundary_data(Projection::XZ)?;
        assert_eq!(data.len(), 12);
        // Node 3 (1-based) is used by both elements
        assert_eq!(data.points[2], Point2::new(1.0, 0.0));
        assert_eq!(data.values[2], 1.0);
        assert_eq!(data.points[6], Point2::new(1.0, 0.0));
        assert_eq!(data.values[6], 1.0);
        assert_eq!(data.deduplicated()?.len(), 9);
        Ok(())
    }

    #[test]
    fn test_boundary_data_per_element_node() -> Result<()> {
        let mut dump = MeshDump::parse(&sample(), &LAYOUT)?;
        dump.solution = (0..12).map(|i| i as f64).collect();
        assert_eq!(dump.solution_layout(), Some(SolutionLayout::PerElementNode));
        let data = dump.boundary_data(Projection::XZ)?;
        assert_eq!(data.values[7], 7.0);

        dump.solution.pop();
        assert!(dump.solution_layout().is_none());
        assert!(dump.boundary_data(Projection::XZ).is_err());
        Ok(())
    }

    #[test]
    fn test_outlines_and_centroids() -> Result<()> {
        let dump = MeshDump::parse(&sample(), &LAYOUT)?;
        let outlines = dump.element_outlines(Projection::XZ);
        assert_eq!(
            outlines[0],
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
                Point2::new(0.0, 0.0),
            ]
        );
        let centroids = dump.element_centroids(Projection::XZ);
        assert_eq!(centroids.len(), 2);
        assert!((centroids[0].x - 2.0 / 6.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_grammar_errors() {
        let bad_header = sample().replace("3, 3, 0, 6, 3", "3, 3, 1, 6, 3");
        assert!(MeshDump::parse(&bad_header, &LAYOUT).is_err());

        let truncated = sample().replace(", 9, 6)", ", 9)");
        assert!(MeshDump::parse(&truncated, &LAYOUT).is_err());

        let bad_id = sample().replace("8, 5, 9, 6)", "8, 5, 10, 6)");
        assert!(MeshDump::parse(&bad_id, &LAYOUT).is_err());

        let bad_number = sample().replace("sol(0, 0, 0, 0", "sol(0, 0, 0, abc");
        assert!(MeshDump::parse(&bad_number, &LAYOUT).is_err());

        let short = DspLayout {
            solution_line: 40,
            ..LAYOUT
        };
        let err = MeshDump::parse(&sample(), &short).unwrap_err();
        assert!(err.to_string().contains("Missing solution line 40"));
    }

    #[test]
    fn test_node_count_must_be_multiple_of_three() {
        assert!(parse_nodes(&["1", "2"]).is_err());
        assert_eq!(parse_nodes(&[]).unwrap().len(), 0);
    }

    #[test]
    fn test_read_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(sample().as_bytes())?;
        let dump = MeshDump::read(file.path(), &LAYOUT)?;
        assert_eq!(dump.elements.len(), 2);

        let missing = MeshDump::read(Path::new("/nonexistent/file.dsp"), &LAYOUT);
        assert!(missing.is_err());
        Ok(())
    }

    #[test]
    fn test_default_layout() {
        let layout = DspLayout::default();
        assert_eq!(
            (layout.elements_line, layout.nodes_line, layout.solution_line),
            (91, 92, 93)
        );
    }
}
