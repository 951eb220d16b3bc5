//! Loading networks from distance tables and line membership files.
//!
//! A network directory holds three files:
//!
//! - `edge_distances.csv`: a header row, then one row per station with the
//!   direct distance to every other station. Empty cells mean "no edge".
//! - `straight_line_distances.csv`: same layout, every pair filled in.
//! - `lines.json`: an ordered array of `{"name", "color", "stations"}`.
//!
//! The line order in `lines.json` is the line enumeration order used by the
//! planner.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::builder::{DistanceMatrix, LineDef, NetworkBuilder};
use super::config::NetworkConfig;
use super::error::NetworkError;
use super::model::Network;

pub const EDGE_DISTANCES_FILE: &str = "edge_distances.csv";
pub const STRAIGHT_LINE_DISTANCES_FILE: &str = "straight_line_distances.csv";
pub const LINES_FILE: &str = "lines.json";

/// Parse a distance table. Empty and `NaN` cells become `None`.
pub fn read_distance_table<R: Read>(
    reader: R,
    table: &'static str,
) -> Result<DistanceMatrix, NetworkError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = record.map_err(|source| NetworkError::Csv { table, source })?;
        let cells = record
            .iter()
            .enumerate()
            .map(|(column, cell)| parse_cell(cell, table, row + 1, column + 1))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(cells);
    }
    Ok(rows)
}

fn parse_cell(
    cell: &str,
    table: &'static str,
    row: usize,
    column: usize,
) -> Result<Option<f64>, NetworkError> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| NetworkError::BadCell {
            table,
            row,
            column,
            value: cell.to_string(),
        })
}

/// Parse line membership JSON.
pub fn read_lines<R: Read>(reader: R) -> Result<Vec<LineDef>, NetworkError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Build a network from the three data sources.
///
/// The station count is taken from the edge table; the straight-line table
/// must agree.
pub fn network_from_readers<E: Read, S: Read, L: Read>(
    edges: E,
    straight_lines: S,
    lines: L,
    config: NetworkConfig,
) -> Result<Network, NetworkError> {
    let edges = read_distance_table(edges, EDGE_DISTANCES_FILE)?;
    let straight_lines = read_distance_table(straight_lines, STRAIGHT_LINE_DISTANCES_FILE)?;
    let lines = read_lines(lines)?;

    if edges.len() != straight_lines.len() {
        return Err(NetworkError::SizeMismatch {
            edges: edges.len(),
            straight_line: straight_lines.len(),
        });
    }

    let mut builder = NetworkBuilder::new(edges.len())
        .config(config)
        .edge_matrix(&edges)?
        .straight_line_matrix(&straight_lines)?;
    for line in lines {
        builder = builder.line_def(line);
    }
    builder.build()
}

/// Load a network from a directory containing the three data files.
pub fn load_network(dir: &Path, config: NetworkConfig) -> Result<Network, NetworkError> {
    let open = |name: &str| {
        let path = dir.join(name);
        File::open(&path).map_err(|source| NetworkError::Io { path, source })
    };

    let network = network_from_readers(
        open(EDGE_DISTANCES_FILE)?,
        open(STRAIGHT_LINE_DISTANCES_FILE)?,
        open(LINES_FILE)?,
        config,
    )?;

    info!(
        dir = %dir.display(),
        stations = network.station_count(),
        "loaded network"
    );

    Ok(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StationId;
    use std::fs;
    use tempfile::tempdir;

    fn station(n: u16) -> StationId {
        StationId::new(n).unwrap()
    }

    const EDGES: &str = "E1,E2,E3\n,4,\n4,,1.5\n,1.5,\n";
    const STRAIGHT: &str = "E1,E2,E3\n0,4,5\n4,0,1.5\n5,1.5,0\n";
    const LINES: &str =
        r#"[{"name":"red","color":"red","stations":[1,2]},{"name":"blue","stations":[2,3]}]"#;

    #[test]
    fn parse_table_with_gaps() {
        let table = read_distance_table(EDGES.as_bytes(), "test").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0], vec![None, Some(4.0), None]);
        assert_eq!(table[1], vec![Some(4.0), None, Some(1.5)]);
    }

    #[test]
    fn nan_cells_are_missing() {
        let table = read_distance_table("A,B\nNaN,1\n1, nan\n".as_bytes(), "test").unwrap();
        assert_eq!(table[0], vec![None, Some(1.0)]);
        assert_eq!(table[1], vec![Some(1.0), None]);
    }

    #[test]
    fn bad_cell_reported() {
        let err = read_distance_table("A,B\n0,x\n1,0\n".as_bytes(), "t.csv").unwrap_err();
        assert_eq!(
            err.to_string(),
            "t.csv: cannot parse \"x\" at row 1, column 2"
        );
    }

    #[test]
    fn build_from_readers() {
        let net = network_from_readers(
            EDGES.as_bytes(),
            STRAIGHT.as_bytes(),
            LINES.as_bytes(),
            NetworkConfig::default(),
        )
        .unwrap();

        assert_eq!(net.station_count(), 3);
        assert_eq!(net.edge_cost(station(2), station(3)), 3.0);
        assert_eq!(net.heuristic(station(1), station(3)), 10.0);
        let red = net.line_by_name("red").unwrap();
        assert_eq!(net.line(red).color(), Some("red"));
    }

    #[test]
    fn size_mismatch() {
        let err = network_from_readers(
            EDGES.as_bytes(),
            "A,B\n0,1\n1,0\n".as_bytes(),
            LINES.as_bytes(),
            NetworkConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            NetworkError::SizeMismatch {
                edges: 3,
                straight_line: 2
            }
        ));
    }

    #[test]
    fn invalid_json() {
        let err = read_lines("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, NetworkError::Json(_)));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(EDGE_DISTANCES_FILE), EDGES).unwrap();
        fs::write(dir.path().join(STRAIGHT_LINE_DISTANCES_FILE), STRAIGHT).unwrap();
        fs::write(dir.path().join(LINES_FILE), LINES).unwrap();

        let net = load_network(dir.path(), NetworkConfig::default()).unwrap();
        assert_eq!(net.station_count(), 3);
        assert!(net.is_interchange(station(2)));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(EDGE_DISTANCES_FILE), EDGES).unwrap();

        let err = load_network(dir.path(), NetworkConfig::default()).unwrap_err();
        match err {
            NetworkError::Io { path, .. } => {
                assert!(path.ends_with(STRAIGHT_LINE_DISTANCES_FILE));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn shipped_data_directory_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let net = load_network(&dir, NetworkConfig::default()).unwrap();
        assert_eq!(net.station_count(), 14);
        assert_eq!(net.lines().count(), 4);
    }
}
