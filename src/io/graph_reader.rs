use crate::graph::*;
use fxhash::FxHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphReadError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid header: {0}")]
    Header(String),
    #[error("invalid value: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, GraphReadError>;

/// The two supported input encodings, selected by the leading CLI flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// `-e`: header `n m`, then one `u v` pair per edge with arbitrary
    /// integer labels.
    EdgeList,
    /// `-a`: header `n m`, then the 1-based neighbour list of vertex i on
    /// the i-th line.
    AdjacencyList,
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "-e" => Ok(Self::EdgeList),
            "-a" => Ok(Self::AdjacencyList),
            _ => Err(format!("unknown input format {s:?}; expected -e or -a")),
        }
    }
}

/// Opens `path` and reads it according to `format`.
pub fn read_graph_file(format: InputFormat, path: &Path) -> Result<CsrGraph> {
    let name = path.display().to_string();
    let reader = BufReader::new(File::open(path)?);

    match format {
        InputFormat::EdgeList => read_edge_list(&name, reader),
        InputFormat::AdjacencyList => read_adjacency_list(&name, reader),
    }
}

macro_rules! parse_next_value {
    ($iterator : expr, $what : expr) => {{
        let token = $iterator
            .next()
            .ok_or_else(|| GraphReadError::Parse(format!("premature end of {}", $what)))?;
        token
            .parse()
            .map_err(|_| GraphReadError::Parse(format!("cannot parse {}: {token:?}", $what)))?
    }};
}

/// Edge-list reader. Vertex labels are arbitrary integers mapped to internal
/// indices in order of first sighting; self loops and duplicate edges are
/// silently dropped.
pub fn read_edge_list<R: BufRead>(name: &str, mut reader: R) -> Result<CsrGraph> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    let mut tokens = input.split_ascii_whitespace();

    let (n, m) = parse_header(&mut tokens)?;

    let mut name_map: FxHashMap<i64, Node> = FxHashMap::default();
    let mut alias = vec![0i64; n];
    let mut adj: Vec<Vec<Node>> = vec![Vec::new(); n];

    let intern = |label: i64,
                      name_map: &mut FxHashMap<i64, Node>,
                      alias: &mut Vec<i64>|
     -> Result<Node> {
        if let Some(&idx) = name_map.get(&label) {
            return Ok(idx);
        }
        let idx = name_map.len();
        if idx >= n {
            return Err(GraphReadError::Parse(format!(
                "more than {n} distinct vertex labels"
            )));
        }
        name_map.insert(label, idx as Node);
        alias[idx] = label;
        Ok(idx as Node)
    };

    for _ in 0..m {
        let i: i64 = parse_next_value!(tokens, "edge endpoint");
        let j: i64 = parse_next_value!(tokens, "edge endpoint");

        let u = intern(i, &mut name_map, &mut alias)?;
        let v = intern(j, &mut name_map, &mut alias)?;

        if u != v {
            adj[u as usize].push(v);
            adj[v as usize].push(u);
        }
    }

    finalize(name, alias, adj)
}

/// Adjacency-list reader. The i-th data line lists the neighbours of vertex
/// i with 1-based labels; duplicates are dropped and symmetry is restored by
/// inserting both directions.
pub fn read_adjacency_list<R: BufRead>(name: &str, reader: R) -> Result<CsrGraph> {
    let mut lines = reader.lines();

    let header = lines
        .next()
        .ok_or_else(|| GraphReadError::Header("empty file".into()))??;
    let (n, _m) = parse_header(&mut header.split_ascii_whitespace())?;

    let alias = (1..=n as i64).collect();
    let mut adj: Vec<Vec<Node>> = vec![Vec::new(); n];

    let mut i = 0usize;
    for line in lines {
        let line = line?;

        if i >= n {
            if line.trim().is_empty() {
                continue;
            }
            return Err(GraphReadError::Parse(format!(
                "more than {n} adjacency lines"
            )));
        }

        for token in line.split_ascii_whitespace() {
            let j: usize = token.parse().map_err(|_| {
                GraphReadError::Parse(format!("cannot parse neighbor: {token:?}"))
            })?;
            if j < 1 || j > n {
                return Err(GraphReadError::Parse(format!(
                    "neighbor {j} out of range 1..={n}"
                )));
            }
            if j - 1 != i {
                adj[i].push((j - 1) as Node);
                adj[j - 1].push(i as Node);
            }
        }
        i += 1;
    }

    finalize(name, alias, adj)
}

fn parse_header<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Result<(usize, usize)> {
    let n: usize = parse_next_value!(tokens, "header");
    let m: usize = parse_next_value!(tokens, "header");

    if n == 0 || m == 0 {
        return Err(GraphReadError::Header(format!(
            "expected positive vertex and edge counts, got n={n} m={m}"
        )));
    }

    Ok((n, m))
}

fn finalize(name: &str, alias: Vec<i64>, mut adj: Vec<Vec<Node>>) -> Result<CsrGraph> {
    for list in &mut adj {
        list.sort_unstable();
        list.dedup();
    }

    Ok(CsrGraph::from_sorted_adjacency(name, alias, adj))
}
