use anyhow::Result;
use dgslice_core::model::Edge;
use dgslice_core::source::{FileSource, GraphSource};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MatrixView<'a> {
    vertices: &'a [String],
    /// Edge kind codes, 0 for no edge.
    matrix: Vec<Vec<i64>>,
    /// Every edge, including ones the matrix cannot show.
    edges: &'a [Edge],
}

/// Print the indexed vertex list and the dependency matrix of a graph.
pub fn matrix_command(graph_path: &str, json: bool) -> Result<()> {
    let graph = FileSource::new(graph_path).load()?;
    let matrix: Vec<Vec<i64>> = graph
        .dependency_matrix()
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.map(i64::from).unwrap_or(0)).collect())
        .collect();

    if json {
        let view = MatrixView { vertices: graph.vertices(), matrix, edges: graph.edges() };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let vertices = graph.vertices();
    let listing: Vec<String> =
        vertices.iter().enumerate().map(|(i, v)| format!("{i}:{v}")).collect();
    println!("Vertices ({}): {}", vertices.len(), listing.join(", "));

    let width = vertices.iter().map(String::len).max().unwrap_or(1).max(2);
    print!("{:width$} ", "");
    for v in vertices {
        print!(" {v:>width$}");
    }
    println!();
    for (v, row) in vertices.iter().zip(&matrix) {
        print!("{v:>width$} ");
        for cell in row {
            print!(" {cell:>width$}");
        }
        println!();
    }
    println!("Edges: {}", graph.edge_count());
    Ok(())
}
