use multidim_core::prelude::*;
use multidim_derive::Nest;

#[derive(Clone, Default, Nest)]
struct Sample {
    weight: f64,
    hits: u32,
}

fn main() {
    let grid: Vec<Vec<Sample>> = build(
        Initializer::indexed(|c| Sample {
            weight: c[1] as f64,
            hits: c[0] as u32,
        }),
        &[2, 3],
    )
    .unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[1][2].hits, 1);
    assert_eq!(grid[1][2].weight, 2.0);
}
