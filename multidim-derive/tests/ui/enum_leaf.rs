use multidim_core::prelude::*;
use multidim_derive::Nest;

#[derive(Clone, Copy, Debug, Default, PartialEq, Nest)]
enum Terrain {
    #[default]
    Water,
    Land,
}

fn main() {
    let mut map: Vec<Vec<Terrain>> = Vec::new();
    init(
        &mut map,
        Initializer::indexed_mut(|t: &mut Terrain, c| {
            if c[0] == c[1] {
                *t = Terrain::Land;
            }
        }),
        &[3, 3],
    )
    .unwrap();
    assert_eq!(map[0][0], Terrain::Land);
    assert_eq!(map[0][1], Terrain::Water);
}
