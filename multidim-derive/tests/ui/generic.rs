use multidim_core::prelude::*;
use multidim_derive::Nest;

#[derive(Clone, Debug, Default, PartialEq, Nest)]
struct Tagged<T> {
    tag: char,
    value: T,
}

fn main() {
    let mut cube: Vec<Vec<Vec<Tagged<i32>>>> = Vec::new();
    init(
        &mut cube,
        Initializer::constant(Tagged { tag: 'k', value: 8 }),
        &[2, 2, 2],
    )
    .unwrap();
    assert!(cube.iter().flatten().flatten().all(|t| t.value == 8 && t.tag == 'k'));
}
