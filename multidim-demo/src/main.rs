use multidim_core::na_types;
use multidim_core::prelude::*;
use multidim_demo::{Pixel, gradient};
use nalgebra::DMatrix;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // No dimension: the target is the single leaf.
    let mut n = 0i32;
    init(&mut n, Initializer::<i32>::None, &[])?;
    println!("{n}");
    init(&mut n, Initializer::constant(-1), &[])?;
    println!("{n}");

    let mut s = String::new();
    init(&mut s, Initializer::constant("a".to_owned()), &[])?;
    println!("{s}");
    init(&mut s, Initializer::producer(|| "x".to_owned()), &[])?;
    println!("{s}");
    init(&mut s, Initializer::mutator(|s: &mut String| *s = "y".to_owned()), &[])?;
    println!("{s}");

    let mut square: Vec<Vec<i32>> = Vec::new();
    init_default(&mut square, &[2, 2])?;
    println!("{square:?}");
    init(&mut square, Initializer::constant(4), &[2, 2])?;
    println!("{square:?}");

    let mut cube: Vec<Vec<Vec<i32>>> = Vec::new();
    init(&mut cube, Initializer::constant(8), &[2, 2, 2])?;
    println!("{cube:?}");

    let mut a: Vec<Vec<usize>> = Vec::new();
    init(&mut a, Initializer::indexed(|c| 2 * c[0] + c[1] + 1), &[3, 2])?;
    println!("{a:?}");

    let img = gradient(4, 6)?;
    let brightest = img
        .iter()
        .flatten()
        .map(Pixel::luma)
        .fold(0.0, f64::max);
    println!("gradient 4x6, brightest luma {brightest:.1}");

    let m: DMatrix<f64> = na_types::dmatrix(Initializer::indexed(|c| (c[0] * 10 + c[1]) as f64), 3, 3)?;
    println!("{m}");

    if let Err(err) = init(&mut cube, Initializer::constant(1), &[2, 2, 2, 2]) {
        tracing::warn!(%err, "expected rejection");
        println!("rejected: {err}");
    }

    Ok(())
}
