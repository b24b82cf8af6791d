use multidim_derive::Nest;

#[derive(Default, Nest)]
struct Borrowed<'a> {
    name: &'a str,
}

fn main() {
    let b = Borrowed { name: "x" };
    println!("{}", b.name);
}
