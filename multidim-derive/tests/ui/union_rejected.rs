use multidim_derive::Nest;

#[derive(Nest)]
union Bits {
    word: u32,
    bytes: [u8; 4],
}

fn main() {
    let b = Bits { word: 1 };
    let _ = unsafe { b.bytes };
}
