#[test]
fn ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/basic.rs");
    t.pass("tests/ui/generic.rs");
    t.pass("tests/ui/enum_leaf.rs");
    t.compile_fail("tests/ui/union_rejected.rs");
    t.compile_fail("tests/ui/lifetime_rejected.rs");
}
