//! Compile-fail tests for `#[derive(Inspect)]` misuse.

#[test]
fn compile_fail_tests() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/*.rs");
}
