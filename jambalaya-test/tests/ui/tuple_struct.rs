use jambalaya_test::Inspect;

#[derive(Inspect)]
pub struct Meters(pub f64);

fn main() {}
