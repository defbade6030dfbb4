use jambalaya_test::Inspect;

#[derive(Inspect)]
pub struct Order {
    #[inspect(hidden)]
    pub id: i64,
}

fn main() {}
