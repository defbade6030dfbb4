use jambalaya_test::Inspect;

#[derive(Inspect)]
pub enum Payment {
    Cash,
    Card { last4: String },
}

fn main() {}
