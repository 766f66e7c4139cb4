mod cli;

use tvdb::{CharCodeEmbedder, Metric, TextStore};

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let mut store = TextStore::new(Box::new(CharCodeEmbedder), Metric::Cosine);

    if args.len() == 1 {
        cli::run_repl(&mut store);
    } else {
        cli::run_single_command(&mut store);
    }
}
