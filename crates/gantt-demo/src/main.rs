#![forbid(unsafe_code)]

//! Interactive Gantt timeline demo binary entry point.

mod app;
mod cli;

fn main() {
    let opts = cli::Opts::parse();

    let store = match app::build_store(&opts) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to build the timeline: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app::run(store, &opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
