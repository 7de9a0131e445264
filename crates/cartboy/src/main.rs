use clap::Parser;

fn main() {
    env_logger::init();

    let cli = cartboy::Cli::parse();
    if let Err(e) = cartboy::run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
