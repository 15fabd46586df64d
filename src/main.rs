use log::error;

fn main() {
    if let Err(e) = kalem::cli::run() {
        error!("{}", e);
        std::process::exit(1);
    }
}
