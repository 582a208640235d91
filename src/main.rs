fn main() {
    if let Err(e) = ecodash_lib::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
