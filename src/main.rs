fn main() {
    std::process::exit(scansync::app::startup::run());
}
