fn main() {
    lci::app::cli::run();
}
