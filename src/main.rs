fn main() {
    luck_cli::cli::run();
}
