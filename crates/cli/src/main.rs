fn main() -> Result<(), Box<dyn std::error::Error>> {
    hdlscope_cli::run()
}
