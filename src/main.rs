fn main() -> anyhow::Result<()> {
    chat_import::cli::run()
}
