fn main() -> anyhow::Result<()> {
    schedule_lib::run()
}
