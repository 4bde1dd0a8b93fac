fn main() -> anyhow::Result<()> {
    alarm_filter::run()
}
