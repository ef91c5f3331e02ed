fn main() -> anyhow::Result<()> {
    rlwm_lib::run()
}
