fn main() -> anyhow::Result<()> {
  lift_planner_lib::run()
}
