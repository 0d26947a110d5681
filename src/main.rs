//! Confectionary Insights - sales analysis pipeline entry point.

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    confectionary_insights::pipeline::run()
}
