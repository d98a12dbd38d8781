use std::io;

use anyhow::Context;
use log::info;

use trainer::{TrainerConfig, run};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = TrainerConfig::from_env()?;
    info!("training with {config:?}");

    run(&config, &mut io::stdout().lock()).with_context(|| {
        format!(
            "training from {} failed",
            config.dataset_path.display()
        )
    })?;

    Ok(())
}
