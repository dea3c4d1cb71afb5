use crate::output::{pass_line, print_json};
use anyhow::Context;
use flyover_core::{Config, Pipeline};

pub fn run(config: &Config, json: bool) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config).context("failed to set up lookups")?;
    let rt = tokio::runtime::Runtime::new()?;

    match rt.block_on(pipeline.run()) {
        Ok(windows) => {
            if json {
                print_json(&windows)?;
            } else if windows.is_empty() {
                println!("No upcoming passes reported.");
            } else {
                for window in &windows {
                    println!("{}", pass_line(window, &chrono::Local));
                }
            }
            Ok(())
        }
        Err(failure) => {
            if json {
                print_json(&serde_json::json!({ "error": &failure }))?;
            }
            Err(anyhow::Error::new(failure).context("It didn't work!"))
        }
    }
}
