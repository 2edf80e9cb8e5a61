use anyhow::Context;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use scene_viewer::config::{CliArgs, ViewerConfig};
use scene_viewer::viewer::Viewer;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let filter = if args.verbose {
        EnvFilter::new("scene_viewer=debug")
    } else {
        EnvFilter::new("scene_viewer=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config: ViewerConfig = args.into();

    match Viewer::run(&config) {
        Ok(summary) => {
            println!(
                "Done: {} frames, {} draws ({} skipped) across {} viewports in {:.2}s",
                summary.frames,
                summary.stats.draws,
                summary.stats.skipped,
                summary.stats.viewports,
                summary.duration.as_secs_f64()
            );
            println!(
                "Models: {} loaded, {} failed; instances: {}; lights: {}",
                summary.models_loaded, summary.load_failures, summary.instances, summary.lights
            );
            println!("{}", summary.scene_json);
            Ok(())
        }
        Err(e) => {
            error!(%e, "Viewer failed");
            Err(anyhow::anyhow!(e)).context("scene-viewer run failed")
        }
    }
}
