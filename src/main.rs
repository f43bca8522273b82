use anyhow::{Context, Result};
use clap::Parser;

use dockyard::cli::{render_layout, Action, CliArgs};
use dockyard::snapshot::{JsonFileStore, SnapshotStore};
use dockyard::update::update;
use dockyard::{HeadlessHost, LayoutConfig, Rect};

fn main() -> Result<()> {
    dockyard::tracing::init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => LayoutConfig::load_from(path),
        None => LayoutConfig::load(),
    };
    let store = match &args.layout {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::default_location().context("No config directory available")?,
    };

    let mut manager = config
        .build_manager(Box::new(HeadlessHost::default()))
        .context("Invalid dock configuration")?;

    if args.action == Action::Reset {
        store.clear()?;
    } else if let Some(snapshot) = store.load()? {
        let report = manager.restore(&snapshot);
        for key in &report.recovered_panels {
            eprintln!("note: panel '{}' was missing from the saved layout", key);
        }
    }

    if let Some(msg) = args.action.to_msg() {
        update(&mut manager, msg).context("Could not apply action")?;
    }

    let bounds = Rect::new(0.0, 0.0, args.width, args.height);
    print!("{}", render_layout(&manager, config.metrics(), bounds));

    if !args.dry_run {
        store.save(&manager.create_snapshot())?;
    }
    Ok(())
}
