use timewheel::app::{AppModel, Outcome};
use timewheel::config;
use timewheel::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    let watch = config::write_default_config()
        .inspect_err(|e| log::warn!("Could not create default config: {}", e))
        .ok();

    let mut app = AppModel::new(&config)?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, watch);

    while let Ok(event) = rx.recv_blocking() {
        match app.update(event) {
            Outcome::Idle => {}
            Outcome::Emit(value) => println!("{}", serde_json::to_string(&value)?),
            Outcome::Quit => break,
        }
    }

    Ok(())
}
