mod batch;
mod config;
mod error;
mod flatten;
mod logging;
mod scan;

fn main() {
    logging::init();

    let cfg = match config::load_config(config::CONFIG_FILE) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("ignoring {}: {}", config::CONFIG_FILE, e);
            config::Config::default()
        }
    };

    batch::run(&cfg);
}
