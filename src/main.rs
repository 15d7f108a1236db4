use pinmap::{run_pinmap, PinMapConfig};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run_pinmap(PinMapConfig::default())
}
