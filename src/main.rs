//! Standalone tessellation viewer binary.
//!
//! Reads optional TOML options from the file named by `TESSVIEW_OPTIONS`.

use std::path::Path;

use tessview::{Options, Viewer};

/// Environment variable naming an optional TOML options file.
const OPTIONS_ENV: &str = "TESSVIEW_OPTIONS";

fn load_options() -> Result<Options, tessview::TessViewError> {
    match std::env::var_os(OPTIONS_ENV) {
        Some(path) => {
            let path = Path::new(&path);
            log::info!("loading options from {}", path.display());
            Options::load(path)
        }
        None => Ok(Options::default()),
    }
}

fn main() {
    env_logger::init();

    let options = match load_options() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = Viewer::builder().with_options(options).build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
