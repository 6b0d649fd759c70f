pub(crate) mod headless;
pub(crate) mod logging;

pub(crate) use headless::{headless_ui_config, run_headless};
pub(crate) use logging::init_tracing;
