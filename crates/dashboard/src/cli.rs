use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "brand-dashboard",
    version,
    about = "Brand sentiment risk dashboard"
)]
pub(crate) struct Args {
    /// Defaults to config/dashboard.toml when that file exists.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Overrides [server].base_url.
    #[arg(long)]
    pub(crate) server: Option<String>,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    /// Runs one prediction without the TUI.
    #[arg(long, requires = "comment")]
    pub(crate) brand: Option<String>,
    #[arg(long, requires = "brand")]
    pub(crate) comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_flags_come_in_pairs() {
        assert!(Args::try_parse_from(["brand-dashboard", "--brand", "Acme"]).is_err());
        let args = Args::try_parse_from([
            "brand-dashboard",
            "--brand",
            "Acme",
            "--comment",
            "great",
        ])
        .unwrap();
        assert_eq!(args.brand.as_deref(), Some("Acme"));
        assert_eq!(args.log_dir, PathBuf::from("logs"));
        assert!(args.config.is_none());
    }
}
