use std::path::PathBuf;

use clap::Parser;

/// Life OS Debugger: a terminal conversation that looks for the
/// contradiction keeping you stuck.
#[derive(Parser, Debug)]
#[command(name = "lifeos", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error) or a full
    /// filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print reply chunks as they arrive.
    #[arg(long)]
    pub stream: bool,

    /// Show assistant text at once instead of revealing it.
    #[arg(long)]
    pub no_reveal: bool,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// `EnvFilter` directive for `--log-level`, accepting bare level names.
    pub fn log_directive(&self) -> Option<String> {
        let level = self.log_level.as_deref()?.trim();
        if level.is_empty() {
            return None;
        }
        if level.contains('=') {
            Some(level.to_string())
        } else {
            Some(format!("lifeos={level}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = Args::parse_from(["lifeos", "--config", "/tmp/c.toml", "--stream"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(args.stream);
        assert!(!args.no_reveal);
        assert!(args.log_directive().is_none());
    }

    #[test]
    fn bare_level_is_scoped() {
        let args = Args::parse_from(["lifeos", "--log-level", "debug"]);
        assert_eq!(args.log_directive().as_deref(), Some("lifeos=debug"));
    }

    #[test]
    fn full_directive_passes_through() {
        let args = Args::parse_from(["lifeos", "--log-level", "lifeos_ai=trace"]);
        assert_eq!(args.log_directive().as_deref(), Some("lifeos_ai=trace"));
    }
}
