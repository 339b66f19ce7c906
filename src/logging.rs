use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &["lagtf", "lagtf_poly", "lagtf_model", "lagtf_analysis"];

/// Maps a verbosity count to a level name.
///
/// Mapping:
/// - 0      -> warn
/// - 1      -> info
/// - 2      -> debug
/// - 3+     -> trace
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_filter(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing for all lagtf crates at the given verbosity.
///
/// `RUST_LOG` overrides the verbosity if set. Returns `false` when a global
/// subscriber was already installed, in which case nothing changes.
pub fn init(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(3), "trace");
        assert_eq!(level(9), "trace");
    }

    #[test]
    fn filter_covers_every_crate() {
        let filter = default_filter(2);
        for target in CRATE_TARGETS {
            assert!(filter.contains(&format!("{target}=debug")));
        }
        assert!(EnvFilter::try_new(&filter).is_ok());
    }

    #[test]
    fn repeated_init_is_harmless() {
        let _ = init(0);
        assert!(!init(1));
    }
}
