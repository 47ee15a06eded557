//! Log output for the split rule's decisions.
//!
//! Only available with the `logging` feature. Every time the rule runs it
//! emits one `debug` event saying which groups were added or why the
//! environment was skipped; hook runs themselves are `trace` events. Hosts
//! that already install a subscriber do not need this module.

use std::io;

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter,
    filter::LevelFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Overrides the level with full filter directives (`RUST_LOG` syntax)
pub const LOG_ENV_VAR: &str = "VUE_SPLIT_LOG";

const TARGETS: [&str; 2] = ["vue_split_plugin", "vue_split_config"];

/// How much of the rule's activity to show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Silent,
    /// Only problems while loading options
    #[default]
    Warn,
    /// Applied groups and skip reasons, per environment
    Decisions,
    /// Decisions plus every hook invocation
    Trace,
}

impl LogLevel {
    fn directive_level(self) -> &'static str {
        match self {
            Self::Silent => "off",
            Self::Warn => "warn",
            Self::Decisions => "debug",
            Self::Trace => "trace",
        }
    }

    /// Filter covering this plugin and its config crate only
    pub fn env_filter(self) -> EnvFilter {
        let level = self.directive_level();
        let directives = TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",");

        EnvFilter::builder()
            .with_default_directive(LevelFilter::OFF.into())
            .parse_lossy(directives)
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(Self::Silent),
            "warn" | "warning" => Ok(Self::Warn),
            "decisions" | "debug" => Ok(Self::Decisions),
            "trace" => Ok(Self::Trace),
            other => Err(format!("Invalid log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Silent => "silent",
            Self::Warn => "warn",
            Self::Decisions => "decisions",
            Self::Trace => "trace",
        })
    }
}

/// Subscriber writing compact lines for `level` to `writer`
pub fn subscriber<W>(level: LogLevel, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    build(level.env_filter(), writer)
}

fn build<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(writer),
    )
}

/// Install a global stderr subscriber.
///
/// A non-empty `VUE_SPLIT_LOG` replaces `level`. Returns `false` when a
/// global subscriber was already set.
///
/// # Example
///
/// ```rust,no_run
/// use vue_split_plugin::logging::{LogLevel, init_logging};
///
/// init_logging(LogLevel::Decisions);
/// ```
pub fn init_logging(level: LogLevel) -> bool {
    let filter = match std::env::var(LOG_ENV_VAR) {
        Ok(directives) if !directives.trim().is_empty() => {
            EnvFilter::builder().parse_lossy(directives)
        }
        _ => level.env_filter(),
    };

    build(filter, io::stderr).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChainConfig, EnvironmentContext, PluginHost, SplitVueChunkPlugin};
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use vue_split_config::{EnvironmentConfig, OutputTarget, SplitChunksOptions};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(level: LogLevel, target: OutputTarget) -> String {
        let captured = Captured::default();
        let writer = {
            let captured = captured.clone();
            move || captured.clone()
        };

        tracing::subscriber::with_default(subscriber(level, writer), || {
            let mut host = PluginHost::new();
            host.add_plugin(SplitVueChunkPlugin::new());
            let env =
                EnvironmentContext::new("ssr", EnvironmentConfig::default().with_target(target));
            let mut chain = ChainConfig::with_split_chunks(SplitChunksOptions::default());
            host.modify_chain(&env, &mut chain);
        });

        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn decisions_level_shows_skip_reason() {
        let output = capture(LogLevel::Decisions, OutputTarget::Node);
        assert!(output.contains("skipped vue cache groups"), "{output}");
        assert!(output.contains("output target is node, not web"), "{output}");
        assert!(!output.contains("modify bundler chain"), "{output}");
    }

    #[test]
    fn decisions_level_shows_applied_groups() {
        let output = capture(LogLevel::Decisions, OutputTarget::Web);
        assert!(output.contains("added vue cache groups"), "{output}");
    }

    #[test]
    fn trace_level_shows_hook_runs() {
        let output = capture(LogLevel::Trace, OutputTarget::Node);
        assert!(output.contains("modify bundler chain"), "{output}");
    }

    #[test]
    fn default_level_hides_decisions() {
        assert!(capture(LogLevel::default(), OutputTarget::Node).is_empty());
        assert!(capture(LogLevel::Silent, OutputTarget::Web).is_empty());
    }

    #[test]
    fn log_level_from_str() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Decisions);
        assert_eq!("Decisions".parse::<LogLevel>().unwrap(), LogLevel::Decisions);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Silent);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn log_level_display_round_trips() {
        for level in [
            LogLevel::Silent,
            LogLevel::Warn,
            LogLevel::Decisions,
            LogLevel::Trace,
        ] {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
    }
}
