use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Target of user-facing notices, kept visible at the quiet default level.
pub const NOTICE_TARGET: &str = "notice";

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        format!("warn,{NOTICE_TARGET}=info")
    }
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `directive` (usually [`default_directive`]) applies.
/// Output goes to stderr so rendered tables on stdout stay clean.
pub fn init_tracing(directive: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(directive))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing::{debug, info, warn};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(directive: &str, emit: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(directive))
            .with(
                fmt::layer()
                    .with_writer(move || writer.clone())
                    .with_ansi(false)
                    .with_target(false),
            );
        tracing::subscriber::with_default(subscriber, emit);
        let bytes = out.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_quiet_default_keeps_notices() {
        let out = capture(&default_directive(false), || {
            info!(target: NOTICE_TARGET, "Product deleted successfully");
            info!("cache refreshed");
            warn!("slow response");
        });

        assert!(out.contains("Product deleted successfully"));
        assert!(out.contains("slow response"));
        assert!(!out.contains("cache refreshed"));
    }

    #[test]
    fn test_verbose_default_shows_debug() {
        let out = capture(&default_directive(true), || debug!("request sent"));
        assert!(out.contains("request sent"));
    }
}
