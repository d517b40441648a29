//! Stderr logging with the bridge prefix on every line.
//!
//! stdout carries JSON-RPC only, so nothing here may ever write to it.

use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::{self, format::Writer, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

pub const LOG_PREFIX: &str = "[MCP-Bridge]";

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence over `log_level` when set.
pub fn initialize(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .event_format(Prefixed::new(LOG_PREFIX, fmt::format().with_target(false)))
        .init();
}

/// Create a request span with standard fields for context propagation
pub fn request_span(request_id: &str, transport: &str) -> tracing::Span {
    tracing::info_span!(
        "request",
        request_id = %request_id,
        transport = %transport
    )
}

/// Wraps another event formatter and writes a fixed prefix in front of it.
pub struct Prefixed<E> {
    prefix: &'static str,
    inner: E,
}

impl<E> Prefixed<E> {
    pub fn new(prefix: &'static str, inner: E) -> Self {
        Self { prefix, inner }
    }
}

impl<S, N, E> FormatEvent<S, N> for Prefixed<E>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    E: FormatEvent<S, N>,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        writer.write_str(self.prefix)?;
        writer.write_char(' ')?;
        self.inner.format_event(ctx, writer, event)
    }
}
