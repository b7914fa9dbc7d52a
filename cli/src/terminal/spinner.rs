use indicatif::ProgressStyle;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::terminal::logging::AdresFormatter;

/// Wires the subscriber stack: the custom formatter on stderr, plus a
/// spinner for spans that opt in with `indicatif.pb_show` (the zone
/// transfer is the only long-running call).
pub fn init_logging() {
    let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner_style());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(AdresFormatter)
        .with_writer(indicatif_layer.get_stderr_writer());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .init();
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {span_name} {msg}")
        .unwrap()
        .tick_strings(&["▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁"])
}
