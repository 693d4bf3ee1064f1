use colored::*;
use indicatif::ProgressStyle;
use ptrmap_common::network::range::{self, SubnetBlock};
use ptrmap_core::resolver::{LookupObserver, ResolvedHost};
use tracing::span::EnteredSpan;
use tracing::{debug, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::format;

const TEMPLATE: &str = "{spinner:.blue} [{bar:32.green/bright_black}] {pos}/{len} {msg}";
const TICKS: &[&str] = &[
    "▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁",
];

/// Drives a progress bar from the pipeline's lookup events.
///
/// Nothing is drawn when the output is quieted; counting still happens.
pub struct LookupProgress {
    quiet: u8,
    span: Option<EnteredSpan>,
    looked_up: u64,
    resolved: usize,
}

impl LookupProgress {
    pub fn new(quiet: u8) -> Self {
        Self {
            quiet,
            span: None,
            looked_up: 0,
            resolved: 0,
        }
    }

    /// Clears the bar.
    pub fn finish(mut self) -> usize {
        self.span.take();
        debug!("{} of {} lookups answered", self.resolved, self.looked_up);
        self.resolved
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(TEMPLATE)
            .map(|style| style.tick_strings(TICKS))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl LookupObserver for LookupProgress {
    fn on_start(&mut self, blocks: &[SubnetBlock]) {
        debug!("Walking {}", format::block_count(blocks));
        if self.quiet > 0 {
            return;
        }

        let span = info_span!("lookups", indicatif.pb_show = true);
        span.pb_set_style(&Self::style());
        span.pb_set_length(range::address_count(blocks));
        span.pb_set_message("Resolving...");
        self.span = Some(span.entered());
    }

    fn on_lookup(&mut self, host: &ResolvedHost) {
        self.looked_up += 1;
        if host.is_resolved() {
            self.resolved += 1;
        }

        if let Some(span) = &self.span {
            span.pb_inc(1);
            if host.is_resolved() {
                span.pb_set_message(&format!(
                    "Resolved {} so far...",
                    format!("{} hosts", self.resolved).green().bold()
                ));
            }
        }
    }

    fn on_block(&mut self, block: &SubnetBlock, resolved: usize) {
        debug!("{block}: {resolved} of {} resolved", block.size());
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
