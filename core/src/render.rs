//! Output backends for a finished [`crate::graph::SubnetGraph`].
//!
//! * [`html`]: one interactive page covering the whole range.
//! * [`png`]: one static image per subnet, laid out by [`layout`].

pub mod html;
pub mod layout;
pub mod png;

pub use html::{HtmlSettings, write_html};
pub use png::{PngSettings, render_subnets};
