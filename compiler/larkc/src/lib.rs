//! Larkc - command-line driver for the lark expression language.
//!
//! The binary is a thin wrapper: argument handling lives in `main.rs`,
//! while parsing, compiling and running source text live in [`commands`]
//! so they can be tested without a process boundary.

pub mod commands;
pub mod report;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber if `RUST_LOG` is set.
///
/// Output is a hierarchical tree on stderr so that spans from the parser,
/// compiler and interpreter nest visibly. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
