//! Sequence decomposition example.
//!
//! This example parses a FIN message (from the file given as first argument,
//! or a built-in MT540) and prints every sequence its message type defines.
//!
//! ```text
//! RUST_LOG=debug cargo run --example decompose -- message.fin
//! ```

use swiftmt::prelude::*;
use tracing::{info, warn};

const SAMPLE: &str = "{1:F01BANKBEBBAXXX0000000000}{2:I540BANKDEFFXXXXN}{4:\r\n\
:16R:GENL\r\n\
:20C::SEME//REF540\r\n\
:23G:NEWM\r\n\
:16S:GENL\r\n\
:16R:TRADDET\r\n\
:98A::TRAD//20240102\r\n\
:35B:ISIN US0378331005\r\n\
:16S:TRADDET\r\n\
:16R:SETDET\r\n\
:22F::SETR//TRAD\r\n\
:16R:SETPRTY\r\n\
:95P::DEAG//BANKBEBB\r\n\
:16S:SETPRTY\r\n\
:16R:SETPRTY\r\n\
:95P::REAG//BANKDEFF\r\n\
:16S:SETPRTY\r\n\
:16S:SETDET\r\n\
-}";

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let raw = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)?,
        None => SAMPLE.to_string(),
    };

    let msg = SwiftMessage::parse(&raw)?;
    let Some(mt) = msg.message_type() else {
        anyhow::bail!("message has no application header");
    };
    info!("MT{} with {} payload tags, style {}", mt, msg.payload().len(), msg.style());

    for name in msg.sequence_names() {
        let decomposition = msg.sequence(name)?;
        for diagnostic in &decomposition.diagnostics {
            warn!("sequence {}: {}", name, diagnostic);
        }
        for (i, seq) in decomposition.iter().enumerate() {
            let tags: Vec<&str> = seq.tags().names().collect();
            info!("sequence {} #{} [{}]: {}", name, i + 1, seq.label(), tags.join(","));
        }
    }

    Ok(())
}
