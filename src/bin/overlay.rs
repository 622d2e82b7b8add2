//! Terminal stand-in for the OBS browser source: takes an overlay
//! query string, keeps the player fresh, and prints the slide the
//! badge would show.
//!
//! ```text
//! overlay 'name=Funky&game=both&fields=maxMmr,winRate,lastDiff'
//! ```

use anyhow::Context;
use mkworld_overlay::{LoungeClient, OverlayEngine, OverlaySession, AUTO_REFRESH_PERIOD};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mkworld_overlay=info".to_string()),
        )
        .init();

    let query = std::env::args()
        .nth(1)
        .context("usage: overlay '<name=...&game=...&fields=...>'")?;
    let session =
        OverlaySession::from_query(&query).context("query string needs at least a player name")?;

    let client = LoungeClient::new()?;
    let mut engine = OverlayEngine::new(client);
    engine.set_session(session);

    if let Err(err) = engine.refresh().await {
        eprintln!("refresh failed: {err}");
    }
    print_current(&engine);

    let mut index = engine.scheduler().subscribe();
    let mut refresh = tokio::time::interval(AUTO_REFRESH_PERIOD);
    refresh.tick().await; // the first tick fires immediately

    loop {
        tokio::select! {
            _ = refresh.tick() => {
                if let Err(err) = engine.refresh().await {
                    eprintln!("refresh failed: {err}");
                }
                print_current(&engine);
            }
            changed = index.changed() => {
                if changed.is_err() {
                    break;
                }
                print_current(&engine);
            }
        }
    }

    Ok(())
}

fn print_current(engine: &OverlayEngine) {
    match engine.current_slide() {
        Some(slide) => {
            let label = slide
                .label
                .map(|label| format!("{label}: "))
                .unwrap_or_default();
            let flag = slide
                .country_code
                .as_deref()
                .map(|code| format!(" [{code}]"))
                .unwrap_or_default();
            let diff = slide
                .last_diff
                .as_deref()
                .map(|diff| format!(" ({diff})"))
                .unwrap_or_default();
            println!("[{}] {label}{}{flag}{diff}", slide.source, slide.value);
        }
        None => println!("{}", engine.static_value()),
    }
}
