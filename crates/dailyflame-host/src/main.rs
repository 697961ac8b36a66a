use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep_until};
use tracing_subscriber::EnvFilter;

use dailyflame_core::day::DateKey;
use dailyflame_host::command::{self, Command, HELP};
use dailyflame_host::config::HostConfig;
use dailyflame_host::error::HostError;
use dailyflame_host::registry::GameRegistry;
use dailyflame_host::render::TextSurface;
use dailyflame_host::session::SessionHost;
use dailyflame_host::store::FileStore;

/// How long to sleep when no game timer is pending.
const IDLE_WAKE: Duration = Duration::from_secs(60);

type Host = SessionHost<FileStore, TextSurface<std::io::Stdout>>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = HostConfig::load();
    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            tracing::error!("{problem}");
        }
        std::process::exit(1);
    }

    let registry = GameRegistry::new();
    let store = FileStore::open_or_empty(&config.data_file);
    tracing::info!(
        games = registry.available_games(),
        data_file = %store.path().display(),
        "dailyflame starting"
    );
    let catalog = config.build_catalog();
    if catalog.is_empty() {
        tracing::warn!("Game catalog is empty, no games will be offered");
    }
    let mut host: Host = SessionHost::new(
        catalog,
        registry,
        store,
        TextSurface::stdout(),
        StdRng::from_os_rng(),
        Box::new(DateKey::today),
    );

    let epoch = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let wake = host
            .next_due()
            .map(|due| epoch + Duration::from_millis(due))
            .unwrap_or_else(|| Instant::now() + IDLE_WAKE);

        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    host.advance_to(elapsed_ms(epoch));
                    if !dispatch(&mut host, &line) {
                        break;
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {e}");
                    break;
                },
            },
            () = sleep_until(wake) => host.advance_to(elapsed_ms(epoch)),
        }
    }
    tracing::info!("dailyflame exiting");
}

fn elapsed_ms(epoch: Instant) -> u64 {
    u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Run one terminal command. Returns `false` to quit.
fn dispatch(host: &mut Host, line: &str) -> bool {
    let Some(cmd) = command::parse(line) else {
        if !line.trim().is_empty() {
            println!("Unknown command. Type 'help'.");
        }
        return true;
    };
    let result = match cmd {
        Command::Quit => return false,
        Command::Help => {
            println!("{HELP}");
            Ok(())
        },
        Command::Show => {
            host.render_page();
            Ok(())
        },
        Command::AdminReset => {
            host.admin_reset();
            Ok(())
        },
        Command::Start(n) => Host::slot(n).and_then(|slot| host.start(slot)),
        Command::Close(n) => Host::slot(n).map(|slot| {
            host.close(slot);
        }),
        Command::Backdrop(n) => Host::slot(n).map(|slot| {
            host.backdrop_click(slot);
        }),
        Command::Game { slot, words } => Host::slot(slot).and_then(|slot| {
            let behavior = host
                .active_behavior(slot)
                .ok_or(HostError::NoActiveSession(slot))?;
            match command::encode_game_input(behavior, &words) {
                Some(bytes) => host.input(slot, &bytes),
                None => {
                    println!("That move doesn't fit this game. Type 'help'.");
                    Ok(())
                },
            }
        }),
    };
    if let Err(e) = result {
        println!("{e}");
    }
    true
}
