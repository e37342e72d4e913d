//! Terminal check-in station
//!
//! Reads validation codes from stdin, one per line, and checks them in
//! through the manual-entry component. `:q` or end of input exits.

use anyhow::Context;
use campus_ui::capabilities::FakeClipboard;
use campus_ui::checkin::{CheckInValidator, Feedback, ValidationCode};
use campus_ui::components::manual_validation_input::{
    self, Key, ManualInputAction, ManualInputEnvironment, ManualInputReducer, ManualInputState,
};
use campus_ui::config::Config;
use campus_ui::telemetry::init_tracing;
use campus_ui_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config.log_level);

    info!(api = %config.api.base_url, "Starting check-in station");

    let client = config.api_client().context("building API client")?;
    let environment = ManualInputEnvironment {
        validator: Arc::new(CheckInValidator::new(Arc::new(client))),
        clipboard: Arc::new(FakeClipboard::unavailable()),
    };
    let store = Store::new(ManualInputState::default(), ManualInputReducer, environment);

    // Lookup plus check-in, each bounded by the client timeout
    let wait = Duration::from_secs(config.api.timeout_secs.saturating_mul(2).max(1));

    println!("Digite o código do ingresso (:q para sair)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim() == ":q" {
            break;
        }

        if let Err(error) = ValidationCode::parse(&line) {
            println!("{error}");
            continue;
        }

        store.send(ManualInputAction::InputChanged(line)).await?;
        if !store.state(manual_validation_input::view).await.can_submit {
            continue;
        }

        let finished = store
            .send_and_wait_for(
                ManualInputAction::KeyPressed(Key::Enter),
                |action| matches!(action, ManualInputAction::ValidationFinished(_)),
                wait,
            )
            .await;

        match finished {
            Ok(ManualInputAction::ValidationFinished(result)) => match Feedback::from(&result) {
                Feedback::Success(message) => println!("✔ {message}"),
                Feedback::Failure(message) => println!("✘ {message}"),
            },
            Ok(_) => {},
            Err(error) => {
                warn!(%error, "No answer from the validator");
                println!("✘ Sem resposta do servidor");
            },
        }
    }

    store.unmount();
    info!("Check-in station stopped");
    Ok(())
}
