use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use vending_machine::VendingMachine;
use vending_machine::config::Config;
use vending_machine::console::{ConsoleError, Session, Terminal};
use vending_machine::credentials::CredentialStore;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();

    let machine = match VendingMachine::from_config(&config) {
        Ok(machine) => machine,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (line_sender, line_receiver) = tokio::sync::mpsc::channel(16);

    // stdin is read on a plain thread so a pending read never holds up shutdown
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if line_sender.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                    break;
                }
            }
        }
    });

    let term = Terminal::new(
        ReceiverStream::new(line_receiver),
        io::stdout(),
        !config.no_clear,
        config.pace(),
    );
    let store = CredentialStore::new(&config.records, config.registration);
    let mut session = Session::new(machine, store, config.export.clone(), term);

    match session.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ConsoleError::InputClosed) => {
            warn!("input closed, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
