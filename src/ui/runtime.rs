use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::client::{HttpSupervisorClient, SupervisorApi};
use crate::config::Config;
use crate::dispatch::{CommandDispatcher, Notification};
use crate::status::StatusPoller;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, InputReader};
use crate::ui::input::{handle_key, InputAction};
use crate::ui::render::draw;
use crate::ui::terminal_session::TerminalSession;

const TICK_RATE: Duration = Duration::from_millis(250);
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(50);
const SNAPSHOT_CHANNEL_CAPACITY: usize = 16;
const NOTIFICATION_CHANNEL_CAPACITY: usize = 16;

/// Run the interactive console until the user quits.
pub async fn run(config: &Config) -> io::Result<()> {
    let client = HttpSupervisorClient::new(&config.console, &config.endpoints)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    tracing::info!(base_url = client.base_url(), "Console connecting to supervisor");
    let api: Arc<dyn SupervisorApi> = Arc::new(client);

    let (snapshot_tx, mut snapshot_rx) = mpsc::channel(SNAPSHOT_CHANNEL_CAPACITY);
    let (notify_tx, mut notify_rx) = mpsc::channel::<Notification>(NOTIFICATION_CHANNEL_CAPACITY);

    let dispatcher = CommandDispatcher::new(Arc::clone(&api));
    let mut poller = StatusPoller::new(api, config.console.poll_interval(), snapshot_tx);
    let mut app = App::new(config.console.notification_ttl());

    let mut session = TerminalSession::enter()?;
    let mut input = InputReader::spawn(INPUT_POLL_TIMEOUT);
    let mut ticker = tokio::time::interval(TICK_RATE);
    poller.start();

    let result = loop {
        if let Err(err) = session.terminal().draw(|frame| draw(frame, &app)) {
            break Err(err);
        }
        if app.should_quit() {
            break Ok(());
        }

        tokio::select! {
            event = input.recv() => match event {
                Some(AppEvent::Key(key)) => {
                    if let InputAction::Dispatch(command) = handle_key(&mut app, key) {
                        let dispatcher = dispatcher.clone();
                        let notify_tx = notify_tx.clone();
                        tokio::spawn(async move {
                            let notification = dispatcher.dispatch(command).await;
                            let _ = notify_tx.send(notification).await;
                        });
                    }
                }
                // The next draw picks up the new size.
                Some(AppEvent::Resize(_, _)) => {}
                None => break Ok(()),
            },
            Some(snapshot) = snapshot_rx.recv() => {
                app.on_snapshot(snapshot);
            }
            Some(notification) = notify_rx.recv() => {
                app.on_notification(notification);
            }
            _ = ticker.tick() => app.on_tick(),
        }
    };

    poller.stop();
    app.teardown();
    drop(input);
    drop(session);
    tracing::info!("Console closed");
    result
}
