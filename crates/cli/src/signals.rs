use crate::error::Error;
use flume::{Receiver, Sender};
use orchestrator::ControlEvent;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Indefinitely listens to signals and sends signal events to the provided channel.
pub async fn wait_for_signal(signal_event: &Sender<SignalEvent>) -> Result<(), Error> {
    let mut sigusr1 = signal(SignalKind::user_defined1()).map_err(Error::SignalHandler)?;
    let mut sigusr2 = signal(SignalKind::user_defined2()).map_err(Error::SignalHandler)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(Error::SignalHandler)?;
    let mut sigint = signal(SignalKind::interrupt()).map_err(Error::SignalHandler)?;

    loop {
        tokio::select! {
            _ = sigusr1.recv() => {
                signal_event.send_async(SignalEvent::SigUSR1).await?;
            }
            _ = sigusr2.recv() => {
                signal_event.send_async(SignalEvent::SigUSR2).await?;
            }
            _ = sigterm.recv() => {
                signal_event.send_async(SignalEvent::Terminate).await?;
            }
            _ = sigint.recv() => {
                signal_event.send_async(SignalEvent::Terminate).await?;
            }
        }
    }
}

/// Turn signal events into engine control: SIGUSR1 dumps the open sessions,
/// SIGUSR2 re-reads the library roots, SIGTERM/SIGINT stop the engine.
pub async fn dispatch(
    events: Receiver<SignalEvent>,
    control: UnboundedSender<ControlEvent>,
    cancel: CancellationToken,
) {
    while let Ok(event) = events.recv_async().await {
        debug!(?event, "Received signal event");
        let control_event = match event {
            SignalEvent::SigUSR1 => ControlEvent::DumpSessions,
            SignalEvent::SigUSR2 => ControlEvent::RefreshCatalog,
            SignalEvent::Terminate => break,
        };
        if control.send(control_event).is_err() {
            break;
        }
    }
    cancel.cancel();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalEvent {
    SigUSR1,
    SigUSR2,
    Terminate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn dispatch_maps_signals_and_cancels_on_terminate() {
        let (signal_tx, signal_rx) = flume::bounded(8);
        let (control_tx, mut control_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        signal_tx.send_async(SignalEvent::SigUSR1).await.unwrap();
        signal_tx.send_async(SignalEvent::SigUSR2).await.unwrap();
        signal_tx.send_async(SignalEvent::Terminate).await.unwrap();

        dispatch(signal_rx, control_tx, cancel.clone()).await;

        assert_eq!(control_rx.recv().await, Some(ControlEvent::DumpSessions));
        assert_eq!(control_rx.recv().await, Some(ControlEvent::RefreshCatalog));
        assert!(cancel.is_cancelled());
    }
}
