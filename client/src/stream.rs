use numgen::NumberSource;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tonic::transport::Channel;
use tracing::{debug, error, info};

use crate::area::area_client::AreaClient;
use crate::area::NumberRequest;

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamReport {
    pub sent: usize,
    /// `None` when the terminal response was an error.
    pub max: Option<i64>,
}

/// Sends one number per `interval` until `token` is cancelled or the receiver goes away.
/// The first number goes out one full interval after the call. Returns how many were sent.
pub async fn send_numbers(
    tx: mpsc::Sender<NumberRequest>,
    mut source: NumberSource,
    interval: Duration,
    token: CancellationToken,
) -> usize {
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut sent = 0;
    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        // A full channel must not delay cancellation.
        let permit = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            permit = tx.reserve() => permit,
        };
        let Ok(permit) = permit else {
            error!("error publishing message into stream: stream closed");
            break;
        };
        let number = source.next_number();
        info!("Send new number: {number}");
        permit.send(NumberRequest { number });
        sent += 1;
    }
    debug!(sent, "sender stopped");
    sent
}

/// Cancels `token` once `deadline` elapses. Returns early if something else cancels it first.
pub async fn watch_deadline(deadline: Duration, token: CancellationToken) {
    tokio::select! {
        _ = time::sleep(deadline) => {
            info!("stop publishing messages to the stream");
            token.cancel();
        }
        _ = token.cancelled() => {}
    }
}

/// Runs the sender and the deadline watcher side by side and waits for the sender.
pub async fn send_until_deadline(
    tx: mpsc::Sender<NumberRequest>,
    source: NumberSource,
    interval: Duration,
    deadline: Duration,
) -> usize {
    let token = CancellationToken::new();
    let tracker = TaskTracker::new();
    let sender = tracker.spawn(send_numbers(tx, source, interval, token.clone()));
    tracker.close();
    let watcher = tokio::spawn(watch_deadline(deadline, token.clone()));

    tracker.wait().await;
    token.cancel();
    if let Err(e) = watcher.await {
        error!(error = %e, "deadline watcher failed");
    }
    match sender.await {
        Ok(sent) => sent,
        Err(e) => {
            error!(error = %e, "sender task failed");
            0
        }
    }
}

/// Drives the Max call: numbers flow from the sender into the request stream, which is
/// closed once the sender stops. Streaming failures are logged, never returned.
pub async fn stream_numbers(
    client: &mut AreaClient<Channel>,
    source: NumberSource,
    interval: Duration,
    deadline: Duration,
) -> StreamReport {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (response, sent) = tokio::join!(
        client.max(ReceiverStream::new(rx)),
        send_until_deadline(tx, source, interval, deadline),
    );
    let max = match response {
        Ok(response) => {
            let max = response.into_inner().max;
            info!("Max = {max}");
            Some(max)
        }
        Err(status) => {
            error!(error = %status, "max stream failed");
            None
        }
    };
    StreamReport { sent, max }
}
