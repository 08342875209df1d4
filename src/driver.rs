//! Driver spawns and manages the device poll task.

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, trace, warn};

use crate::bridge::ExchangeBridge;
use crate::link::BoardLink;
use crate::source::ByteSource;
use crate::types::TelemetrySnapshot;

/// Result of spawning the driver task.
pub struct DriverChannels {
    /// Receiver for telemetry snapshots. Carries `None` once the task ends.
    pub telemetry: watch::Receiver<Option<TelemetrySnapshot>>,
    /// Cancellation token for graceful shutdown.
    pub cancel: CancellationToken,
}

impl DriverChannels {
    /// Telemetry snapshots as a stream.
    ///
    /// Latest-value semantics: a slow consumer sees the newest snapshot, not
    /// every intermediate one.
    pub fn telemetry_updates(&self) -> impl Stream<Item = TelemetrySnapshot> + 'static {
        WatchStream::new(self.telemetry.clone()).filter_map(|opt| async move { opt })
    }
}

/// Driver spawns and manages the device poll task.
///
/// The task owns the [`BoardLink`], the byte source and the exchange bridge,
/// and runs the whole poll cycle: read inbound bytes, publish fresh
/// telemetry, pull staged host requests, drain the command queue. On
/// cancellation (or source termination) it runs the link's teardown before
/// exiting, so the device is always left stopped and the transport released.
pub struct Driver;

impl Driver {
    /// Spawn the poll task for the given source, bridge and link.
    pub fn spawn<S, B>(source: S, bridge: B, link: BoardLink) -> DriverChannels
    where
        S: ByteSource,
        B: ExchangeBridge + 'static,
    {
        let (telemetry_tx, telemetry_rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::poll_task(source, bridge, link, telemetry_tx, cancel_task).await;
        });

        DriverChannels { telemetry: telemetry_rx, cancel }
    }

    async fn poll_task<S, B>(
        mut source: S,
        mut bridge: B,
        mut link: BoardLink,
        telemetry_tx: watch::Sender<Option<TelemetrySnapshot>>,
        cancel: CancellationToken,
    ) where
        S: ByteSource,
        B: ExchangeBridge + 'static,
    {
        info!("device poll task started");
        let mut error_count = 0u32;
        let max_errors = link.config().max_source_errors;

        let mut request_poll = tokio::time::interval(link.config().poll_interval);
        request_poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("poll task cancelled");
                    break;
                }
                _ = request_poll.tick() => {
                    // Host requests arrive even when the board is quiet.
                    link.process_requests(&mut bridge);
                    link.drain();
                }
                chunk = source.next_chunk() => match chunk {
                    Ok(Some(bytes)) => {
                        error_count = 0;
                        trace!("inbound chunk of {} bytes", bytes.len());

                        let before = link.stats().frames_decoded;
                        link.feed(&bytes);
                        if link.stats().frames_decoded > before {
                            link.publish_telemetry(&mut bridge);
                            if telemetry_tx.send(Some(link.snapshot())).is_err() {
                                info!("telemetry receiver dropped, shutting down");
                                break;
                            }
                        }

                        link.process_requests(&mut bridge);
                        link.drain();
                    }
                    Ok(None) => {
                        info!("byte source ended");
                        break;
                    }
                    Err(e) => {
                        // Source error - don't give up on transient failures
                        error_count += 1;
                        error!("byte source error ({}/{}): {}", error_count, max_errors, e);

                        if error_count >= max_errors {
                            warn!("too many byte source errors, shutting down");
                            break;
                        }

                        // Exponential backoff: 50ms, 100ms, 200ms, ...
                        let backoff =
                            std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                        tokio::time::sleep(backoff).await;
                    }
                }
            }
        }

        // Always leave the device stopped, whatever ended the loop.
        link.shutdown().await;
        let _ = telemetry_tx.send(None);
        info!("device poll task ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::LinkConfig;
    use crate::source::ChannelSource;
    use crate::test_utils::{MemoryBridge, MockTransport, telemetry_frame};

    fn fast_config() -> LinkConfig {
        LinkConfig { settle: Duration::ZERO, poll_interval: Duration::from_millis(5), ..LinkConfig::default() }
    }

    async fn wait_for_snapshot(
        rx: &mut watch::Receiver<Option<TelemetrySnapshot>>,
    ) -> TelemetrySnapshot {
        let value = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|v| v.is_some()))
            .await
            .expect("timed out waiting for telemetry")
            .expect("driver task dropped the sender");
        value.expect("wait_for guarantees Some")
    }

    #[tokio::test]
    async fn decodes_inbound_chunks_and_publishes_telemetry() {
        let (chunks, source) = ChannelSource::new(8);
        let bridge = MemoryBridge::new();
        let transport = MockTransport::new();

        let mut link = BoardLink::new(fast_config());
        link.attach(Box::new(transport));
        let mut channels = Driver::spawn(source, bridge.clone(), link);

        // Split one frame across two chunks.
        let frame = telemetry_frame([4, 5, 6, 7, 8, 9, 1]);
        chunks.send(frame[..5].to_vec()).await.unwrap();
        chunks.send(frame[5..].to_vec()).await.unwrap();

        let snapshot = wait_for_snapshot(&mut channels.telemetry).await;
        assert_eq!(snapshot.p1, 4);
        assert_eq!(snapshot.rmc, 1);
        assert!(bridge.published().iter().any(|(key, value)| key == "p1" && *value == 4));

        channels.cancel.cancel();
    }

    #[tokio::test]
    async fn drains_staged_requests_while_board_is_quiet() {
        let (_chunks, source) = ChannelSource::new(8);
        let mut bridge = MemoryBridge::new();
        bridge.stage("131_0", &[]);
        let transport = MockTransport::new();

        let mut link = BoardLink::new(fast_config());
        link.attach(Box::new(transport.clone()));
        let channels = Driver::spawn(source, bridge, link);

        // The request poll must pick the batch up without any inbound bytes.
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if !transport.written().is_empty() {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("staged request never drained");

        assert_eq!(transport.written()[0], vec![0x23, 0x01, 0x83, 0x83]);
        channels.cancel.cancel();
    }

    async fn wait_for_teardown_frames(transport: &MockTransport) {
        tokio::time::timeout(Duration::from_secs(2), async {
            loop {
                if transport.written().len() >= 8 {
                    break;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("teardown frames never written");
    }

    #[tokio::test]
    async fn cancellation_runs_teardown() {
        let (_chunks, source) = ChannelSource::new(8);
        let bridge = MemoryBridge::new();
        let transport = MockTransport::new();

        let mut link = BoardLink::new(fast_config());
        link.attach(Box::new(transport.clone()));
        let channels = Driver::spawn(source, bridge, link);

        channels.cancel.cancel();
        wait_for_teardown_frames(&transport).await;

        // Stop-all-motors plus seven port-off frames.
        assert_eq!(transport.written().len(), 8);
        assert_eq!(transport.written()[0], vec![0x23, 0x01, 0x83, 0x83]);
    }

    #[tokio::test]
    async fn source_end_also_tears_down() {
        let (chunks, source) = ChannelSource::new(8);
        let bridge = MemoryBridge::new();
        let transport = MockTransport::new();

        let mut link = BoardLink::new(fast_config());
        link.attach(Box::new(transport.clone()));
        let _channels = Driver::spawn(source, bridge, link);

        drop(chunks); // stream end
        wait_for_teardown_frames(&transport).await;
        assert_eq!(transport.written().len(), 8);
    }
}
