use super::peer_handle::{DeviceSlot, PeerHandle, bind_device};
use crate::room::{Hub, RouteOutcome};
use axum::extract::ws::{Message, Utf8Bytes};
use bytes::Bytes;
use fuselink_core::{ConnectionId, EnvelopeError, RoomId, RoutingEnvelope};
use futures::{Sink, SinkExt, Stream, StreamExt};
use std::fmt::Display;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One admitted socket: the receiving end of its outbound queue plus what the
/// inbound pump needs to route on its behalf.
///
/// Deliberately holds no [`PeerHandle`], so the queue closes as soon as the
/// registry lets go of the peer.
pub struct PeerConnection {
    id: ConnectionId,
    room: RoomId,
    device_id: DeviceSlot,
    outbound: mpsc::Receiver<Utf8Bytes>,
    departed: CancellationToken,
    hub: Hub,
}

impl PeerConnection {
    pub(crate) fn new(peer: &PeerHandle, outbound: mpsc::Receiver<Utf8Bytes>, hub: Hub) -> Self {
        Self {
            id: peer.id(),
            room: peer.room().clone(),
            device_id: peer.device_slot(),
            outbound,
            departed: peer.departure(),
            hub,
        }
    }

    /// Drives both pumps until one of them stops or the hub removes the peer,
    /// then departs.
    ///
    /// Reading never outlives departure. The outbound task gets
    /// `close_timeout` to flush what is queued and write the Close frame; a
    /// socket that is still not accepting writes by then is aborted.
    pub(crate) async fn run<Si, St, E>(self, sink: Si, stream: St)
    where
        Si: Sink<Message> + Unpin + Send + 'static,
        Si::Error: Display + Send,
        St: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let Self {
            id,
            room,
            device_id,
            outbound,
            departed,
            hub,
        } = self;

        let mut outbound_task = tokio::spawn(outbound_pump(id, sink, outbound));

        let inbound = InboundPump {
            id,
            room: room.clone(),
            device_id,
            departed: departed.clone(),
            hub: hub.clone(),
        };

        let writer_done = tokio::select! {
            biased;
            _ = departed.cancelled() => {
                debug!("Peer {} was removed from room {}", id, room);
                false
            }
            _ = inbound.run(stream) => {
                debug!("Inbound pump of {} finished", id);
                false
            }
            _ = &mut outbound_task => {
                debug!("Outbound pump of {} finished", id);
                true
            }
        };

        hub.depart(&room, id);

        if !writer_done {
            let close_timeout = hub.config().close_timeout();
            if tokio::time::timeout(close_timeout, &mut outbound_task).await.is_err() {
                warn!("Peer {} did not take its Close frame in time, dropping socket", id);
                outbound_task.abort();
            }
        }

        info!("Peer {} disconnected from room {}", id, room);
    }
}

async fn outbound_pump<Si>(id: ConnectionId, mut sink: Si, mut outbound: mpsc::Receiver<Utf8Bytes>)
where
    Si: Sink<Message> + Unpin,
    Si::Error: Display,
{
    while let Some(text) = outbound.recv().await {
        if let Err(e) = sink.send(Message::Text(text)).await {
            warn!("Write to {} failed: {}", id, e);
            return;
        }
    }

    if let Err(e) = sink.send(Message::Close(None)).await {
        debug!("Close frame to {} not delivered: {}", id, e);
    }
}

struct InboundPump {
    id: ConnectionId,
    room: RoomId,
    device_id: DeviceSlot,
    departed: CancellationToken,
    hub: Hub,
}

impl InboundPump {
    async fn run<St, E>(self, mut stream: St)
    where
        St: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        while let Some(frame) = stream.next().await {
            // frames already buffered when the peer was removed are not routed
            if self.departed.is_cancelled() {
                break;
            }

            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Binary(data)) => match binary_to_text(data) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Dropping binary frame from {}: {}", self.id, e);
                        continue;
                    }
                },
                Ok(Message::Close(_)) => {
                    debug!("Peer {} closed the connection", self.id);
                    break;
                }
                Ok(_) => continue,
                Err(e) => {
                    warn!("Read from {} failed: {}", self.id, e);
                    break;
                }
            };

            self.dispatch(text);
        }
    }

    fn dispatch(&self, text: Utf8Bytes) {
        let envelope = match RoutingEnvelope::parse(text.as_str()) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Invalid signaling message from {}: {}", self.id, e);
                return;
            }
        };

        if let Some(device) = envelope.device()
            && bind_device(&self.device_id, device)
        {
            info!("Connection {} bound to device {}", self.id, device);
        }

        let router = self.hub.router();
        let Some(target) = envelope.target() else {
            let report = router.broadcast(&self.room, self.id, &text);
            debug!(
                "Broadcast {:?} from {} in room {}: {} delivered, {} evicted",
                envelope.kind, self.id, self.room, report.delivered, report.evicted
            );
            return;
        };

        match router.send_to_device(&self.room, target, &text) {
            RouteOutcome::Delivered => {
                debug!("Sent {:?} from {} to device {}", envelope.kind, self.id, target)
            }
            RouteOutcome::NotFound => {
                info!("Target device {} not found in room {}", target, self.room)
            }
            RouteOutcome::QueueFull => {
                warn!("Device {} could not keep up and was evicted", target)
            }
            RouteOutcome::Departed => debug!("Device {} is leaving, message dropped", target),
        }
    }
}

fn binary_to_text(data: Bytes) -> Result<Utf8Bytes, EnvelopeError> {
    String::from_utf8(Vec::from(data))
        .map(Utf8Bytes::from)
        .map_err(|_| EnvelopeError::NotUtf8)
}
