use crate::config::HubConfig;
use crate::error::HubError;
use crate::room::control_loop::ControlLoop;
use crate::room::hub_command::HubCommand;
use crate::room::room_registry::RoomRegistry;
use crate::room::router::SignalRouter;
use crate::transport::{PeerConnection, PeerHandle};
use axum::extract::ws::Message;
use fuselink_core::{ConnectionId, RoomId};
use futures::{Sink, Stream};
use std::fmt::Display;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

struct HubInner {
    registry: Arc<RoomRegistry>,
    router: SignalRouter,
    command_tx: mpsc::UnboundedSender<HubCommand>,
    config: HubConfig,
}

/// Cloneable front of the signaling hub.
///
/// Membership changes are sent to a control loop task that owns all writes;
/// routing reads the registry directly. Must be created inside a Tokio
/// runtime, since it spawns that task.
#[derive(Clone)]
pub struct Hub {
    inner: Arc<HubInner>,
}

impl Hub {
    pub fn new(config: HubConfig) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let control_loop = ControlLoop::new(Arc::clone(&registry), command_rx);
        tokio::spawn(control_loop.run());

        Self {
            inner: Arc::new(HubInner {
                router: SignalRouter::new(Arc::clone(&registry), command_tx.clone()),
                registry,
                command_tx,
                config,
            }),
        }
    }

    /// Registers a new connection in `room` and starts its pumps.
    ///
    /// Returns once the peer is visible to routing. The connection then runs
    /// on its own task until it departs.
    pub async fn admit<Si, St, E>(
        &self,
        room: RoomId,
        sink: Si,
        stream: St,
    ) -> Result<ConnectionId, HubError>
    where
        Si: Sink<Message> + Unpin + Send + 'static,
        Si::Error: Display + Send,
        St: Stream<Item = Result<Message, E>> + Unpin + Send + 'static,
        E: Display + Send + 'static,
    {
        let (peer, outbound) = PeerHandle::new(room, self.inner.config.outbound_capacity());
        let id = peer.id();
        let connection = PeerConnection::new(&peer, outbound, self.clone());

        let (ack, registered) = oneshot::channel();
        self.inner
            .command_tx
            .send(HubCommand::Admit { peer, ack })
            .map_err(|_| HubError::ControlLoopClosed)?;

        // Owns the connection from here on, so a registered peer always gets
        // its pumps even if this caller stops waiting.
        let (started_tx, started) = oneshot::channel();
        tokio::spawn(async move {
            if registered.await.is_ok() {
                if started_tx.send(()).is_err() {
                    debug!("Caller stopped waiting for {}; running it anyway", id);
                }
                connection.run(sink, stream).await;
            }
        });

        started.await.map_err(|_| HubError::ControlLoopClosed)?;
        Ok(id)
    }

    /// Requests removal of a connection. Never blocks; repeated calls for the
    /// same connection are no-ops.
    pub fn depart(&self, room: &RoomId, connection_id: ConnectionId) {
        let cmd = HubCommand::Depart {
            room: room.clone(),
            connection_id,
        };
        if self.inner.command_tx.send(cmd).is_err() {
            debug!("Hub control loop is gone; {} already released", connection_id);
        }
    }

    pub fn router(&self) -> &SignalRouter {
        &self.inner.router
    }

    pub fn config(&self) -> &HubConfig {
        &self.inner.config
    }

    pub fn contains_room(&self, room: &RoomId) -> bool {
        self.inner.registry.contains_room(room)
    }

    pub fn room_count(&self) -> usize {
        self.inner.registry.room_count()
    }

    pub fn member_count(&self, room: &RoomId) -> usize {
        self.inner.registry.member_count(room)
    }

    pub fn peer_count(&self) -> usize {
        self.inner.registry.peer_count()
    }

    /// Whether some member of `room` is bound to `device`.
    pub fn has_device(&self, room: &RoomId, device: &str) -> bool {
        self.inner.registry.find_device(room, device).is_some()
    }
}
