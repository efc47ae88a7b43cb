use dashmap::DashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::domain::ConnectionId;
use crate::ws::protocol::ServerMsg;

/// Outboxes of every live connection, keyed by connection id.
///
/// The registry pushes into these after each committed transition; the
/// websocket session drains its own outbox into the socket.
#[derive(Default)]
pub struct ConnectionHub {
    connections: DashMap<ConnectionId, UnboundedSender<ServerMsg>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Open an outbox for `conn`. Registering again replaces the old one.
    pub fn register(&self, conn: ConnectionId) -> UnboundedReceiver<ServerMsg> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.connections.insert(conn, tx);
        debug!(conn_id = %conn, "[HUB] connection registered");
        rx
    }

    pub fn unregister(&self, conn: ConnectionId) {
        if self.connections.remove(&conn).is_some() {
            debug!(conn_id = %conn, "[HUB] connection unregistered");
        }
    }

    /// Queue `msg` for `conn`. Returns false when the connection is gone.
    pub fn send(&self, conn: ConnectionId, msg: ServerMsg) -> bool {
        let delivered = match self.connections.get(&conn) {
            Some(tx) => tx.send(msg).is_ok(),
            None => return false,
        };
        if !delivered {
            // Receiver dropped without unregistering.
            self.connections.remove(&conn);
        }
        delivered
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
