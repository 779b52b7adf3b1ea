// Session mapping for the HTTP binding: session id -> push channel

use folo_mcp::protocol::JsonRpcResponse;
use folo_mcp::{McpServer, ToolRegistry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Live session: its protocol server and the SSE channel it replies on
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    server: McpServer,
    outbound: mpsc::UnboundedSender<JsonRpcResponse>,
}

impl SessionHandle {
    /// Process one client message on its own task; any reply goes out on SSE.
    pub fn dispatch(&self, message: serde_json::Value) {
        let session = self.clone();
        tokio::spawn(async move {
            let Some(response) = session.server.handle_value(message).await else {
                return;
            };
            if session.outbound.send(response).is_err() {
                debug!(session_id = %session.id, "Session closed before reply was delivered");
            }
        });
    }
}

/// A freshly opened session, already registered
pub struct OpenSession {
    pub id: String,
    pub messages: mpsc::UnboundedReceiver<JsonRpcResponse>,
    pub guard: SessionGuard,
}

/// Removes the session from the mapping when dropped
pub struct SessionGuard {
    id: String,
    manager: Arc<SessionManager>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.manager.remove(&self.id) {
            info!(session_id = %self.id, "SSE session closed");
        }
    }
}

/// Owner of every active HTTP session
pub struct SessionManager {
    registry: Arc<ToolRegistry>,
    sessions: Mutex<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    // Never held across an await.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionHandle>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mint an id, bind a protocol server to a new channel and register it.
    ///
    /// The entry is in the mapping before this returns, so the id can never
    /// reach a client ahead of its registration.
    pub fn open(self: &Arc<Self>) -> OpenSession {
        let (outbound, messages) = mpsc::unbounded_channel();
        let server = McpServer::new(self.registry.clone());

        let id = {
            let mut sessions = self.lock();
            let mut id = uuid::Uuid::new_v4().to_string();
            while sessions.contains_key(&id) {
                id = uuid::Uuid::new_v4().to_string();
            }
            sessions.insert(
                id.clone(),
                SessionHandle {
                    id: id.clone(),
                    server,
                    outbound,
                },
            );
            id
        };

        OpenSession {
            id: id.clone(),
            messages,
            guard: SessionGuard {
                id,
                manager: self.clone(),
            },
        }
    }

    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.lock().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    /// Returns whether the session was still registered.
    pub fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every session; their SSE streams end once the senders are gone.
    pub fn close_all(&self) -> usize {
        let drained: Vec<_> = self.lock().drain().collect();
        drained.len()
    }
}
