//! Message Gateway: decodes inbound frames and routes them to use cases.
//!
//! Routes are looked up in a table built once at startup. Each connection
//! owns a [`GatewaySession`] that tracks where it is in the
//! `UNIDENTIFIED -> IDENTIFIED -> CLOSED` lifecycle.

use std::{collections::HashMap, sync::Arc};

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::{
    domain::{
        ConnectionId, ConnectionRepository, DisplayName, MessageContent, Outbound,
        RegistryError, TopicBroker,
    },
    infrastructure::dto::websocket::{InboundFrame, InboundPayload},
    usecase::{JoinChatUseCase, SendMessageError, SendMessageUseCase},
};

/// Optional prefix on inbound routes, e.g. `/app/chat.addUser`.
pub const APP_DESTINATION_PREFIX: &str = "/app/";

/// Route that binds a display name and announces it (JOIN).
pub const ROUTE_ADD_USER: &str = "chat.addUser";

/// Route that broadcasts a chat message (CHAT).
pub const ROUTE_SEND_MESSAGE: &str = "chat.sendMessage";

/// Errors raised while handling one inbound frame.
///
/// All of them are local to the offending frame; the connection stays open.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Frame arrived in a state that does not accept it
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// Frame could not be decoded or validated
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// Registry rejected the operation; a sequencing bug, not client input
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Per-connection gateway state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unidentified,
    Identified,
    Closed,
}

/// Gateway view of one connection. Owned by that connection's worker.
#[derive(Debug)]
pub struct GatewaySession {
    connection_id: ConnectionId,
    outbound: Outbound,
    state: SessionState,
}

impl GatewaySession {
    pub fn new(connection_id: ConnectionId, outbound: Outbound) -> Self {
        Self {
            connection_id,
            outbound,
            state: SessionState::Unidentified,
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Enter the terminal state. Later frames are ignored.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }
}

type RouteHandler = for<'a> fn(
    &'a MessageGateway,
    &'a mut GatewaySession,
    InboundPayload,
) -> BoxFuture<'a, Result<(), GatewayError>>;

/// Inbound-facing component shared by every connection.
pub struct MessageGateway {
    routes: HashMap<&'static str, RouteHandler>,
    join: JoinChatUseCase,
    send: SendMessageUseCase,
}

impl MessageGateway {
    pub fn new(repository: Arc<dyn ConnectionRepository>, broker: Arc<dyn TopicBroker>) -> Self {
        let mut routes: HashMap<&'static str, RouteHandler> = HashMap::new();
        routes.insert(ROUTE_ADD_USER, add_user);
        routes.insert(ROUTE_SEND_MESSAGE, send_message);

        Self {
            routes,
            join: JoinChatUseCase::new(repository.clone(), broker.clone()),
            send: SendMessageUseCase::new(repository, broker),
        }
    }

    /// Route names this gateway accepts, without prefix.
    pub fn routes(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.routes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Decode one text frame and dispatch it.
    ///
    /// Frames for the same session must be handed in one at a time; the
    /// returned future completes only after any resulting publish.
    pub async fn handle_frame(
        &self,
        session: &mut GatewaySession,
        frame: &str,
    ) -> Result<(), GatewayError> {
        if session.state == SessionState::Closed {
            tracing::debug!(
                "Ignoring frame for closed connection '{}'",
                session.connection_id
            );
            return Ok(());
        }

        let inbound: InboundFrame = serde_json::from_str(frame)
            .map_err(|e| GatewayError::MalformedMessage(e.to_string()))?;

        let route = normalize_route(&inbound.route);
        let handler = *self.routes.get(route).ok_or_else(|| {
            GatewayError::MalformedMessage(format!("unknown route '{}'", inbound.route))
        })?;

        handler(self, session, inbound.payload).await
    }
}

fn normalize_route(route: &str) -> &str {
    route.strip_prefix(APP_DESTINATION_PREFIX).unwrap_or(route)
}

fn add_user<'a>(
    gateway: &'a MessageGateway,
    session: &'a mut GatewaySession,
    payload: InboundPayload,
) -> BoxFuture<'a, Result<(), GatewayError>> {
    Box::pin(async move {
        if session.state != SessionState::Unidentified {
            return Err(GatewayError::ProtocolViolation(format!(
                "connection '{}' has already joined",
                session.connection_id
            )));
        }

        let name = DisplayName::new(payload.sender.unwrap_or_default())
            .map_err(|e| GatewayError::MalformedMessage(e.to_string()))?;

        gateway
            .join
            .execute(&session.connection_id, name.clone(), session.outbound.clone())
            .await?;
        session.state = SessionState::Identified;

        tracing::info!("'{}' joined as '{}'", session.connection_id, name);
        Ok(())
    })
}

fn send_message<'a>(
    gateway: &'a MessageGateway,
    session: &'a mut GatewaySession,
    payload: InboundPayload,
) -> BoxFuture<'a, Result<(), GatewayError>> {
    Box::pin(async move {
        if session.state != SessionState::Identified {
            return Err(GatewayError::ProtocolViolation(format!(
                "connection '{}' must join before chatting",
                session.connection_id
            )));
        }

        let content = MessageContent::new(payload.content.unwrap_or_default())
            .map_err(|e| GatewayError::MalformedMessage(e.to_string()))?;

        let event = gateway
            .send
            .execute(&session.connection_id, content)
            .await
            .map_err(|e| match e {
                SendMessageError::NotJoined(_) => GatewayError::ProtocolViolation(e.to_string()),
            })?;

        if let Some(claimed) = payload.sender
            && claimed != event.sender.as_str()
        {
            tracing::debug!(
                "Ignored claimed sender '{}' on '{}'; identity of record is '{}'",
                claimed,
                session.connection_id,
                event.sender
            );
        }
        Ok(())
    })
}
