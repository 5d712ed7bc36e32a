//! ユースケースのテスト用ヘルパー

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use mitsumori_shared::time::FixedClock;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    domain::{
        ConnectionId, DisplayName, MatrixSize, MessagePushError, MessagePusher, Notification,
        ParticipantId, PusherChannel, RoomId, SessionName, SessionRecord, SessionRepository,
        Timestamp,
    },
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemorySessionRegistry,
        repository::InMemorySessionRepository,
    },
};

use super::JoinSessionInput;

pub(crate) const NOW: i64 = 1_700_000_000_000;

pub(crate) struct Fixture {
    pub sessions: Arc<InMemorySessionRepository>,
    pub registry: Arc<InMemorySessionRegistry>,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<FixedClock>,
}

/// `R1`（3x4 マトリクス）のセッションが永続化済みの状態を作る
pub(crate) fn fixture() -> Fixture {
    let sessions = Arc::new(InMemorySessionRepository::with_sessions([SessionRecord {
        id: room_id("R1"),
        name: SessionName::new("Sprint planning".to_string()).unwrap(),
        matrix: MatrixSize::new(3, 4).unwrap(),
        created_at: Timestamp::new(NOW - 60_000),
    }]));
    let clock = Arc::new(FixedClock::new(NOW));
    let registry = Arc::new(InMemorySessionRegistry::new(
        sessions.clone() as Arc<dyn SessionRepository>,
        clock.clone(),
    ));
    Fixture {
        sessions,
        registry,
        pusher: Arc::new(WebSocketMessagePusher::new()),
        clock,
    }
}

impl Fixture {
    /// 接続を MessagePusher に登録し、受信側を返す
    pub async fn connect(&self, connection: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_connection(conn(connection), tx).await;
        rx
    }
}

pub(crate) fn room_id(value: &str) -> RoomId {
    RoomId::new(value.to_string()).unwrap()
}

pub(crate) fn pid(value: &str) -> ParticipantId {
    ParticipantId::new(value.to_string()).unwrap()
}

pub(crate) fn conn(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub(crate) fn join_input(room: &str, participant: &str, connection: &str) -> JoinSessionInput {
    JoinSessionInput {
        room_id: room_id(room),
        participant_id: pid(participant),
        display_name: DisplayName::new(format!("{participant} name")).unwrap(),
        connection_id: conn(connection),
    }
}

/// 受信済みのメッセージをすべて JSON として取り出す
pub(crate) fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<Value> {
    let mut messages = Vec::new();
    while let Ok(text) = rx.try_recv() {
        messages.push(serde_json::from_str(&text).unwrap());
    }
    messages
}

/// ルームへの配信を止められる MessagePusher
///
/// `stalled` の間は `publish_to_room` が完了しないため、
/// 配信待ちのユースケースを途中で破棄する状況を再現できる。
pub(crate) struct StallingPusher {
    inner: WebSocketMessagePusher,
    stalled: AtomicBool,
}

impl StallingPusher {
    pub fn stalled() -> Self {
        Self {
            inner: WebSocketMessagePusher::new(),
            stalled: AtomicBool::new(true),
        }
    }

    pub fn resume(&self) {
        self.stalled.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl MessagePusher for StallingPusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.inner.register_connection(connection_id, sender).await;
    }

    async fn subscribe(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        self.inner.subscribe(room_id, connection_id).await;
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        self.inner.unregister_connection(connection_id).await;
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        self.inner.push_to(connection_id, notification).await
    }

    async fn publish_to_room(
        &self,
        room_id: &RoomId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        if self.stalled.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        self.inner.publish_to_room(room_id, notification).await
    }
}
