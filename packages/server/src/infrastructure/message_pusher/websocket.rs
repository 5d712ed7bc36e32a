//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ルームの購読者管理（どの接続がどのルームを購読しているか）
//! - 通知を JSON にシリアライズして送信（push_to, publish_to_room）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel, RoomId},
    infrastructure::dto::conversion::notification_to_json,
};

#[derive(Default)]
struct Subscriptions {
    senders: HashMap<ConnectionId, PusherChannel>,
    rooms: HashMap<RoomId, HashSet<ConnectionId>>,
}

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new();
/// pusher.register_connection(connection_id.clone(), tx).await;
/// pusher.subscribe(&room_id, &connection_id).await;
/// pusher.publish_to_room(&room_id, &Notification::RoomUpdated(snapshot)).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    subscriptions: Mutex<Subscriptions>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// ルームの購読者数
    pub async fn subscriber_count(&self, room_id: &RoomId) -> usize {
        let subscriptions = self.subscriptions.lock().await;
        subscriptions.rooms.get(room_id).map_or(0, HashSet::len)
    }

    pub async fn connection_count(&self) -> usize {
        self.subscriptions.lock().await.senders.len()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut subscriptions = self.subscriptions.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        subscriptions.senders.insert(connection_id, sender);
    }

    async fn subscribe(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        let mut subscriptions = self.subscriptions.lock().await;
        subscriptions
            .rooms
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id.clone());
        tracing::debug!("Connection '{}' subscribed to room '{}'", connection_id, room_id);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut subscriptions = self.subscriptions.lock().await;
        subscriptions.senders.remove(connection_id);
        subscriptions.rooms.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = notification_to_json(notification)
            .map_err(|e| MessagePushError::Serialization(e.to_string()))?;
        let subscriptions = self.subscriptions.lock().await;

        let sender = subscriptions
            .senders
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.as_str().to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn publish_to_room(
        &self,
        room_id: &RoomId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = notification_to_json(notification)
            .map_err(|e| MessagePushError::Serialization(e.to_string()))?;
        let subscriptions = self.subscriptions.lock().await;

        let Some(members) = subscriptions.rooms.get(room_id) else {
            tracing::debug!("Room '{}' has no subscribers, skipping publish", room_id);
            return Ok(());
        };

        for connection_id in members {
            match subscriptions.senders.get(connection_id) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!(
                            "Failed to push message to connection '{}': {}",
                            connection_id,
                            e
                        );
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during publish, skipping",
                        connection_id
                    );
                }
            }
        }
        tracing::debug!(
            "Published message to {} subscriber(s) of room '{}'",
            members.len(),
            room_id
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RejectionCode, RoomSnapshot};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信
    // - publish_to_room: ルーム購読者全員への送信（他ルームには届かない）
    // - unregister_connection: 登録解除後は送信対象から外れる
    // ========================================

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn room(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn empty_update() -> Notification {
        Notification::RoomUpdated(RoomSnapshot {
            participants: vec![],
            round: None,
            revealed: false,
        })
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx).await;

        // when (操作):
        let result = pusher
            .push_to(
                &conn("c1"),
                &Notification::Rejected {
                    code: RejectionCode::NotJoined,
                    message: "join first".to_string(),
                },
            )
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx.recv().await.unwrap();
        assert!(received.contains("\"code\":\"not-joined\""));
    }

    #[tokio::test]
    async fn test_push_to_connection_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        let pusher = WebSocketMessagePusher::new();

        let result = pusher.push_to(&conn("ghost"), &empty_update()).await;

        assert_eq!(
            result,
            Err(MessagePushError::ConnectionNotFound("ghost".to_string()))
        );
    }

    #[tokio::test]
    async fn test_publish_to_room_reaches_only_subscribers() {
        // テスト項目: ルームの購読者にだけ配信され、他ルーム・未購読の接続には届かない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx3, mut rx3) = mpsc::unbounded_channel();
        let (tx4, mut rx4) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;
        pusher.register_connection(conn("c2"), tx2).await;
        pusher.register_connection(conn("c3"), tx3).await;
        pusher.register_connection(conn("c4"), tx4).await;
        pusher.subscribe(&room("R1"), &conn("c1")).await;
        pusher.subscribe(&room("R1"), &conn("c2")).await;
        pusher.subscribe(&room("R2"), &conn("c3")).await;

        // when (操作):
        let result = pusher.publish_to_room(&room("R1"), &empty_update()).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());
        assert!(rx3.try_recv().is_err());
        assert!(rx4.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_to_room_tolerates_closed_receiver() {
        // テスト項目: 受信側が閉じた接続があっても他の購読者には届く
        let pusher = WebSocketMessagePusher::new();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;
        pusher.register_connection(conn("c2"), tx2).await;
        pusher.subscribe(&room("R1"), &conn("c1")).await;
        pusher.subscribe(&room("R1"), &conn("c2")).await;
        drop(rx1);

        let result = pusher.publish_to_room(&room("R1"), &empty_update()).await;

        assert!(result.is_ok());
        assert!(rx2.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_publish_to_room_without_subscribers() {
        // テスト項目: 購読者がいないルームへの配信はエラーにならない
        let pusher = WebSocketMessagePusher::new();

        let result = pusher.publish_to_room(&room("R1"), &empty_update()).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unregister_connection_removes_subscriptions() {
        // テスト項目: 登録解除で接続と購読が消え、空になったルームの購読リストも消える
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        pusher.register_connection(conn("c1"), tx1).await;
        pusher.register_connection(conn("c2"), tx2).await;
        pusher.subscribe(&room("R1"), &conn("c1")).await;
        pusher.subscribe(&room("R1"), &conn("c2")).await;

        // when (操作):
        pusher.unregister_connection(&conn("c1")).await;

        // then (期待する結果):
        assert_eq!(pusher.subscriber_count(&room("R1")).await, 1);
        assert_eq!(pusher.connection_count().await, 1);

        pusher.unregister_connection(&conn("c2")).await;
        assert_eq!(pusher.subscriber_count(&room("R1")).await, 0);
        assert_eq!(pusher.connection_count().await, 0);
    }
}
