//! MessagePusher trait 定義（Broadcast Gateway）
//!
//! ルーム購読者全員への配信と、特定の接続だけへの配信を抽象化します。
//! WebSocket などの具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::MessagePushError,
    snapshot::RoomSnapshot,
    value_object::{ConnectionId, RoomId},
};

/// クライアントへの送信チャンネル（シリアライズ済みのメッセージを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 拒否・エラーの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionCode {
    SessionNotFound,
    NotJoined,
    AlreadyJoined,
    InvalidMessage,
    Internal,
}

/// クライアントへ送る通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// ルームの最新スナップショット
    RoomUpdated(RoomSnapshot),
    /// 要求の拒否（送信元の接続にだけ送る）
    Rejected { code: RejectionCode, message: String },
}

/// メッセージ送信の抽象化
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録（まだどのルームも購読していない状態）
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続をルームの購読者に追加
    async fn subscribe(&self, room_id: &RoomId, connection_id: &ConnectionId);

    /// 接続の登録と購読をすべて解除
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 特定の接続にだけ送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// ルームの購読者全員に送信
    ///
    /// 一部の接続への送信失敗は許容し、ログに残すだけ。
    async fn publish_to_room(
        &self,
        room_id: &RoomId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
