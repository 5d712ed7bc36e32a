//! スナップショット配信の共通処理

use crate::domain::{ConnectionId, MessagePusher, Notification, VotingRoom};

/// ルームの最新スナップショットを購読者全員に配信
///
/// ルームのロックを保持したまま呼ぶこと（配信順序が変更順序と一致する）。
/// 配信の失敗はログに残すだけで、ルームの状態には影響しない。
pub(super) async fn publish_room_update(pusher: &dyn MessagePusher, room: &VotingRoom) {
    let notification = Notification::RoomUpdated(room.render());
    if let Err(e) = pusher.publish_to_room(&room.id, &notification).await {
        tracing::warn!("Failed to publish update for room '{}': {}", room.id, e);
    }
}

/// ルームの最新スナップショットを 1 つの接続にだけ送信
pub(super) async fn push_room_snapshot(
    pusher: &dyn MessagePusher,
    room: &VotingRoom,
    connection_id: &ConnectionId,
) {
    let notification = Notification::RoomUpdated(room.render());
    if let Err(e) = pusher.push_to(connection_id, &notification).await {
        tracing::warn!(
            "Failed to push snapshot of room '{}' to connection '{}': {}",
            room.id,
            connection_id,
            e
        );
    }
}
