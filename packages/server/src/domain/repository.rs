//! Repository / Registry trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    entity::SessionRecord,
    error::{RegistryError, RepositoryError},
    room::VotingRoom,
    value_object::RoomId,
};

/// ルームごとのロックで保護された VotingRoom
///
/// ルームに対する変更はすべてこのロックの内側で行う。
pub type SharedRoom = Arc<Mutex<VotingRoom>>;

/// 永続化されたセッションへのアクセス
///
/// ルームはここにレコードが存在する場合にのみ作成される。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 公開 ID でセッションを検索
    async fn find_session(&self, room_id: &RoomId) -> Result<Option<SessionRecord>, RepositoryError>;

    /// セッションを保存
    async fn save_session(&self, record: SessionRecord) -> Result<(), RepositoryError>;
}

/// プロセス内のライブルーム一覧
///
/// VotingRoom を生成してよいのはこの実装だけ。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// ルームを取得、なければ永続化セッションを確認して作成
    ///
    /// 同じ ID に対する初回の並行呼び出しでも、生成される VotingRoom は 1 つだけ。
    async fn get_or_create_room(&self, room_id: &RoomId) -> Result<SharedRoom, RegistryError>;

    /// 作成せずに取得
    async fn get_room(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// ライブルーム数
    async fn room_count(&self) -> usize;
}
