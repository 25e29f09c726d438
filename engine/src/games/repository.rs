use async_trait::async_trait;
use shared::{Game, Result};

/// Read-only access to validated game configuration.
///
/// Game creation and weight updates are owned by the admin layer; the
/// engine only ever looks games up.
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Gets a game by document ID; `NotFound` on miss.
    async fn get_game(&self, game_id: &str) -> Result<Game>;

    /// Gets a game by its dispatch slug; `NotFound` on miss.
    async fn get_game_by_slug(&self, slug: &str) -> Result<Game>;
}
