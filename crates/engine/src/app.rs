//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::PlayerRepo;
use crate::use_cases;
use crate::use_cases::management::PlayerCrud;

/// Main application state.
///
/// Holds the player store and the use cases built on it.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository ports.
pub struct Repositories {
    pub player: Arc<dyn PlayerRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub management: use_cases::ManagementUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(player_repo: Arc<dyn PlayerRepo>) -> Self {
        let management =
            use_cases::ManagementUseCases::new(PlayerCrud::new(player_repo.clone()));

        Self {
            repositories: Repositories {
                player: player_repo,
            },
            use_cases: UseCases { management },
        }
    }
}
