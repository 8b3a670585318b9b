pub mod ladder;
pub mod recorder;
pub mod removal;
pub mod retractor;
pub mod server;

pub use ladder::LadderService;
pub use recorder::MatchRecorder;
pub use removal::{PlayerRemoval, PlayerRemover};
pub use retractor::{recompute_player, MatchRetractor, RetractedMatch};
pub use server::ServerService;
