pub mod artist;
pub mod filter;
pub mod ids;
pub mod release;
pub mod release_status;

pub use artist::{Artist, ArtistSummary, NewArtist};
pub use filter::{ArtistFilter, ReleaseFilter};
pub use ids::{ArtistId, ReleaseId};
pub use release::{NewRelease, Release, ReleaseSummary};
pub use release_status::ReleaseStatus;
