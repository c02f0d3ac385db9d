//! Metadata providers
//!
//! Async provider contracts consumed by the orchestrator, plus the HTTP
//! clients that implement them.

pub mod domain;
pub mod dto;
pub mod errors;
pub mod getsongbpm;
pub mod musicbrainz;
pub mod throttle;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_server;

pub use domain::{ArtistGenres, ArtistMatch, TrackBpm};
pub use errors::ProviderError;
pub use getsongbpm::GetSongBpmClient;
pub use musicbrainz::MusicBrainzClient;
pub use traits::{BpmProvider, GenreProvider};

#[cfg(test)]
pub use traits::mocks;
