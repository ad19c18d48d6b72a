mod ids;
mod image;
mod playlist;
mod track;
mod user;

pub use ids::{PlaylistId, TrackId};
pub use image::Image;
pub use playlist::{Playlist, PlaylistSummary};
pub use track::Track;
pub use user::UserProfile;
