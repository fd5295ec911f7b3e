pub mod contribution;
pub mod crosstalk;
pub mod plex_mode;
pub mod tables;

pub use contribution::IsotopeContribution;
pub use crosstalk::CrosstalkMatrix;
pub use plex_mode::{FactorSource, PlexMode};
