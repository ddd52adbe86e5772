pub mod listing;

pub use listing::{ListingError, ListingPatch, ListingService, Location, NewListing};
