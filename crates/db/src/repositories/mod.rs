//! One repository per aggregate. Repositories return `Ok(None)` / `Ok(false)`
//! for missing rows and leave the NotFound mapping to callers.

mod set_repo;
mod track_repo;

pub use set_repo::SetRepo;
pub use track_repo::TrackRepo;
