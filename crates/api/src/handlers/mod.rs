pub mod meta;
pub mod sets;
pub mod tracks;
