// Profile JSON import/export. Profiles are not stored here; the client keeps them.

pub mod handlers;
pub mod import;
