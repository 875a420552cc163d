// Adapters layer: one module per job-search API, shared HTTP helpers and report storage.

pub mod headhunter;
pub mod http;
pub mod storage;
pub mod superjob;

pub use headhunter::{HeadHunterAdapter, HeadHunterSettings};
pub use storage::LocalStorage;
pub use superjob::{SuperJobAdapter, SuperJobSettings};
