mod builder;
mod component;
mod config;
mod drag;
mod layout;
mod records;
mod render;
mod search;
mod state;
mod types;
mod viewport;

pub use component::QuadroBoard;
pub use records::RecordStore;
