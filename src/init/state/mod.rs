pub mod builder;
pub mod server_state;

pub use builder::ServerStateBuilder;
pub use server_state::ServerState;
