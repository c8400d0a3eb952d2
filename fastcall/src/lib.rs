pub use fastcall_core::{ClientId, RoomId, SignalMessage};

pub mod model {
    pub use fastcall_core::model::*;
    pub use fastcall_core::utils::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use fastcall_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use fastcall_client::*;
}
