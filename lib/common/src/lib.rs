pub mod prelude;

pub use prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysMessage {
    Reload,
    Shutdown,
}
