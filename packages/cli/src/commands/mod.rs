mod blocks;
mod export;
mod init;

pub use blocks::{blocks, BlocksArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
