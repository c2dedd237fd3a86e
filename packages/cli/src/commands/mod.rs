pub mod edit;
pub mod init;
pub mod reset;
pub mod show;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use reset::{reset, ResetArgs};
pub use show::{show, ShowArgs};
