#![allow(clippy::module_inception)]

pub mod fork;
pub mod process;
pub mod redirect;
pub mod signal;
pub mod wait;

pub use fork::fork_process;
pub use process::Process;
pub use redirect::Redirect;
pub use signal::ModeNotice;
pub use wait::{reap_finished, wait_foreground};
