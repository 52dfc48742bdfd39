//! # nael-channels
//!
//! Host adapters: where chat lines come from and where hints go.

pub mod console;
pub mod lines;
pub mod replay;
pub mod stdin;

pub use console::ConsolePresenter;
pub use replay::ReplaySource;
pub use stdin::StdinSource;
