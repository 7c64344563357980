//! # bingorun Core Library
//!
//! This crate contains the logic behind the `bingorun` launcher, which runs Go tools
//! pinned with [bingo](https://github.com/bwplotka/bingo) and (re)installs them when
//! their binary is missing.
//!
//! `bingo` keeps a `.bingo/` folder in the project with a `variables.env` manifest
//! (`TOOL_NAME="${GOBIN}/tool-vX.Y.Z"`) and a `Variables.mk` holding one install
//! recipe per tool. `bingorun` only reads those files.
//!
//! ## Modules Overview
//! - [`config`] – Run configuration, read once from the environment
//! - [`locate`] – Finding the bingo folder and its `variables.env`
//! - [`manifest`] – Resolving a tool key to its binary path
//! - [`installer`] – Running the `Variables.mk` recipe for missing tools
//! - [`util`] – Name normalization, file names and file checks
//! - [`error`] – The error type shared by all of the above


pub mod config;
pub mod error;
pub mod installer;
pub mod locate;
pub mod manifest;
pub mod util;

pub use config::*;
pub use error::*;
pub use installer::*;
pub use locate::*;
pub use manifest::*;
pub use util::*;
