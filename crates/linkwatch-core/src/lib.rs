#![cfg_attr(not(test), no_std)]

pub mod annunciator;
pub mod consts;
pub mod engine;
pub mod gfx;
pub mod input;
pub mod melody;
pub mod state;
pub mod tone;

#[cfg(test)]
mod testing;
