pub mod access;
pub mod fuel;
pub mod notification;
pub mod power;
pub mod status;
pub mod sync;
pub mod timer;
pub mod webhook;
