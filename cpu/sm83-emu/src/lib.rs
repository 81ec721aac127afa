//! Sharp SM83 (LR35902) CPU core: the Game Boy / Game Boy Color CPU.
//!
//! This crate owns architectural register/flag state, instruction decode and dispatch, the
//! interrupt/HALT/STOP state machine, and the GBC speed switch. It does not own memory mapping,
//! PPU/APU/timer/DMA emulation, or any front-end concern; those live behind [`BusInterface`],
//! which the host emulator implements.

mod bus;
mod cpu;
mod dispatch;
mod handlers;
mod ime;
mod interrupts;
mod operand;
mod registers;
mod speed;

pub use bus::BusInterface;
pub use cpu::Cpu;
pub use interrupts::{IE_ADDRESS, IF_ADDRESS, KEY1_ADDRESS};
pub use registers::{Flags, Registers};
pub use speed::SpeedState;
