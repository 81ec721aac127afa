//! Opcode handlers, grouped by mnemonic family. Every handler shares the signature
//! `fn(&mut Cpu, &mut dyn BusInterface, Operand, Operand)`; operand decoding happens once, at
//! dispatch-table build time, not inside the handler.

pub mod arithmetic;
pub mod bits;
pub mod flow;
pub mod load;
pub mod misc;
