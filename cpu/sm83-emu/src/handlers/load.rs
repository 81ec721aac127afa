//! 8- and 16-bit loads, PUSH/POP, and the HL/SP exchange forms.
//!
//! `LD r,r'` / `LD r,(HL)` / `LD (HL),r` / `LD A,(BC)` / `LDH` / the HLI/HLD variants are all
//! the same operation once operand decoding happens at dispatch-table build time: read an 8-bit
//! value from `src`, write it to `dst`. One handler (`ld8`) covers every one of those opcodes.

use crate::bus::BusInterface;
use crate::cpu::Cpu;
use crate::handlers::arithmetic::add_sp_offset;
use crate::operand::{Operand, Reg16};
use crate::registers::Flags;

pub(crate) fn ld8(cpu: &mut Cpu, bus: &mut dyn BusInterface, dst: Operand, src: Operand) {
    let value = cpu.read_operand8(bus, src);
    cpu.write_operand8(bus, dst, value);
}

fn reg16(op: Operand) -> Reg16 {
    match op {
        Operand::Reg16(rr) => rr,
        _ => unreachable!("16-bit load/PUSH/POP dispatch entries always carry Reg16"),
    }
}

pub(crate) fn ld_rr_d16(cpu: &mut Cpu, bus: &mut dyn BusInterface, dst: Operand, _op2: Operand) {
    let value = cpu.fetch_operand_u16(bus);
    cpu.write_reg16(reg16(dst), value);
}

/// `LD (a16),SP`: writes SP's low byte to `a16` and its high byte to `a16+1`.
pub(crate) fn ld_indirect_sp(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    let address = cpu.fetch_operand_u16(bus);
    let [lsb, msb] = cpu.registers.sp.to_le_bytes();
    cpu.write_memory(bus, address, lsb);
    cpu.write_memory(bus, address.wrapping_add(1), msb);
}

pub(crate) fn ld_sp_hl(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    cpu.registers.sp = cpu.registers.hl();
    bus.timer(1);
}

/// `LD HL,SP+i8`: same displacement arithmetic as `ADD SP,i8`, but the result lands in HL and
/// there's no second idle cycle (3 M-cycles total: opcode, operand, one idle).
pub(crate) fn ld_hl_sp_i8(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    let offset = cpu.fetch_operand(bus) as i8;
    let (sum, flags) = add_sp_offset(cpu.registers.sp, offset);
    cpu.registers.set_hl(sum);
    cpu.registers.f = flags;
    bus.timer(1);
}

pub(crate) fn push(cpu: &mut Cpu, bus: &mut dyn BusInterface, src: Operand, _op2: Operand) {
    bus.timer(1);
    let value = cpu.read_reg16(reg16(src));
    cpu.push_stack_u16(bus, value);
}

pub(crate) fn pop(cpu: &mut Cpu, bus: &mut dyn BusInterface, dst: Operand, _op2: Operand) {
    let value = cpu.pop_stack_u16(bus);
    cpu.write_reg16(reg16(dst), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::InMemoryBus;
    use crate::operand::Reg8;

    #[test]
    fn ld8_moves_register_to_register() {
        let mut cpu = Cpu::new();
        cpu.registers.b = 0x42;
        let mut bus = InMemoryBus::new();
        ld8(&mut cpu, &mut bus, Operand::Reg(Reg8::C), Operand::Reg(Reg8::B));
        assert_eq!(cpu.registers.c, 0x42);
    }

    #[test]
    fn ld8_hli_increments_hl_after_read() {
        let mut cpu = Cpu::new();
        cpu.registers.set_hl(0xC000);
        let mut bus = InMemoryBus::new();
        bus.memory[0xC000] = 0x99;
        ld8(&mut cpu, &mut bus, Operand::Reg(Reg8::A), Operand::IndirectHlInc);
        assert_eq!(cpu.registers.a, 0x99);
        assert_eq!(cpu.registers.hl(), 0xC001);
    }

    #[test]
    fn push_pop_bc_round_trips_and_leaves_flags_untouched() {
        let mut cpu = Cpu::new();
        cpu.registers.set_bc(0xBEEF);
        cpu.registers.f = Flags { zero: true, subtract: false, half_carry: true, carry: false };
        let mut bus = InMemoryBus::new();

        push(&mut cpu, &mut bus, Operand::Reg16(Reg16::BC), Operand::None);
        cpu.registers.set_bc(0x0000);
        pop(&mut cpu, &mut bus, Operand::Reg16(Reg16::BC), Operand::None);

        assert_eq!(cpu.registers.bc(), 0xBEEF);
        assert!(cpu.registers.f.zero && cpu.registers.f.half_carry);
    }

    #[test]
    fn push_pop_af_masks_low_nibble_on_the_way_back_in() {
        let mut cpu = Cpu::new();
        cpu.registers.a = 0x12;
        cpu.registers.set_af(0x12FF);
        let mut bus = InMemoryBus::new();

        push(&mut cpu, &mut bus, Operand::Reg16(Reg16::AF), Operand::None);
        cpu.registers.set_af(0x0000);
        pop(&mut cpu, &mut bus, Operand::Reg16(Reg16::AF), Operand::None);

        assert_eq!(cpu.registers.a, 0x12);
        assert_eq!(u8::from(cpu.registers.f), 0xF0);
    }

    #[test]
    fn ld_indirect_sp_then_reload_restores_sp() {
        let mut cpu = Cpu::new();
        cpu.registers.sp = 0xFFFE;
        let mut bus = InMemoryBus::new();
        // Instruction operand (the target address) is the two bytes at PC: 0xC000 little-endian.
        bus.memory[cpu.registers.pc as usize] = 0x00;
        bus.memory[cpu.registers.pc as usize + 1] = 0xC0;
        ld_indirect_sp(&mut cpu, &mut bus, Operand::None, Operand::None);

        cpu.registers.sp = 0;
        let lsb = cpu.read_memory(&mut bus, 0xC000);
        let msb = cpu.read_memory(&mut bus, 0xC001);
        cpu.registers.sp = u16::from_le_bytes([lsb, msb]);
        assert_eq!(cpu.registers.sp, 0xFFFE);
    }
}
