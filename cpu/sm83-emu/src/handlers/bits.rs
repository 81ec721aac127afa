//! RLCA/RLA/RRCA/RRA, the CB-prefixed rotate/shift family, SWAP, and BIT/RES/SET.

use crate::bus::BusInterface;
use crate::cpu::Cpu;
use crate::operand::Operand;
use crate::registers::Flags;
use jgenesis_common::num::GetBit;

macro_rules! impl_accumulator_rotate {
    ($name:ident, left: $left:expr, thru_carry: $thru_carry:expr) => {
        pub(crate) fn $name(cpu: &mut Cpu, _bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
            let a = cpu.registers.a;
            let carry_out = if $left { a.bit(7) } else { a.bit(0) };
            cpu.registers.a = if $left {
                if $thru_carry {
                    (a << 1) | u8::from(cpu.registers.f.carry)
                } else {
                    a.rotate_left(1)
                }
            } else if $thru_carry {
                (a >> 1) | (u8::from(cpu.registers.f.carry) << 7)
            } else {
                a.rotate_right(1)
            };
            // The accumulator-fast forms always clear Z, unlike their CB-prefixed counterparts.
            cpu.registers.f =
                Flags { zero: false, subtract: false, half_carry: false, carry: carry_out };
        }
    };
}

impl_accumulator_rotate!(rlca, left: true, thru_carry: false);
impl_accumulator_rotate!(rrca, left: false, thru_carry: false);
impl_accumulator_rotate!(rla, left: true, thru_carry: true);
impl_accumulator_rotate!(rra, left: false, thru_carry: true);

fn flags_for_shift(result: u8, carry_out: bool) -> Flags {
    Flags { zero: result == 0, subtract: false, half_carry: false, carry: carry_out }
}

pub(crate) fn rlc(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = value.rotate_left(1);
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = flags_for_shift(result, value.bit(7));
}

pub(crate) fn rrc(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = value.rotate_right(1);
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = flags_for_shift(result, value.bit(0));
}

pub(crate) fn rl(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = (value << 1) | u8::from(cpu.registers.f.carry);
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = flags_for_shift(result, value.bit(7));
}

pub(crate) fn rr(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = (value >> 1) | (u8::from(cpu.registers.f.carry) << 7);
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = flags_for_shift(result, value.bit(0));
}

pub(crate) fn sla(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = value << 1;
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = flags_for_shift(result, value.bit(7));
}

/// Arithmetic shift right: bit 7 is preserved rather than cleared.
pub(crate) fn sra(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = (value >> 1) | (value & 0x80);
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = flags_for_shift(result, value.bit(0));
}

pub(crate) fn srl(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = value >> 1;
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = flags_for_shift(result, value.bit(0));
}

pub(crate) fn swap(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let value = cpu.read_operand8(bus, op1);
    let result = (value >> 4) | (value << 4);
    cpu.write_operand8(bus, op1, result);
    cpu.registers.f = Flags { zero: value == 0, subtract: false, half_carry: false, carry: false };
}

fn bit_index(op: Operand) -> u8 {
    match op {
        Operand::Bit(n) => n,
        _ => unreachable!("BIT/RES/SET dispatch entries always carry Operand::Bit"),
    }
}

pub(crate) fn bit(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, op2: Operand) {
    let value = cpu.read_operand8(bus, op2);
    cpu.registers.f.zero = !value.bit(bit_index(op1));
    cpu.registers.f.subtract = false;
    cpu.registers.f.half_carry = true;
}

pub(crate) fn set(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, op2: Operand) {
    let value = cpu.read_operand8(bus, op2);
    cpu.write_operand8(bus, op2, value | (1 << bit_index(op1)));
}

pub(crate) fn res(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, op2: Operand) {
    let value = cpu.read_operand8(bus, op2);
    cpu.write_operand8(bus, op2, value & !(1 << bit_index(op1)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::InMemoryBus;
    use crate::operand::Reg8;

    #[test]
    fn swap_is_involutive_and_clears_cnh() {
        let mut cpu = Cpu::new();
        cpu.registers.f.carry = true;
        let mut bus = InMemoryBus::new();
        cpu.write_operand8(&mut bus, Operand::Reg(Reg8::A), 0x4F);

        swap(&mut cpu, &mut bus, Operand::Reg(Reg8::A), Operand::None);
        assert_eq!(cpu.read_operand8(&mut bus, Operand::Reg(Reg8::A)), 0xF4);
        assert!(!cpu.registers.f.carry && !cpu.registers.f.half_carry && !cpu.registers.f.subtract);

        swap(&mut cpu, &mut bus, Operand::Reg(Reg8::A), Operand::None);
        assert_eq!(cpu.read_operand8(&mut bus, Operand::Reg(Reg8::A)), 0x4F);
    }

    #[test]
    fn rlca_clears_zero_even_when_result_is_zero() {
        let mut cpu = Cpu::new();
        cpu.registers.a = 0x00;
        let mut bus = InMemoryBus::new();
        rlca(&mut cpu, &mut bus, Operand::None, Operand::None);
        assert!(!cpu.registers.f.zero, "accumulator-fast rotate forms always clear Z");
    }

    #[test]
    fn rlc_cb_form_sets_zero_from_result() {
        let mut cpu = Cpu::new();
        let mut bus = InMemoryBus::new();
        cpu.write_operand8(&mut bus, Operand::Reg(Reg8::B), 0x00);
        rlc(&mut cpu, &mut bus, Operand::Reg(Reg8::B), Operand::None);
        assert!(cpu.registers.f.zero);
    }

    #[test]
    fn bit_reflects_inverse_of_tested_bit() {
        let mut cpu = Cpu::new();
        let mut bus = InMemoryBus::new();
        cpu.write_operand8(&mut bus, Operand::Reg(Reg8::B), 0b0000_0010);
        bit(&mut cpu, &mut bus, Operand::Bit(1), Operand::Reg(Reg8::B));
        assert!(!cpu.registers.f.zero);
        assert!(cpu.registers.f.half_carry);
        assert!(!cpu.registers.f.subtract);

        bit(&mut cpu, &mut bus, Operand::Bit(0), Operand::Reg(Reg8::B));
        assert!(cpu.registers.f.zero);
    }

    #[test]
    fn set_and_res_round_trip() {
        let mut cpu = Cpu::new();
        let mut bus = InMemoryBus::new();
        cpu.write_operand8(&mut bus, Operand::Reg(Reg8::C), 0x00);
        set(&mut cpu, &mut bus, Operand::Bit(3), Operand::Reg(Reg8::C));
        assert_eq!(cpu.read_operand8(&mut bus, Operand::Reg(Reg8::C)), 0x08);
        res(&mut cpu, &mut bus, Operand::Bit(3), Operand::Reg(Reg8::C));
        assert_eq!(cpu.read_operand8(&mut bus, Operand::Reg(Reg8::C)), 0x00);
    }

    #[test]
    fn swap_is_involutive_for_random_values() {
        for _ in 0..1000 {
            let value: u8 = rand::random();
            let mut cpu = Cpu::new();
            let mut bus = InMemoryBus::new();
            cpu.write_operand8(&mut bus, Operand::Reg(Reg8::D), value);

            swap(&mut cpu, &mut bus, Operand::Reg(Reg8::D), Operand::None);
            swap(&mut cpu, &mut bus, Operand::Reg(Reg8::D), Operand::None);

            assert_eq!(cpu.read_operand8(&mut bus, Operand::Reg(Reg8::D)), value);
        }
    }
}
