//! JP/JR/CALL/RET/RST and the condition checks they share.

use crate::bus::BusInterface;
use crate::cpu::Cpu;
use crate::operand::{Condition, Operand};

fn check(cpu: &Cpu, condition: Condition) -> bool {
    let f = cpu.registers.f;
    match condition {
        Condition::Zero => f.zero,
        Condition::NotZero => !f.zero,
        Condition::Carry => f.carry,
        Condition::NoCarry => !f.carry,
    }
}

fn condition_of(op: Operand) -> Condition {
    match op {
        Operand::Condition(cc) => cc,
        _ => unreachable!("conditional branch dispatch entries always carry Operand::Condition"),
    }
}

pub(crate) fn jp_u16(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    cpu.registers.pc = cpu.fetch_operand_u16(bus);
    bus.timer(1);
}

pub(crate) fn jp_hl(cpu: &mut Cpu, _bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    // No indirection despite the mnemonic: PC takes HL's value directly.
    cpu.registers.pc = cpu.registers.hl();
}

pub(crate) fn jp_cc_u16(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let address = cpu.fetch_operand_u16(bus);
    if check(cpu, condition_of(op1)) {
        cpu.registers.pc = address;
        bus.timer(1);
    }
}

pub(crate) fn jr_i8(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    let offset = cpu.fetch_operand(bus) as i8;
    cpu.registers.pc = cpu.registers.pc.wrapping_add(offset as u16);
    bus.timer(1);
}

pub(crate) fn jr_cc_i8(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let offset = cpu.fetch_operand(bus) as i8;
    if check(cpu, condition_of(op1)) {
        cpu.registers.pc = cpu.registers.pc.wrapping_add(offset as u16);
        bus.timer(1);
    }
}

pub(crate) fn call_u16(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    let address = cpu.fetch_operand_u16(bus);
    bus.timer(1);
    cpu.push_stack_u16(bus, cpu.registers.pc);
    cpu.registers.pc = address;
}

pub(crate) fn call_cc_u16(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let address = cpu.fetch_operand_u16(bus);
    if !check(cpu, condition_of(op1)) {
        return;
    }
    bus.timer(1);
    cpu.push_stack_u16(bus, cpu.registers.pc);
    cpu.registers.pc = address;
}

pub(crate) fn ret(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    cpu.registers.pc = cpu.pop_stack_u16(bus);
    bus.timer(1);
}

pub(crate) fn ret_cc(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    bus.timer(1);
    if !check(cpu, condition_of(op1)) {
        return;
    }
    cpu.registers.pc = cpu.pop_stack_u16(bus);
    bus.timer(1);
}

pub(crate) fn reti(cpu: &mut Cpu, bus: &mut dyn BusInterface, _op1: Operand, _op2: Operand) {
    cpu.registers.pc = cpu.pop_stack_u16(bus);
    cpu.registers.ime = true;
    bus.timer(1);
}

pub(crate) fn rst(cpu: &mut Cpu, bus: &mut dyn BusInterface, op1: Operand, _op2: Operand) {
    let target = match op1 {
        Operand::Rst(addr) => addr,
        _ => unreachable!("RST dispatch entries always carry Operand::Rst"),
    };
    bus.timer(1);
    cpu.push_stack_u16(bus, cpu.registers.pc);
    cpu.registers.pc = target;
}
