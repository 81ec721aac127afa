//! The two 256-entry opcode tables. Each entry pairs a handler function pointer with the
//! (already-decoded) operand pair the handler needs; decoding the opcode's register/condition/
//! bit-index fields happens once here, at table-build time, rather than inside every handler.

use crate::bus::BusInterface;
use crate::cpu::Cpu;
use crate::handlers::{arithmetic, bits, flow, load, misc};
use crate::operand::{self, Operand, Reg16, Reg8};
use std::sync::OnceLock;

pub(crate) type Handler = fn(&mut Cpu, &mut dyn BusInterface, Operand, Operand);

#[derive(Clone, Copy)]
pub(crate) struct OpEntry {
    pub(crate) handler: Handler,
    pub(crate) op1: Operand,
    pub(crate) op2: Operand,
}

impl OpEntry {
    const fn new(handler: Handler, op1: Operand, op2: Operand) -> Self {
        Self { handler, op1, op2 }
    }

    const fn unary(handler: Handler, op1: Operand) -> Self {
        Self::new(handler, op1, Operand::None)
    }

    const fn nullary(handler: Handler) -> Self {
        Self::new(handler, Operand::None, Operand::None)
    }
}

const ILLEGAL: OpEntry = OpEntry::nullary(misc::nop);

pub(crate) fn primary_table() -> &'static [OpEntry; 256] {
    static TABLE: OnceLock<[OpEntry; 256]> = OnceLock::new();
    TABLE.get_or_init(build_primary_table)
}

pub(crate) fn cb_table() -> &'static [OpEntry; 256] {
    static TABLE: OnceLock<[OpEntry; 256]> = OnceLock::new();
    TABLE.get_or_init(build_cb_table)
}

fn build_primary_table() -> [OpEntry; 256] {
    let mut table = [ILLEGAL; 256];

    populate_loads_8bit(&mut table);
    populate_loads_16bit(&mut table);
    populate_arithmetic_8bit(&mut table);
    populate_arithmetic_16bit(&mut table);
    populate_rotates_a(&mut table);
    populate_control_flow(&mut table);
    populate_misc(&mut table);

    table
}

fn populate_loads_8bit(table: &mut [OpEntry; 256]) {
    // LD r, r' / LD r, (HL) / LD (HL), r, every combination except 0x76 (HALT).
    for opcode in 0x40..=0x7Fu8 {
        if opcode == 0x76 {
            continue;
        }
        let dst = operand::r8_field(opcode >> 3);
        let src = operand::r8_field(opcode);
        table[opcode as usize] = OpEntry::new(load::ld8, dst, src);
    }

    // LD r, d8 / LD (HL), d8 at 0x06, 0x0E, 0x16, 0x1E, 0x26, 0x2E, 0x36, 0x3E.
    for field in 0..8u8 {
        let opcode = (field << 3) | 0x06;
        let dst = operand::r8_field(field);
        table[opcode as usize] = OpEntry::new(load::ld8, dst, Operand::Imm8);
    }

    table[0x02] = OpEntry::new(load::ld8, Operand::IndirectBc, Operand::Reg(Reg8::A));
    table[0x12] = OpEntry::new(load::ld8, Operand::IndirectDe, Operand::Reg(Reg8::A));
    table[0x0A] = OpEntry::new(load::ld8, Operand::Reg(Reg8::A), Operand::IndirectBc);
    table[0x1A] = OpEntry::new(load::ld8, Operand::Reg(Reg8::A), Operand::IndirectDe);
    table[0x22] = OpEntry::new(load::ld8, Operand::IndirectHlInc, Operand::Reg(Reg8::A));
    table[0x2A] = OpEntry::new(load::ld8, Operand::Reg(Reg8::A), Operand::IndirectHlInc);
    table[0x32] = OpEntry::new(load::ld8, Operand::IndirectHlDec, Operand::Reg(Reg8::A));
    table[0x3A] = OpEntry::new(load::ld8, Operand::Reg(Reg8::A), Operand::IndirectHlDec);

    table[0xE0] = OpEntry::new(load::ld8, Operand::IndirectA8, Operand::Reg(Reg8::A));
    table[0xF0] = OpEntry::new(load::ld8, Operand::Reg(Reg8::A), Operand::IndirectA8);
    table[0xE2] = OpEntry::new(load::ld8, Operand::IndirectC, Operand::Reg(Reg8::A));
    table[0xF2] = OpEntry::new(load::ld8, Operand::Reg(Reg8::A), Operand::IndirectC);
    table[0xEA] = OpEntry::new(load::ld8, Operand::IndirectA16, Operand::Reg(Reg8::A));
    table[0xFA] = OpEntry::new(load::ld8, Operand::Reg(Reg8::A), Operand::IndirectA16);
}

fn populate_loads_16bit(table: &mut [OpEntry; 256]) {
    for field in 0..4u8 {
        let opcode = (field << 4) | 0x01;
        table[opcode as usize] =
            OpEntry::unary(load::ld_rr_d16, Operand::Reg16(operand::rr_field_sp(field)));
    }

    for field in 0..4u8 {
        let opcode = (field << 4) | 0xC1;
        table[opcode as usize] =
            OpEntry::unary(load::pop, Operand::Reg16(operand::rr_field_af(field)));
        table[(opcode | 0x04) as usize] =
            OpEntry::unary(load::push, Operand::Reg16(operand::rr_field_af(field)));
    }

    table[0x08] = OpEntry::nullary(load::ld_indirect_sp);
    table[0xF8] = OpEntry::nullary(load::ld_hl_sp_i8);
    table[0xF9] = OpEntry::nullary(load::ld_sp_hl);
}

fn populate_arithmetic_8bit(table: &mut [OpEntry; 256]) {
    const FAMILIES: [(u8, Handler); 8] = [
        (0x80, arithmetic::add_a),
        (0x88, arithmetic::adc_a),
        (0x90, arithmetic::sub_a),
        (0x98, arithmetic::sbc_a),
        (0xA0, arithmetic::and_a),
        (0xA8, arithmetic::xor_a),
        (0xB0, arithmetic::or_a),
        (0xB8, arithmetic::cp_a),
    ];
    for (base, handler) in FAMILIES {
        for field in 0..8u8 {
            table[(base + field) as usize] = OpEntry::unary(handler, operand::r8_field(field));
        }
    }

    table[0xC6] = OpEntry::unary(arithmetic::add_a, Operand::Imm8);
    table[0xCE] = OpEntry::unary(arithmetic::adc_a, Operand::Imm8);
    table[0xD6] = OpEntry::unary(arithmetic::sub_a, Operand::Imm8);
    table[0xDE] = OpEntry::unary(arithmetic::sbc_a, Operand::Imm8);
    table[0xE6] = OpEntry::unary(arithmetic::and_a, Operand::Imm8);
    table[0xEE] = OpEntry::unary(arithmetic::xor_a, Operand::Imm8);
    table[0xF6] = OpEntry::unary(arithmetic::or_a, Operand::Imm8);
    table[0xFE] = OpEntry::unary(arithmetic::cp_a, Operand::Imm8);

    // INC r / DEC r / INC (HL) / DEC (HL), keyed by the destination register field in bits 3-5.
    for field in 0..8u8 {
        table[((field << 3) | 0x04) as usize] =
            OpEntry::unary(arithmetic::inc8, operand::r8_field(field));
        table[((field << 3) | 0x05) as usize] =
            OpEntry::unary(arithmetic::dec8, operand::r8_field(field));
    }

    table[0x27] = OpEntry::nullary(arithmetic::daa);
    table[0x2F] = OpEntry::nullary(arithmetic::cpl);
    table[0x37] = OpEntry::nullary(arithmetic::scf);
    table[0x3F] = OpEntry::nullary(arithmetic::ccf);
}

fn populate_arithmetic_16bit(table: &mut [OpEntry; 256]) {
    for field in 0..4u8 {
        let rr = Operand::Reg16(operand::rr_field_sp(field));
        table[((field << 4) | 0x03) as usize] = OpEntry::unary(arithmetic::inc16, rr);
        table[((field << 4) | 0x0B) as usize] = OpEntry::unary(arithmetic::dec16, rr);
        table[((field << 4) | 0x09) as usize] = OpEntry::unary(arithmetic::add_hl_r16, rr);
    }

    table[0xE8] = OpEntry::nullary(arithmetic::add_sp_i8);
}

fn populate_rotates_a(table: &mut [OpEntry; 256]) {
    table[0x07] = OpEntry::nullary(bits::rlca);
    table[0x0F] = OpEntry::nullary(bits::rrca);
    table[0x17] = OpEntry::nullary(bits::rla);
    table[0x1F] = OpEntry::nullary(bits::rra);
}

fn populate_control_flow(table: &mut [OpEntry; 256]) {
    table[0x18] = OpEntry::nullary(flow::jr_i8);
    for field in 0..4u8 {
        let cc = Operand::Condition(operand::condition_field(field));
        table[((field << 3) | 0x20) as usize] = OpEntry::unary(flow::jr_cc_i8, cc);
        table[((field << 3) | 0xC2) as usize] = OpEntry::unary(flow::jp_cc_u16, cc);
        table[((field << 3) | 0xC4) as usize] = OpEntry::unary(flow::call_cc_u16, cc);
        table[((field << 3) | 0xC0) as usize] = OpEntry::unary(flow::ret_cc, cc);
    }

    table[0xC3] = OpEntry::nullary(flow::jp_u16);
    table[0xE9] = OpEntry::nullary(flow::jp_hl);
    table[0xCD] = OpEntry::nullary(flow::call_u16);
    table[0xC9] = OpEntry::nullary(flow::ret);
    table[0xD9] = OpEntry::nullary(flow::reti);

    for field in 0..8u8 {
        let opcode = (field << 3) | 0xC7;
        table[opcode as usize] = OpEntry::unary(flow::rst, Operand::Rst((opcode & 0x38).into()));
    }
}

fn populate_misc(table: &mut [OpEntry; 256]) {
    table[0x00] = OpEntry::nullary(misc::nop);
    table[0x10] = OpEntry::nullary(misc::stop);
    table[0x76] = OpEntry::nullary(misc::halt);
    table[0xF3] = OpEntry::nullary(misc::di);
    table[0xFB] = OpEntry::nullary(misc::ei);
    table[0xCB] = OpEntry::nullary(misc::prefix_cb);
}

fn build_cb_table() -> [OpEntry; 256] {
    let mut table = [ILLEGAL; 256];

    const SHIFT_FAMILIES: [(u8, Handler); 8] = [
        (0x00, bits::rlc),
        (0x08, bits::rrc),
        (0x10, bits::rl),
        (0x18, bits::rr),
        (0x20, bits::sla),
        (0x28, bits::sra),
        (0x30, bits::swap),
        (0x38, bits::srl),
    ];
    for (base, handler) in SHIFT_FAMILIES {
        for field in 0..8u8 {
            table[(base + field) as usize] = OpEntry::unary(handler, operand::r8_field(field));
        }
    }

    const BIT_FAMILIES: [(u8, Handler); 3] = [(0x40, bits::bit), (0x80, bits::res), (0xC0, bits::set)];
    for (base, handler) in BIT_FAMILIES {
        for bit in 0..8u8 {
            for field in 0..8u8 {
                let opcode = base + (bit << 3) + field;
                table[opcode as usize] =
                    OpEntry::new(handler, Operand::Bit(bit), operand::r8_field(field));
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_legal_opcode_has_a_table_entry() {
        // 0x00 (NOP) legitimately shares ILLEGAL's handler; every other legal opcode must have
        // been overwritten by one of the populate_* passes.
        const ILLEGAL_OPCODES: [u8; 11] =
            [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD];
        let table = primary_table();
        for opcode in 0..=255u8 {
            if ILLEGAL_OPCODES.contains(&opcode) || opcode == 0x00 {
                continue;
            }
            assert!(
                table[opcode as usize].handler as usize != ILLEGAL.handler as usize,
                "opcode {opcode:#04X} was left as the illegal-opcode sentinel"
            );
        }
    }

    #[test]
    fn cb_table_covers_every_opcode_with_no_illegal_slots() {
        let table = cb_table();
        for opcode in 0..=255u8 {
            let entry = table[opcode as usize];
            assert!(
                entry.handler as usize != ILLEGAL.handler as usize,
                "CB opcode {opcode:#04X} has no handler"
            );
        }
    }

    #[test]
    fn rst_targets_match_fixed_addresses() {
        let table = primary_table();
        let expected = [0x00, 0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38];
        for (field, expected_target) in expected.into_iter().enumerate() {
            let opcode = ((field as u8) << 3) | 0xC7;
            match table[opcode as usize].op1 {
                Operand::Rst(addr) => assert_eq!(addr, expected_target),
                other => panic!("expected RST operand, got {other:?}"),
            }
        }
    }
}
