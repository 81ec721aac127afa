//! The operand descriptor set. Dispatch-table entries carry these instead of handlers
//! re-deriving them from the raw opcode byte, so a single handler function can serve every
//! opcode in a mnemonic family.

/// One of the seven directly-addressable 8-bit registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// A 16-bit register pair, named per its use site (`SP` for arithmetic/loads, `AF` for
/// PUSH/POP).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
    BC,
    DE,
    HL,
    SP,
    AF,
}

/// A branch condition for `JR`/`JP`/`CALL`/`RET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Zero,
    NotZero,
    Carry,
    NoCarry,
}

/// Operand kinds named in the ISA: direct registers, the indirect addressing modes, immediates
/// fetched from the instruction stream, branch conditions, CB bit indices, and RST targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Reg(Reg8),
    Reg16(Reg16),
    /// `(HL)`
    IndirectHl,
    /// `(HL+)`
    IndirectHlInc,
    /// `(HL-)`
    IndirectHlDec,
    /// `(BC)`
    IndirectBc,
    /// `(DE)`
    IndirectDe,
    /// `(a16)`
    IndirectA16,
    /// `(FF00+a8)`, the LDH address form
    IndirectA8,
    /// `(FF00+C)`
    IndirectC,
    /// `d8`
    Imm8,
    /// `d16`
    Imm16,
    /// `i8`, a signed relative displacement
    RelImm8,
    Condition(Condition),
    /// CB `BIT`/`SET`/`RES` bit index, 0..=7
    Bit(u8),
    /// `RST` target address
    Rst(u16),
}

/// Maps a 3-bit ISA register field to its operand, using the ISA's own field numbering
/// (B=0, C=1, D=2, E=3, H=4, L=5, (HL)=6, A=7) rather than struct declaration order.
pub const fn r8_field(index: u8) -> Operand {
    match index & 0x7 {
        0 => Operand::Reg(Reg8::B),
        1 => Operand::Reg(Reg8::C),
        2 => Operand::Reg(Reg8::D),
        3 => Operand::Reg(Reg8::E),
        4 => Operand::Reg(Reg8::H),
        5 => Operand::Reg(Reg8::L),
        6 => Operand::IndirectHl,
        _ => Operand::Reg(Reg8::A),
    }
}

/// Maps a 2-bit register-pair field to {BC, DE, HL, SP}, used by `LD rr,d16`, `INC/DEC rr`,
/// and `ADD HL,rr`.
pub const fn rr_field_sp(index: u8) -> Reg16 {
    match index & 0x3 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::SP,
    }
}

/// Maps a 2-bit register-pair field to {BC, DE, HL, AF}, used by `PUSH`/`POP`.
pub const fn rr_field_af(index: u8) -> Reg16 {
    match index & 0x3 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        _ => Reg16::AF,
    }
}

/// Maps a 2-bit condition field to a branch condition, per the ISA's `cc` field numbering.
pub const fn condition_field(index: u8) -> Condition {
    match index & 0x3 {
        0 => Condition::NotZero,
        1 => Condition::Zero,
        2 => Condition::NoCarry,
        _ => Condition::Carry,
    }
}
