//! TAC instruction and operand representation.
//!
//! Instructions are structured values whose `Display` impls produce the
//! textual format consumed by later tooling:
//!
//! ```text
//! declareint NAME
//! NAME = OPERAND
//! TEMP = L OP R
//! TEMP = -OPERAND
//! TEMP = toFloat OPERAND
//! TEMP = not OPERAND
//! print OPERAND
//! LABEL L<n>
//! GOTO L<n>
//! TEMP IFGOTO L<n>
//! ```

use std::fmt;

use minic_par::ast::{BinOp, PrimType, Value};

/// A compiler-generated temporary, rendered `t<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Temp(pub u32);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A compiler-generated jump target, rendered `L<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label(pub u32);

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// An instruction operand: a temporary, a variable name, or a literal.
///
/// Literals render in their natural form — booleans as `True`/`False`,
/// strings with surrounding double quotes, numbers in decimal (floats
/// always carry a decimal point).
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Temp(Temp),
    Var(String),
    Const(Value),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Temp(t) => write!(f, "{}", t),
            Operand::Var(name) => f.write_str(name),
            Operand::Const(Value::Str(s)) => write!(f, "\"{}\"", s),
            Operand::Const(v) => write!(f, "{}", v),
        }
    }
}

/// One three-address instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    /// `declare<type> NAME`
    Declare { ty: PrimType, name: String },
    /// `DEST = SRC` - declaration initialization, reassignment, or a
    /// condition value copied into a temporary.
    Copy { dest: Operand, src: Operand },
    /// `TEMP = L OP R`
    Binary {
        dest: Temp,
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
    },
    /// `TEMP = -OPERAND`
    Neg { dest: Temp, src: Operand },
    /// `TEMP = toFloat OPERAND`
    ToFloat { dest: Temp, src: Operand },
    /// `TEMP = not OPERAND`
    Not { dest: Temp, src: Operand },
    /// `print OPERAND`
    Print { value: Operand },
    /// `LABEL L<n>`
    Label(Label),
    /// `GOTO L<n>`
    Goto(Label),
    /// `TEMP IFGOTO L<n>` - jump when the temporary holds true.
    IfGoto { cond: Temp, target: Label },
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Declare { ty, name } => write!(f, "declare{} {}", ty.name(), name),
            Instr::Copy { dest, src } => write!(f, "{} = {}", dest, src),
            Instr::Binary { dest, op, lhs, rhs } => {
                write!(f, "{} = {} {} {}", dest, lhs, op.symbol(), rhs)
            }
            Instr::Neg { dest, src } => write!(f, "{} = -{}", dest, src),
            Instr::ToFloat { dest, src } => write!(f, "{} = toFloat {}", dest, src),
            Instr::Not { dest, src } => write!(f, "{} = not {}", dest, src),
            Instr::Print { value } => write!(f, "print {}", value),
            Instr::Label(label) => write!(f, "LABEL {}", label),
            Instr::Goto(label) => write!(f, "GOTO {}", label),
            Instr::IfGoto { cond, target } => write!(f, "{} IFGOTO {}", cond, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_rendering() {
        for (ty, expected) in [
            (PrimType::Int, "declareint x"),
            (PrimType::Float, "declarefloat x"),
            (PrimType::String, "declarestring x"),
            (PrimType::Bool, "declarebool x"),
        ] {
            let instr = Instr::Declare {
                ty,
                name: "x".into(),
            };
            assert_eq!(instr.to_string(), expected);
        }
    }

    #[test]
    fn test_operand_rendering() {
        assert_eq!(Operand::Temp(Temp(3)).to_string(), "t3");
        assert_eq!(Operand::Var("abc".into()).to_string(), "abc");
        assert_eq!(Operand::Const(Value::Int(5)).to_string(), "5");
        assert_eq!(Operand::Const(Value::Float(2.0)).to_string(), "2.0");
        assert_eq!(Operand::Const(Value::Bool(true)).to_string(), "True");
        assert_eq!(Operand::Const(Value::Str("hi".into())).to_string(), "\"hi\"");
    }

    #[test]
    fn test_instruction_rendering() {
        let binary = Instr::Binary {
            dest: Temp(0),
            op: BinOp::Add,
            lhs: Operand::Const(Value::Int(5)),
            rhs: Operand::Const(Value::Int(3)),
        };
        assert_eq!(binary.to_string(), "t0 = 5 + 3");

        let to_float = Instr::ToFloat {
            dest: Temp(1),
            src: Operand::Var("b".into()),
        };
        assert_eq!(to_float.to_string(), "t1 = toFloat b");

        let not = Instr::Not {
            dest: Temp(2),
            src: Operand::Var("a".into()),
        };
        assert_eq!(not.to_string(), "t2 = not a");

        let neg = Instr::Neg {
            dest: Temp(3),
            src: Operand::Const(Value::Int(5)),
        };
        assert_eq!(neg.to_string(), "t3 = -5");

        assert_eq!(Instr::Label(Label(0)).to_string(), "LABEL L0");
        assert_eq!(Instr::Goto(Label(1)).to_string(), "GOTO L1");
        assert_eq!(
            Instr::IfGoto {
                cond: Temp(3),
                target: Label(2)
            }
            .to_string(),
            "t3 IFGOTO L2"
        );
    }
}
