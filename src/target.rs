// パス: src/target.rs
// 役割: 出力先スクリプト言語の式ノードを定義する
// 意図: intrinsic と既定変換が同じ木を生成し、変換器がそのまま出力木へ埋め込めるようにする
// 関連ファイル: src/intrinsics/mod.rs, src/translator.rs, src/namer.rs

use std::fmt;

/// 二項演算子（intrinsic が生成するものだけ）。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Assign,
    AssignAdd,
}

impl BinaryOp {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AssignAdd => "+=",
        }
    }
}

/// 出力先言語の式。
#[derive(Clone, Debug, PartialEq)]
pub enum TargetExpr {
    NameRef {
        ident: String,
        qualifier: Option<Box<TargetExpr>>,
    },
    StringLit(String),
    Invocation {
        callee: Box<TargetExpr>,
        args: Vec<TargetExpr>,
    },
    New {
        constructor: Box<TargetExpr>,
        args: Vec<TargetExpr>,
    },
    ArrayAccess {
        array: Box<TargetExpr>,
        index: Box<TargetExpr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<TargetExpr>,
        right: Box<TargetExpr>,
    },
    ObjectLiteral(Vec<(String, TargetExpr)>),
    This,
}

impl TargetExpr {
    /// 非修飾の名前参照。
    pub fn name(ident: impl Into<String>) -> Self {
        Self::NameRef {
            ident: ident.into(),
            qualifier: None,
        }
    }

    /// `qualifier.ident` 形式の名前参照。
    pub fn qualified(ident: impl Into<String>, qualifier: TargetExpr) -> Self {
        Self::NameRef {
            ident: ident.into(),
            qualifier: Some(Box::new(qualifier)),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::StringLit(value.into())
    }

    pub fn invoke(callee: TargetExpr, args: Vec<TargetExpr>) -> Self {
        Self::Invocation {
            callee: Box::new(callee),
            args,
        }
    }

    /// `receiver.method(args)`。
    pub fn method_call(receiver: TargetExpr, method: &str, args: Vec<TargetExpr>) -> Self {
        Self::invoke(Self::qualified(method, receiver), args)
    }

    pub fn new_instance(constructor: TargetExpr, args: Vec<TargetExpr>) -> Self {
        Self::New {
            constructor: Box::new(constructor),
            args,
        }
    }

    pub fn index(array: TargetExpr, index: TargetExpr) -> Self {
        Self::ArrayAccess {
            array: Box::new(array),
            index: Box::new(index),
        }
    }

    pub fn binary(op: BinaryOp, left: TargetExpr, right: TargetExpr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// 単一フィールドのレコード `{field: value}`。
    pub fn wrap_value(field: impl Into<String>, value: TargetExpr) -> Self {
        Self::ObjectLiteral(vec![(field.into(), value)])
    }

    /// 非修飾の名前参照であればその識別子を返す。
    pub fn bare_ident(&self) -> Option<&str> {
        match self {
            Self::NameRef {
                ident,
                qualifier: None,
            } => Some(ident),
            _ => None,
        }
    }

    /// 名前参照であれば（修飾の有無を問わず）識別子を返す。
    pub fn ident(&self) -> Option<&str> {
        match self {
            Self::NameRef { ident, .. } => Some(ident),
            _ => None,
        }
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[TargetExpr]) -> fmt::Result {
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

impl fmt::Display for TargetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameRef { ident, qualifier } => match qualifier {
                Some(q) => write!(f, "{q}.{ident}"),
                None => write!(f, "{ident}"),
            },
            Self::StringLit(value) => write!(f, "{value:?}"),
            Self::Invocation { callee, args } => {
                write!(f, "{callee}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Self::New { constructor, args } => {
                write!(f, "new {constructor}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Self::ArrayAccess { array, index } => write!(f, "{array}[{index}]"),
            Self::Binary { op, left, right } => write!(f, "{left} {} {right}", op.symbol()),
            Self::ObjectLiteral(fields) => {
                write!(f, "{{")?;
                for (idx, (name, value)) in fields.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
            Self::This => write!(f, "this"),
        }
    }
}
