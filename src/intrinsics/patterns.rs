// パス: src/intrinsics/patterns.rs
// 役割: 呼び出し先の解決済み同一性に対する照合述語を定義する
// 意図: 完全修飾名・レシーバ有無・オーバーライド元で照合し、同名のユーザーコードを誤って拾わない
// 関連ファイル: src/intrinsics/registry.rs, src/descriptor.rs, src/call.rs
//! 照合述語
//!
//! - 宣言的な `PathPattern` と任意関数の `CustomPredicate` の 2 種類だけを持つ閉じた列挙。
//! - 述語同士の論理結合子は持たない。各エントリの述語は単独で評価する。

use std::fmt;

use crate::call::ResolvedCall;
use crate::descriptor::{DeclId, DeclarationTable};

/// 数値プリミティブ型の単純名。
pub const PRIMITIVE_NUMBERS: &[&str] = &["Int", "Long", "Short", "Byte", "Double", "Float"];

/// 完全修飾名の 1 セグメントに対する述語。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NamePredicate {
    Exact(String),
    OneOf(Vec<String>),
}

impl NamePredicate {
    /// `"A|B|C"` を選択肢として解釈する。
    pub fn parse(segment: &str) -> Self {
        if segment.contains('|') {
            Self::OneOf(segment.split('|').map(str::to_owned).collect())
        } else {
            Self::Exact(segment.to_owned())
        }
    }

    pub fn one_of(names: &[&str]) -> Self {
        Self::OneOf(names.iter().map(|n| (*n).to_owned()).collect())
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == name,
            Self::OneOf(options) => options.iter().any(|o| o == name),
        }
    }
}

impl fmt::Display for NamePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => write!(f, "{name}"),
            Self::OneOf(options) => write!(f, "{}", options.join("|")),
        }
    }
}

/// 拡張レシーバ引数に関する制約。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReceiverRule {
    #[default]
    Any,
    Required,
    Forbidden,
}

/// 完全修飾名による宣言的な述語。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<NamePredicate>,
    receiver: ReceiverRule,
    check_overridden: bool,
}

/// ドット区切りの完全修飾名から述語を作る（`"jet.Map.get"`、`"jet.Int|Long.equals"`）。
pub fn pattern(path: &str) -> PathPattern {
    PathPattern::parse(path)
}

impl PathPattern {
    pub fn parse(path: &str) -> Self {
        Self::from_segments(path.split('.').map(NamePredicate::parse).collect())
    }

    pub fn from_segments(segments: Vec<NamePredicate>) -> Self {
        Self {
            segments,
            receiver: ReceiverRule::Any,
            check_overridden: false,
        }
    }

    /// 呼び出し先が拡張レシーバ引数を宣言していることを要求する。
    pub fn receiver_exists(mut self) -> Self {
        self.receiver = ReceiverRule::Required;
        self
    }

    /// 呼び出し先が拡張レシーバ引数を宣言していないことを要求する。
    pub fn receiver_absent(mut self) -> Self {
        self.receiver = ReceiverRule::Forbidden;
        self
    }

    /// オーバーライド元をたどり、いずれかの基底宣言が名前に一致すれば受理する。
    pub fn check_overridden(mut self) -> Self {
        self.check_overridden = true;
        self
    }

    fn path_matches(&self, decls: &DeclarationTable, id: DeclId) -> bool {
        let segments = decls.qualified_segments(id);
        segments.len() == self.segments.len()
            && self
                .segments
                .iter()
                .zip(segments)
                .all(|(pred, name)| pred.matches(name))
    }

    pub fn matches(&self, decls: &DeclarationTable, call: &ResolvedCall) -> bool {
        let callee = call.callee;
        let Some(decl) = decls.try_get(callee) else {
            return false;
        };
        let receiver_ok = match self.receiver {
            ReceiverRule::Any => true,
            ReceiverRule::Required => decl.has_receiver_param(),
            ReceiverRule::Forbidden => !decl.has_receiver_param(),
        };
        if !receiver_ok {
            return false;
        }
        if self.path_matches(decls, callee) {
            return true;
        }
        // 先頭は呼び出し先自身なので飛ばす
        self.check_overridden
            && call.resolves_via_override(decls)
            && decls
                .original_declarations(callee)
                .into_iter()
                .skip(1)
                .any(|base| self.path_matches(decls, base))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, seg) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, ".")?;
            }
            write!(f, "{seg}")?;
        }
        match self.receiver {
            ReceiverRule::Any => {}
            ReceiverRule::Required => write!(f, " [receiver]")?,
            ReceiverRule::Forbidden => write!(f, " [no receiver]")?,
        }
        if self.check_overridden {
            write!(f, " [overridden]")?;
        }
        Ok(())
    }
}

/// 宣言的に書けない構造的照合。
#[derive(Clone, Copy)]
pub struct CustomPredicate {
    pub name: &'static str,
    pub test: fn(&DeclarationTable, &ResolvedCall) -> bool,
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPredicate")
            .field("name", &self.name)
            .finish()
    }
}

/// レジストリのエントリが持つ述語。
#[derive(Clone, Debug)]
pub enum Predicate {
    Path(PathPattern),
    Custom(CustomPredicate),
}

impl Predicate {
    pub fn custom(name: &'static str, test: fn(&DeclarationTable, &ResolvedCall) -> bool) -> Self {
        Self::Custom(CustomPredicate { name, test })
    }

    pub fn matches(&self, decls: &DeclarationTable, call: &ResolvedCall) -> bool {
        match self {
            Self::Path(path) => path.matches(decls, call),
            Self::Custom(custom) => (custom.test)(decls, call),
        }
    }
}

impl From<PathPattern> for Predicate {
    fn from(path: PathPattern) -> Self {
        Self::Path(path)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{path}"),
            Self::Custom(custom) => write!(f, "<{}>", custom.name),
        }
    }
}
