// パス: src/call.rs
// 役割: 解決済み呼び出しと、変換済みのレシーバ・引数をまとめる呼び出しメタデータを定義する
// 意図: 解決器と汎用呼び出し変換器から受け取る情報を intrinsic が読み取り専用で参照できる形にする
// 関連ファイル: src/descriptor.rs, src/target.rs, src/translator.rs

use crate::descriptor::{DeclId, DeclKind, DeclarationTable, TypeRef};
use crate::target::TargetExpr;

/// ソース上の式のうち、ネイティブマップ判定に必要な最小限の形。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceExpr {
    /// 名前参照。解決済みなら参照先の宣言を持つ。
    Reference { target: Option<DeclId> },
    /// `receiver.selector` 形式の修飾式。
    Qualified {
        receiver: Box<SourceExpr>,
        selector: Box<SourceExpr>,
    },
    Other,
}

impl SourceExpr {
    pub fn reference(target: DeclId) -> Self {
        Self::Reference {
            target: Some(target),
        }
    }

    pub fn qualified(receiver: SourceExpr, selector: SourceExpr) -> Self {
        Self::Qualified {
            receiver: Box::new(receiver),
            selector: Box::new(selector),
        }
    }

    /// 参照式そのもの、または修飾式のレシーバ側の参照式（1 段だけ剥がす）。
    pub fn reference_target(&self) -> Option<DeclId> {
        match self {
            Self::Reference { target } => *target,
            Self::Qualified { receiver, .. } => match receiver.as_ref() {
                Self::Reference { target } => *target,
                _ => None,
            },
            Self::Other => None,
        }
    }
}

/// 呼び出しに束縛されたレシーバ値。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReceiverValue {
    /// 明示的なレシーバ式。
    Expression(SourceExpr),
    /// 暗黙の `this`。
    Implicit,
}

impl ReceiverValue {
    pub fn expression(&self) -> Option<&SourceExpr> {
        match self {
            Self::Expression(expr) => Some(expr),
            Self::Implicit => None,
        }
    }
}

/// 解決済み呼び出し。解決器が生成し、ここでは読み取りのみ行う。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCall {
    pub callee: DeclId,
    /// インスタンスとして束縛されたレシーバ。
    pub this_object: Option<ReceiverValue>,
    /// 拡張関数のレシーバ。
    pub receiver_argument: Option<ReceiverValue>,
    /// 型パラメータ名と束縛型引数の組（型パラメータの宣言順）。
    pub type_arguments: Vec<(String, TypeRef)>,
}

impl ResolvedCall {
    pub fn new(callee: DeclId) -> Self {
        Self {
            callee,
            this_object: None,
            receiver_argument: None,
            type_arguments: Vec::new(),
        }
    }

    pub fn with_this_object(mut self, receiver: ReceiverValue) -> Self {
        self.this_object = Some(receiver);
        self
    }

    pub fn with_receiver_argument(mut self, receiver: ReceiverValue) -> Self {
        self.receiver_argument = Some(receiver);
        self
    }

    pub fn with_type_argument(mut self, param: impl Into<String>, ty: TypeRef) -> Self {
        self.type_arguments.push((param.into(), ty));
        self
    }

    /// 仮想オーバーライド経由で解決された呼び出しか。
    pub fn resolves_via_override(&self, decls: &DeclarationTable) -> bool {
        matches!(
            decls.try_get(self.callee).map(|d| &d.kind),
            Some(DeclKind::Function { overridden, .. }) if !overridden.is_empty()
        )
    }
}

/// 汎用変換器が既に変換したレシーバ・引数・関数参照。
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoweredCall {
    pub this_object: Option<TargetExpr>,
    pub receiver: Option<TargetExpr>,
    pub function_reference: Option<TargetExpr>,
    pub arguments: Vec<TargetExpr>,
}

impl LoweredCall {
    pub fn new(arguments: Vec<TargetExpr>) -> Self {
        Self {
            arguments,
            ..Self::default()
        }
    }

    pub fn with_this_object(mut self, expr: TargetExpr) -> Self {
        self.this_object = Some(expr);
        self
    }

    pub fn with_receiver(mut self, expr: TargetExpr) -> Self {
        self.receiver = Some(expr);
        self
    }

    pub fn with_function_reference(mut self, expr: TargetExpr) -> Self {
        self.function_reference = Some(expr);
        self
    }

    /// インスタンスレシーバ、なければ拡張レシーバ。
    pub fn this_or_receiver(&self) -> Option<&TargetExpr> {
        self.this_object.as_ref().or(self.receiver.as_ref())
    }
}
