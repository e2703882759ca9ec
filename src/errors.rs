// パス: src/errors.rs
// 役割: intrinsic 適用と設定読み込みで発生するエラー型を定義する
// 意図: 上流の不変条件違反を内部整合性エラーとして一箇所で表現する
// 関連ファイル: src/intrinsics/mod.rs, src/namer.rs, src/translator.rs
//! エラー型の定義（共通フォーマット: \[CODE\] メッセージ）。
//!
//! ここに現れるエラーはユーザー向け診断ではない。解決・引数数検査は上流で
//! 済んでいるはずなので、発生した時点でコンパイル単位の変換を中断する。

use std::io;

use thiserror::Error;

/// intrinsic 適用時の内部整合性エラー。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoweringError {
    #[error("[INTRINSIC001] {intrinsic} は {expected} 個の引数を要求しますが {actual} 個が渡されました")]
    ArgumentCount {
        intrinsic: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("[INTRINSIC002] {intrinsic} にレシーバ式がありません")]
    MissingReceiver { intrinsic: &'static str },
    #[error("[INTRINSIC003] {intrinsic} に関数参照式がありません")]
    MissingFunctionReference { intrinsic: &'static str },
    #[error("[INTRINSIC004] {intrinsic} のキー型引数が束縛されていません")]
    MissingTypeArgument { intrinsic: &'static str },
    #[error("[INTRINSIC005] 宣言 #{id} が宣言表に存在しません")]
    UnknownDeclaration { id: usize },
    #[error("[INTRINSIC006] {intrinsic} の呼び出し先が {expected} ではありません")]
    UnexpectedCallee {
        intrinsic: &'static str,
        expected: &'static str,
    },
}

impl LoweringError {
    /// エラーコードを返す。
    pub fn code(&self) -> &'static str {
        match self {
            Self::ArgumentCount { .. } => "INTRINSIC001",
            Self::MissingReceiver { .. } => "INTRINSIC002",
            Self::MissingFunctionReference { .. } => "INTRINSIC003",
            Self::MissingTypeArgument { .. } => "INTRINSIC004",
            Self::UnknownDeclaration { .. } => "INTRINSIC005",
            Self::UnexpectedCallee { .. } => "INTRINSIC006",
        }
    }

    pub fn argument_count(intrinsic: &'static str, expected: usize, actual: usize) -> Self {
        Self::ArgumentCount {
            intrinsic,
            expected,
            actual,
        }
    }
}

/// 変換結果を表す型。
pub type LoweringResult<T> = Result<T, LoweringError>;

/// ランタイム名設定の読み込みエラー。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("[CONFIG002] 設定ファイルを読み込めません: {0}")]
    Io(#[from] io::Error),
    #[error("[CONFIG003] 設定 JSON を解釈できません: {0}")]
    Json(#[from] serde_json::Error),
    #[error("[CONFIG001] {field} に空の名前は指定できません")]
    EmptyName { field: &'static str },
}
