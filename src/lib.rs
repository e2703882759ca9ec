// パス: src/lib.rs
// 役割: Crate root wiring modules and exports
// 意図: Expose the intrinsic lowering engine to the backend call translator
// 関連ファイル: src/translator.rs, src/intrinsics/mod.rs, src/descriptor.rs
//! intrinsify ルートモジュール
//!
//! 目的:
//! - 静的型付き言語からスクリプト言語へのバックエンドで、既知の標準ライブラリ呼び出しを
//!   専用の式へ差し替える（intrinsic 変換）。
//! - それ以外の呼び出しは `None` を返し、既定の変換に任せる。
//!
//! 方針:
//! - コメント/ドキュメントは日本語、識別子は英語。
//! - 呼び出しごとの純粋な変換のみ。型推論や実行時の振る舞いは扱わない。
//! - レジストリはセッションで一度だけ構築し、参照で渡す（グローバル状態を持たない）。

pub mod call;
pub mod descriptor;
pub mod errors;
pub mod intrinsics;
pub mod namer;
pub mod target;
pub mod translator;

pub use crate::call::{LoweredCall, ReceiverValue, ResolvedCall, SourceExpr};
pub use crate::descriptor::{DeclId, DeclarationTable, TypeRef};
pub use crate::errors::{ConfigError, LoweringError, LoweringResult};
pub use crate::intrinsics::{Intrinsic, IntrinsicRegistry};
pub use crate::namer::RuntimeNames;
pub use crate::target::TargetExpr;
pub use crate::translator::{CallTranslator, IntrinsicSession};
