// パス: src/namer.rs
// 役割: 出力先ランタイムのよく知られたシンボル名を提供する命名サービス
// 意図: intrinsic が名前を直書きせず、設定ファイルで上書きできる一箇所から参照する
// 関連ファイル: src/intrinsics/builtins.rs, src/intrinsics/collections.rs, src/bin/intrinsify.rs
//! ランタイム名設定
//!
//! JSON で部分的に上書きでき、省略したフィールドは既定値になる。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::target::TargetExpr;

/// 出力先ランタイムのシンボル名一覧。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeNames {
    /// ランタイムオブジェクト名。他の名前はすべてこの下に置かれる。
    pub runtime_object: String,
    pub equals: String,
    pub stringify: String,
    pub array_of_nulls: String,
    pub new_exception: String,
    /// 標準出力オブジェクトへのパス（ランタイムオブジェクトからの相対）。
    pub system_out: Vec<String>,
    pub primitive_hash_map: String,
    pub complex_hash_map: String,
    pub primitive_hash_set: String,
    pub complex_hash_set: String,
}

impl Default for RuntimeNames {
    fn default() -> Self {
        Self {
            runtime_object: "Kotlin".into(),
            equals: "equals".into(),
            stringify: "stringify".into(),
            array_of_nulls: "arrayOfNulls".into(),
            new_exception: "$new_exception".into(),
            system_out: vec!["System".into(), "out".into()],
            primitive_hash_map: "PrimitiveHashMap".into(),
            complex_hash_map: "ComplexHashMap".into(),
            primitive_hash_set: "PrimitiveHashSet".into(),
            complex_hash_set: "ComplexHashSet".into(),
        }
    }
}

impl RuntimeNames {
    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        let names: Self = serde_json::from_str(src)?;
        names.validate()?;
        Ok(names)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = fs::read_to_string(path)?;
        Self::from_json_str(&src)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields: [(&'static str, &str); 9] = [
            ("runtime_object", &self.runtime_object),
            ("equals", &self.equals),
            ("stringify", &self.stringify),
            ("array_of_nulls", &self.array_of_nulls),
            ("new_exception", &self.new_exception),
            ("primitive_hash_map", &self.primitive_hash_map),
            ("complex_hash_map", &self.complex_hash_map),
            ("primitive_hash_set", &self.primitive_hash_set),
            ("complex_hash_set", &self.complex_hash_set),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(ConfigError::EmptyName { field: *field });
        }
        if self.system_out.is_empty() || self.system_out.iter().any(String::is_empty) {
            return Err(ConfigError::EmptyName {
                field: "system_out",
            });
        }
        Ok(())
    }

    /// ランタイムオブジェクトそのものへの参照。
    pub fn runtime(&self) -> TargetExpr {
        TargetExpr::name(&self.runtime_object)
    }

    /// ランタイムオブジェクト直下の名前への参照（`Kotlin.name`）。
    pub fn kotlin(&self, name: &str) -> TargetExpr {
        TargetExpr::qualified(name, self.runtime())
    }

    pub fn equals_ref(&self) -> TargetExpr {
        self.kotlin(&self.equals)
    }

    pub fn stringify_ref(&self) -> TargetExpr {
        self.kotlin(&self.stringify)
    }

    pub fn array_of_nulls_ref(&self) -> TargetExpr {
        self.kotlin(&self.array_of_nulls)
    }

    pub fn new_exception_ref(&self) -> TargetExpr {
        self.kotlin(&self.new_exception)
    }

    /// 標準出力オブジェクト（既定では `Kotlin.System.out`）。
    pub fn system_out_ref(&self) -> TargetExpr {
        self.system_out
            .iter()
            .fold(self.runtime(), |qualifier, segment| {
                TargetExpr::qualified(segment, qualifier)
            })
    }

    /// キーの種類と集合/写像の別に応じた実装クラス名。
    pub fn hash_collection(&self, kind: CollectionKind, key: KeyClass) -> &str {
        match (kind, key) {
            (CollectionKind::Map, KeyClass::Primitive) => &self.primitive_hash_map,
            (CollectionKind::Map, KeyClass::Complex) => &self.complex_hash_map,
            (CollectionKind::Set, KeyClass::Primitive) => &self.primitive_hash_set,
            (CollectionKind::Set, KeyClass::Complex) => &self.complex_hash_set,
        }
    }
}

/// ハッシュコレクションの種類。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Map,
    Set,
}

/// キー型の分類。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyClass {
    /// ネイティブのプロパティキーとして直接使える（数値・文字列）。
    Primitive,
    /// 同一性/等価性を考慮したハッシュが必要。
    Complex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let names = RuntimeNames::from_json_str(r#"{"runtime_object": "K"}"#).expect("parse");
        assert_eq!(names.runtime_object, "K");
        assert_eq!(names.equals, "equals");
        assert_eq!(names.system_out_ref().to_string(), "K.System.out");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = RuntimeNames::from_json_str(r#"{"equals": ""}"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyName { field: "equals" }));
    }
}
