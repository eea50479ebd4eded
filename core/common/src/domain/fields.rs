//! 検証済みの入力項目（subject fields）

use crate::domain::Category;
use crate::error::Error;

/// 種別ごとに順序と個数が固定された入力値。空欄を含まないことを型で保証する。
///
/// 値は前後の空白を除いてそのまま保存する（マスキングはしない）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectFields {
    category: Category,
    values: Vec<String>,
}

impl SubjectFields {
    /// 全項目が非空であることを検証して生成する。
    ///
    /// 空欄があればその項目名をすべて列挙した InvalidArgument を返す。
    pub fn validate(category: Category, values: Vec<String>) -> Result<Self, Error> {
        let specs = category.fields();
        if values.len() != specs.len() {
            return Err(Error::invalid_argument(format!(
                "{} requires {} fields, got {}",
                category.tag(),
                specs.len(),
                values.len()
            )));
        }
        let values: Vec<String> = values.into_iter().map(|v| v.trim().to_string()).collect();
        let blank: Vec<&str> = specs
            .iter()
            .zip(&values)
            .filter(|(_, v)| v.is_empty())
            .map(|(spec, _)| spec.label)
            .collect();
        if !blank.is_empty() {
            return Err(Error::invalid_argument(format!(
                "{}개 항목을 모두 입력해야 판정이 생성됩니다. 비어 있음: {}",
                specs.len(),
                blank.join(", ")
            )));
        }
        Ok(Self { category, values })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// key（"branch" 等）で値を引く
    pub fn get(&self, key: &str) -> Option<&str> {
        self.category
            .fields()
            .iter()
            .position(|spec| spec.key == key)
            .and_then(|i| self.values.get(i))
            .map(|s| s.as_str())
    }

    /// 生成サービスへ送る user メッセージ
    pub fn to_user_message(&self) -> String {
        self.category.user_message(&self.values)
    }
}
