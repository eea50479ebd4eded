//! 入力収集（Input Collector）
//!
//! 引数で渡されなかった項目だけを FieldPrompt で問い合わせ、最後にまとめて検証する。
//! 1 つでも空欄があれば何も下流へ渡さない。

use crate::ports::outbound::{FieldPrompt, InterruptChecker};
use common::domain::{Category, SubjectFields};
use common::error::Error;

/// `provided` は種別の項目順。足りない分・空文字は未入力として扱う。
///
/// 問い合わせの直後に割り込みを確認し、中断されていれば残りを聞かずに Interrupted。
pub fn collect(
    category: Category,
    provided: Vec<Option<String>>,
    prompt: &dyn FieldPrompt,
    interrupt: &dyn InterruptChecker,
) -> Result<SubjectFields, Error> {
    let mut provided = provided.into_iter();
    let mut values = Vec::with_capacity(category.fields().len());
    for spec in category.fields() {
        let given = provided
            .next()
            .flatten()
            .filter(|v| !v.trim().is_empty());
        let value = match given {
            Some(v) => v,
            None => {
                let answer = prompt.ask(spec)?;
                if interrupt.is_interrupted() {
                    return Err(Error::interrupted("입력 중에 중단되었습니다 (기록 없음)"));
                }
                answer.unwrap_or_default()
            }
        };
        values.push(value);
    }
    SubjectFields::validate(category, values)
}
