//! 有限回リトライ（固定間隔）
//!
//! 外部呼び出しの再試行はすべてこのヘルパーを通す。呼び出し箇所ごとにループを書かない。

use backon::{BlockingRetryable, ConstantBuilder};
use std::cell::Cell;
use std::time::Duration;

/// 最大試行回数と試行間の待ち時間
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// `max_attempts` は 1 以上に丸める
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// リトライを使い切った、または再試行不可のエラーで止まった
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryFailure<E> {
    pub error: E,
    pub attempts: u32,
}

/// `op` を最大 `policy.max_attempts` 回呼ぶ（固定間隔の backon ConstantBuilder）。
///
/// * `is_retryable` - false を返したエラーでは即座に諦める
/// * `on_retry` - 次の試行の前に (失敗した試行番号, エラー) で呼ばれる（ログ用）
/// * `op` - 試行番号（1 始まり）を受け取る
///
/// 成功時は (値, 試行回数) を返す。
pub fn retry<T, E>(
    policy: &RetryPolicy,
    is_retryable: impl Fn(&E) -> bool,
    mut on_retry: impl FnMut(u32, &E),
    mut op: impl FnMut(u32) -> Result<T, E>,
) -> Result<(T, u32), RetryFailure<E>> {
    let attempts = Cell::new(0u32);
    let backoff = ConstantBuilder::default()
        .with_delay(policy.delay)
        .with_max_times((policy.max_attempts - 1) as usize);

    let result = (|| {
        attempts.set(attempts.get() + 1);
        op(attempts.get())
    })
    .retry(backoff)
    .sleep(std::thread::sleep)
    .when(|e: &E| is_retryable(e))
    .notify(|e: &E, _delay: Duration| on_retry(attempts.get(), e))
    .call();

    match result {
        Ok(value) => Ok((value, attempts.get())),
        Err(error) => Err(RetryFailure {
            error,
            attempts: attempts.get(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast(max: u32) -> RetryPolicy {
        RetryPolicy::new(max, Duration::ZERO)
    }

    #[test]
    fn test_succeeds_on_nth_attempt_within_bound() {
        let mut retried = Vec::new();
        let result = retry(
            &fast(3),
            |_: &String| true,
            |n, _| retried.push(n),
            |n| if n < 3 { Err(format!("fail {}", n)) } else { Ok("saved") },
        );
        assert_eq!(result, Ok(("saved", 3)));
        assert_eq!(retried, vec![1, 2]);
    }

    #[test]
    fn test_gives_up_after_max_attempts_with_last_error() {
        let mut calls = 0;
        let result: Result<((), u32), _> = retry(
            &fast(2),
            |_: &String| true,
            |_, _| {},
            |n| {
                calls += 1;
                Err(format!("fail {}", n))
            },
        );
        assert_eq!(calls, 2);
        let failure = result.unwrap_err();
        assert_eq!(failure.attempts, 2);
        assert_eq!(failure.error, "fail 2");
    }

    #[test]
    fn test_non_retryable_stops_immediately() {
        let mut calls = 0;
        let result: Result<((), u32), _> = retry(
            &fast(5),
            |e: &&str| *e != "fatal",
            |_, _| {},
            |_| {
                calls += 1;
                Err("fatal")
            },
        );
        assert_eq!(calls, 1);
        assert_eq!(result.unwrap_err().attempts, 1);
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let p = RetryPolicy::new(0, Duration::from_millis(800));
        assert_eq!(p.max_attempts(), 1);
        let mut calls = 0;
        let result: Result<((), u32), _> = retry(
            &p,
            |_: &String| true,
            |_, _| {},
            |_| {
                calls += 1;
                Err("quota".to_string())
            },
        );
        assert_eq!(calls, 1);
        assert_eq!(result.unwrap_err().attempts, 1);
    }

    #[test]
    fn test_waits_fixed_delay_between_attempts() {
        let started = std::time::Instant::now();
        let result: Result<((), u32), _> = retry(
            &RetryPolicy::new(3, Duration::from_millis(30)),
            |_: &String| true,
            |_, _| {},
            |n| Err(format!("fail {}", n)),
        );
        assert_eq!(result.unwrap_err().attempts, 3);
        assert!(started.elapsed() >= Duration::from_millis(60));
    }
}
