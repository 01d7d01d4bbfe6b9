//! Transient-failure retry policy for idempotent requests.
use std::time::Duration;

use crate::error::Error;

#[derive(Clone, Debug)]
pub struct Retry {
    count: i32,
    backoff: f32,
    backoff_factor: f32,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            count: 2,
            backoff: 1.,
            backoff_factor: 2.,
        }
    }
}

impl Retry {
    pub fn new(count: i32) -> Self {
        Self {
            count,
            ..Retry::default()
        }
    }

    pub fn backoff(&mut self, initial: f32, factor: f32) -> &mut Self {
        self.backoff = initial / factor;
        self.backoff_factor = factor;
        self
    }

    pub fn delay(&mut self, err: &Error) -> Option<Duration> {
        if can_retry(err) {
            self.next()
        } else {
            None
        }
    }
}

impl Iterator for Retry {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        self.backoff *= self.backoff_factor;
        let duration = Duration::from_secs_f32(self.backoff);

        match Ord::cmp(&self.count, &0) {
            std::cmp::Ordering::Less => Some(duration),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => {
                self.count -= 1;
                Some(duration)
            }
        }
    }
}

fn can_retry(err: &Error) -> bool {
    match err {
        Error::TimeoutError { .. } | Error::SendRequestError { .. } => true,
        Error::UpstreamError { code, .. } => code.is_server_error(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use awc::http::StatusCode;
    use backtrace::Backtrace;

    fn upstream(code: StatusCode) -> Error {
        Error::UpstreamError {
            code,
            url: "http://localhost/api/v1/namespaces/_/actions".to_string(),
            msg: "".to_string(),
        }
    }

    #[test]
    fn server_errors_count_down_then_stop() {
        let mut retry = Retry::new(2);
        assert!(retry.delay(&upstream(StatusCode::SERVICE_UNAVAILABLE)).is_some());
        assert!(retry.delay(&upstream(StatusCode::INTERNAL_SERVER_ERROR)).is_some());
        assert_eq!(retry.delay(&upstream(StatusCode::SERVICE_UNAVAILABLE)), None);
    }

    #[test]
    fn client_errors_never_retry() {
        let mut retry = Retry::new(5);
        assert_eq!(retry.delay(&upstream(StatusCode::NOT_FOUND)), None);
        assert_eq!(retry.delay(&upstream(StatusCode::UNAUTHORIZED)), None);
    }

    #[test]
    fn timeouts_retry() {
        let mut retry = Retry::new(1);
        let err = Error::TimeoutError {
            e: "timeout".to_string(),
            url: "http://localhost".to_string(),
            bt: Backtrace::new(),
        };
        assert!(retry.delay(&err).is_some());
        assert_eq!(retry.delay(&err), None);
    }
}
