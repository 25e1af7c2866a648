use std::fmt::{Debug, Display};

use crate::{Resource, ServiceState};

type ErrorHandler<E> = Box<dyn FnOnce(&E) -> (ServiceState, String)>;

/// Runs a check and turns its error, if any, into a plugin result.
///
/// Without an `on_error` handler errors are reported as [ServiceState::Critical] with the error
/// text as message.
pub struct Runner<E> {
    on_error: Option<ErrorHandler<E>>,
}

impl<E: Debug + Display> Runner<E> {
    pub fn new() -> Self {
        Self { on_error: None }
    }

    pub fn on_error(mut self, f: impl FnOnce(&E) -> (ServiceState, String) + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn safe_run(self, f: impl FnOnce() -> Result<Resource, E>) -> RunnerResult {
        match f() {
            Ok(resource) => RunnerResult::Ok(resource),
            Err(err) => {
                tracing::warn!(error = ?err, "check failed: {err}");

                let (state, msg) = self
                    .on_error
                    .map(|f| f(&err))
                    .unwrap_or_else(|| (ServiceState::Critical, err.to_string()));

                RunnerResult::Err(state, msg)
            }
        }
    }
}

impl<E: Debug + Display> Default for Runner<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the given closure and reports any error with the given state.
pub fn safe_run<E: Debug + Display + 'static>(
    f: impl FnOnce() -> Result<Resource, E>,
    error_state: ServiceState,
) -> RunnerResult {
    Runner::new()
        .on_error(move |e: &E| (error_state, e.to_string()))
        .safe_run(f)
}

pub enum RunnerResult {
    Ok(Resource),
    Err(ServiceState, String),
}

impl RunnerResult {
    pub fn into_resource(self) -> Resource {
        match self {
            RunnerResult::Ok(resource) => resource,
            RunnerResult::Err(state, msg) => Resource::new().with_state(state).with_description(msg),
        }
    }

    pub fn print_and_exit(self) -> ! {
        self.into_resource().print_and_exit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("woops")]
    struct EmptyError;

    #[test]
    fn test_runner_ok() {
        let result = Runner::<EmptyError>::new()
            .on_error(|_| panic!("error handler called for a successful check"))
            .safe_run(|| Ok(Resource::new().with_state(ServiceState::Warning)));

        assert!(matches!(result, RunnerResult::Ok(_)));
        assert_eq!(result.into_resource().exit_code(), 1);
    }

    #[test]
    fn test_runner_error() {
        let result = Runner::<EmptyError>::new()
            .on_error(|e| (ServiceState::Unknown, format!("handled {e}")))
            .safe_run(|| Err(EmptyError));

        assert!(matches!(result, RunnerResult::Err(ServiceState::Unknown, _)));
        assert_eq!(
            &result.into_resource().to_nagios_string(),
            "UNKNOWN - handled woops"
        );
    }

    #[test]
    fn test_runner_default_is_critical() {
        let resource = Runner::<EmptyError>::new()
            .safe_run(|| Err(EmptyError))
            .into_resource();

        assert_eq!(&resource.to_nagios_string(), "CRITICAL - woops");
        assert_eq!(resource.exit_code(), 2);
    }

    #[test]
    fn test_safe_run_with_state() {
        let resource = safe_run(|| Err(EmptyError), ServiceState::Unknown).into_resource();
        assert_eq!(resource.exit_code(), 3);
    }
}
