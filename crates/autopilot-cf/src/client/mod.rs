mod apps;
mod queries;
mod routes;

use crate::{CommandRunner, Result, Space};

/// Cloud Foundry operations for apps in one space.
pub struct CloudFoundry<R> {
    runner: R,
    space: Space,
}

impl<R: CommandRunner> CloudFoundry<R> {
    #[must_use]
    pub fn new(runner: R, space: Space) -> Self {
        Self { runner, space }
    }

    #[must_use]
    pub fn space(&self) -> &Space {
        &self.space
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Issue a `cf curl` request and join the response lines.
    fn curl(&self, path: &str) -> Result<String> {
        let lines = self.runner.run_captured(&["curl", path])?;
        Ok(lines.join(""))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::CfError;

    /// Records every command and replays scripted `cf curl` responses.
    #[derive(Default)]
    pub(crate) struct FakeRunner {
        calls: Mutex<Vec<Vec<String>>>,
        responses: Mutex<VecDeque<String>>,
        failing_command: Option<(String, String)>,
    }

    impl FakeRunner {
        pub(crate) fn with_response(self, response: &str) -> Self {
            self.responses
                .lock()
                .expect("lock poisoned")
                .push_back(response.to_string());
            self
        }

        pub(crate) fn failing(mut self, command: &str, reason: &str) -> Self {
            self.failing_command = Some((command.to_string(), reason.to_string()));
            self
        }

        pub(crate) fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().expect("lock poisoned").clone()
        }

        fn record(&self, args: &[&str]) -> Result<()> {
            self.calls
                .lock()
                .expect("lock poisoned")
                .push(args.iter().map(|a| (*a).to_string()).collect());

            match &self.failing_command {
                Some((command, reason)) if args.first() == Some(&command.as_str()) => {
                    Err(CfError::CommandFailed {
                        command: command.clone(),
                        reason: reason.clone(),
                    })
                }
                _ => Ok(()),
            }
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, args: &[&str]) -> Result<()> {
            self.record(args)
        }

        fn run_captured(&self, args: &[&str]) -> Result<Vec<String>> {
            self.record(args)?;
            let response = self
                .responses
                .lock()
                .expect("lock poisoned")
                .pop_front()
                .unwrap_or_default();
            Ok(vec![response])
        }
    }

    pub(crate) fn client(runner: FakeRunner) -> CloudFoundry<FakeRunner> {
        CloudFoundry::new(
            runner,
            Space {
                guid: "4".to_string(),
                name: "dev".to_string(),
            },
        )
    }

    pub(crate) fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn curl_joins_response_lines() -> anyhow::Result<()> {
        let cf = client(FakeRunner::default().with_response(r#"{"total_results":1}"#));

        let body = cf.curl("v2/apps")?;

        assert_eq!(body, r#"{"total_results":1}"#);
        assert_eq!(cf.runner().calls(), vec![args(&["curl", "v2/apps"])]);
        Ok(())
    }
}
