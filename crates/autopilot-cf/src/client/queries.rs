use super::CloudFoundry;
use crate::{AppSummary, CommandRunner, Result, api};

impl<R: CommandRunner> CloudFoundry<R> {
    /// Whether exactly one app with this name exists in the targeted space.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or its response is malformed.
    pub fn app_exists(&self, name: &str) -> Result<bool> {
        let body = self.curl(&api::app_query_path(name, &self.space.guid))?;
        api::parse_app_exists(&body, &self.space.guid)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails or its response is malformed.
    pub fn app_summary(&self, name: &str) -> Result<Option<AppSummary>> {
        let body = self.curl(&api::app_query_path(name, &self.space.guid))?;
        api::parse_app_summary(&body)
    }
}
