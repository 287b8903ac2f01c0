use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use autopilot_cf::CfError;

use crate::Result;
use crate::traits::{AppMetadata, AppRoute, RemoteOperations};

#[derive(Debug, Clone)]
struct MockApp {
    state: String,
    routes: Vec<String>,
}

#[derive(Default)]
struct MockSpace {
    apps: BTreeMap<String, MockApp>,
    calls: Vec<String>,
}

/// In-memory space that records every call made against it.
///
/// Calls are logged as `"<op> <args>"`, e.g. `"rename my-app my-app-venerable"`.
/// Operations named with [`failing`](Self::failing) return an error for the
/// given app (the old name for renames) without changing any state.
#[derive(Default)]
pub struct MockRemote {
    space: Mutex<MockSpace>,
    failures: HashSet<(String, String)>,
}

const QUERIES: [&str; 4] = ["exists", "metadata", "host", "apps"];

/// Domain every mock route lives on.
pub const MOCK_DOMAIN: &str = "apps.example.com";

impl MockRemote {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an app with a route whose host is the app's own name.
    #[must_use]
    pub fn with_app(self, name: &str, state: &str) -> Self {
        self.lock().apps.insert(
            name.to_string(),
            MockApp {
                state: state.to_string(),
                routes: vec![name.to_string()],
            },
        );
        self
    }

    #[must_use]
    pub fn with_started_app(self, name: &str) -> Self {
        self.with_app(name, "STARTED")
    }

    #[must_use]
    pub fn with_stopped_app(self, name: &str) -> Self {
        self.with_app(name, "STOPPED")
    }

    #[must_use]
    pub fn failing(mut self, operation: &str, name: &str) -> Self {
        self.failures
            .insert((operation.to_string(), name.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Recorded calls that change remote state.
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| {
                let operation = call.split(' ').next().unwrap_or_default();
                !QUERIES.contains(&operation)
            })
            .collect()
    }

    pub fn app_names(&self) -> Vec<String> {
        self.lock().apps.keys().cloned().collect()
    }

    pub fn app_state(&self, name: &str) -> Option<String> {
        self.lock().apps.get(name).map(|app| app.state.clone())
    }

    pub fn routes(&self, name: &str) -> Vec<String> {
        self.lock()
            .apps
            .get(name)
            .map(|app| app.routes.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, MockSpace> {
        self.space.lock().expect("lock poisoned")
    }

    fn record(&self, operation: &str, args: &[&str]) -> Result<MutexGuard<'_, MockSpace>> {
        let mut space = self.lock();
        let mut call = operation.to_string();
        for arg in args {
            call.push(' ');
            call.push_str(arg);
        }
        space.calls.push(call);

        let target = args.first().copied().unwrap_or_default();
        if self
            .failures
            .contains(&(operation.to_string(), target.to_string()))
        {
            return Err(CfError::CommandFailed {
                command: operation.to_string(),
                reason: format!("injected failure for {target}"),
            }
            .into());
        }
        Ok(space)
    }
}

fn not_found(name: &str) -> CfError {
    CfError::AppNotFound {
        name: name.to_string(),
    }
}

impl MockSpace {
    fn app_mut(&mut self, name: &str) -> Result<&mut MockApp> {
        Ok(self.apps.get_mut(name).ok_or_else(|| not_found(name))?)
    }
}

impl RemoteOperations for MockRemote {
    fn rename_application(&self, old_name: &str, new_name: &str) -> Result<()> {
        let mut space = self.record("rename", &[old_name, new_name])?;
        if space.apps.contains_key(new_name) {
            return Err(CfError::CommandFailed {
                command: "rename".to_string(),
                reason: format!("the app name {new_name} is taken"),
            }
            .into());
        }
        let app = space.apps.remove(old_name).ok_or_else(|| not_found(old_name))?;
        space.apps.insert(new_name.to_string(), app);
        Ok(())
    }

    fn push_application(
        &self,
        name: &str,
        _manifest_path: &Path,
        _app_path: Option<&Path>,
        no_start: bool,
    ) -> Result<()> {
        let mut args = vec![name];
        if no_start {
            args.push("--no-start");
        }
        let mut space = self.record("push", &args)?;
        let state = if no_start { "STOPPED" } else { "STARTED" };
        let app = space
            .apps
            .entry(name.to_string())
            .or_insert_with(|| MockApp {
                state: String::new(),
                routes: vec![name.to_string()],
            });
        app.state = state.to_string();
        Ok(())
    }

    fn start_application(&self, name: &str) -> Result<()> {
        let mut space = self.record("start", &[name])?;
        space.app_mut(name)?.state = "STARTED".to_string();
        Ok(())
    }

    fn stop_application(&self, name: &str) -> Result<()> {
        let mut space = self.record("stop", &[name])?;
        space.app_mut(name)?.state = "STOPPED".to_string();
        Ok(())
    }

    fn delete_application(&self, name: &str) -> Result<()> {
        let mut space = self.record("delete", &[name])?;
        space.apps.remove(name);
        Ok(())
    }

    fn does_app_exist(&self, name: &str) -> Result<bool> {
        let space = self.record("exists", &[name])?;
        Ok(space.apps.contains_key(name))
    }

    fn get_app_metadata(&self, name: &str) -> Result<Option<AppMetadata>> {
        let space = self.record("metadata", &[name])?;
        Ok(space.apps.get(name).map(|app| AppMetadata {
            state: app.state.clone(),
        }))
    }

    fn get_app_route(&self, name: &str) -> Result<AppRoute> {
        let mut space = self.record("host", &[name])?;
        let app = space.app_mut(name)?;
        let host = app.routes.first().cloned().ok_or_else(|| CfError::NoRoutes {
            name: name.to_string(),
        })?;
        Ok(AppRoute {
            host,
            domain: MOCK_DOMAIN.to_string(),
        })
    }

    fn map_route(&self, name: &str, route: &AppRoute) -> Result<()> {
        let mut space = self.record("map-route", &[name, route.host.as_str()])?;
        let app = space.app_mut(name)?;
        if !app.routes.contains(&route.host) {
            app.routes.push(route.host.clone());
        }
        Ok(())
    }

    fn unmap_route(&self, name: &str, route: &AppRoute) -> Result<()> {
        let mut space = self.record("unmap-route", &[name, route.host.as_str()])?;
        space.app_mut(name)?.routes.retain(|host| *host != route.host);
        Ok(())
    }

    fn list_applications(&self) -> Result<()> {
        self.record("apps", &[])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rename_moves_app_and_keeps_routes() -> anyhow::Result<()> {
        let remote = MockRemote::new().with_started_app("my-app");

        remote.rename_application("my-app", "my-app-venerable")?;

        assert_eq!(remote.app_names(), vec!["my-app-venerable"]);
        assert_eq!(remote.routes("my-app-venerable"), vec!["my-app"]);
        Ok(())
    }

    #[test]
    fn rename_onto_existing_app_fails() {
        let remote = MockRemote::new()
            .with_started_app("a")
            .with_started_app("b");

        assert!(remote.rename_application("a", "b").is_err());
        assert_eq!(remote.app_names(), vec!["a", "b"]);
    }

    #[test]
    fn injected_failure_leaves_state_untouched() {
        let remote = MockRemote::new()
            .with_started_app("my-app")
            .failing("delete", "my-app");

        assert!(remote.delete_application("my-app").is_err());
        assert_eq!(remote.app_names(), vec!["my-app"]);
        assert_eq!(remote.calls(), vec!["delete my-app"]);
    }

    #[test]
    fn mutations_skip_queries() -> anyhow::Result<()> {
        let remote = MockRemote::new();

        remote.does_app_exist("my-app")?;
        remote.push_application("my-app", Path::new("manifest.yml"), None, true)?;
        remote.list_applications()?;

        assert_eq!(remote.mutations(), vec!["push my-app --no-start"]);
        assert_eq!(remote.app_state("my-app").as_deref(), Some("STOPPED"));
        Ok(())
    }

    #[test]
    fn host_name_comes_from_first_route() -> anyhow::Result<()> {
        let remote = MockRemote::new().with_started_app("my-app");

        assert_eq!(remote.get_host_name("my-app")?, "my-app");
        assert_eq!(remote.calls(), vec!["host my-app"]);
        Ok(())
    }

    #[test]
    fn swap_exchanges_names_through_placeholder() -> anyhow::Result<()> {
        let remote = MockRemote::new()
            .with_started_app("my-app")
            .with_stopped_app("my-app-g1");

        remote.swap_applications("my-app", "my-app-g1")?;

        assert_eq!(
            remote.mutations(),
            vec![
                "rename my-app my-app-now-on-swapping",
                "rename my-app-g1 my-app",
                "rename my-app-now-on-swapping my-app-g1",
            ]
        );
        assert_eq!(remote.app_state("my-app").as_deref(), Some("STOPPED"));
        assert_eq!(remote.app_state("my-app-g1").as_deref(), Some("STARTED"));
        Ok(())
    }

    #[test]
    fn swap_stops_at_first_failed_rename() {
        let remote = MockRemote::new()
            .with_started_app("my-app")
            .with_stopped_app("my-app-g1")
            .failing("rename", "my-app-g1");

        assert!(remote.swap_applications("my-app", "my-app-g1").is_err());
        assert_eq!(remote.mutations().len(), 2);
        assert_eq!(remote.app_names(), vec!["my-app-g1", "my-app-now-on-swapping"]);
    }
}
