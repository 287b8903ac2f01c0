use tracing::info;

use super::CloudFoundry;
use crate::{CfError, CommandRunner, Result, Route, api};

impl<R: CommandRunner> CloudFoundry<R> {
    /// First route bound to an app, with the domain it lives on.
    ///
    /// # Errors
    ///
    /// Returns an error if the app does not exist, has no routes, or a query fails.
    pub fn app_route(&self, name: &str) -> Result<Route> {
        let app = self
            .app_summary(name)?
            .ok_or_else(|| CfError::AppNotFound {
                name: name.to_string(),
            })?;
        let body = self.curl(&api::app_routes_path(&app.guid))?;
        api::parse_first_route(&body)?.ok_or_else(|| CfError::NoRoutes {
            name: name.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns an error if `cf map-route` fails.
    pub fn map_route(&self, name: &str, route: &Route) -> Result<()> {
        info!(app = name, host = %route.host, domain = %route.domain, "mapping route");
        self.runner
            .run(&["map-route", name, &route.domain, "-n", &route.host])
    }

    /// # Errors
    ///
    /// Returns an error if `cf unmap-route` fails.
    pub fn unmap_route(&self, name: &str, route: &Route) -> Result<()> {
        info!(app = name, host = %route.host, domain = %route.domain, "unmapping route");
        self.runner
            .run(&["unmap-route", name, &route.domain, "-n", &route.host])
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{FakeRunner, args, client};
    use crate::{CfError, Route};

    const APPS: &str =
        r#"{"total_results":1,"resources":[{"metadata":{"guid":"app-guid"},"entity":{"state":"STARTED"}}]}"#;
    const ROUTES: &str = r#"{"total_results":1,"resources":[{"metadata":{"guid":"r"},"entity":{"host":"my-app","domain":{"metadata":{"guid":"d"},"entity":{"name":"apps.example.com"}}}}]}"#;

    fn route(domain: &str) -> Route {
        Route {
            host: "my-app".to_string(),
            domain: domain.to_string(),
        }
    }

    #[test]
    fn app_route_reads_first_route_of_app() -> anyhow::Result<()> {
        let cf = client(
            FakeRunner::default()
                .with_response(APPS)
                .with_response(ROUTES),
        );

        assert_eq!(cf.app_route("my-app")?, route("apps.example.com"));
        assert_eq!(
            cf.runner().calls()[1],
            args(&["curl", "v2/apps/app-guid/routes?inline-relations-depth=1"])
        );
        Ok(())
    }

    #[test]
    fn app_route_of_missing_app_is_an_error() {
        let cf = client(FakeRunner::default().with_response(r#"{"resources":[]}"#));

        let err = cf.app_route("missing").expect_err("should fail");

        assert!(matches!(err, CfError::AppNotFound { .. }));
    }

    #[test]
    fn app_route_of_app_without_routes_is_an_error() {
        let cf = client(
            FakeRunner::default()
                .with_response(APPS)
                .with_response(r#"{"resources":[]}"#),
        );

        let err = cf.app_route("my-app").expect_err("should fail");

        assert!(matches!(err, CfError::NoRoutes { .. }));
    }

    #[test]
    fn map_route_uses_the_domain_of_the_given_route() -> anyhow::Result<()> {
        // Another org owning the same host on its own domain must not matter.
        let foreign = r#"{"total_results":2,"resources":[
            {"metadata":{"guid":"r1"},"entity":{"host":"my-app","domain":{"metadata":{"guid":"d1"},"entity":{"name":"other-org.example.com"}}}},
            {"metadata":{"guid":"r2"},"entity":{"host":"my-app","domain":{"metadata":{"guid":"d2"},"entity":{"name":"apps.example.com"}}}}
        ]}"#;
        let cf = client(FakeRunner::default().with_response(foreign));

        cf.map_route("my-app-g1", &route("apps.example.com"))?;

        assert_eq!(
            cf.runner().calls(),
            vec![args(&[
                "map-route",
                "my-app-g1",
                "apps.example.com",
                "-n",
                "my-app",
            ])]
        );
        Ok(())
    }

    #[test]
    fn live_route_moves_with_its_own_domain() -> anyhow::Result<()> {
        let cf = client(
            FakeRunner::default()
                .with_response(APPS)
                .with_response(ROUTES),
        );

        let live = cf.app_route("my-app")?;
        cf.map_route("my-app-g1", &live)?;
        cf.unmap_route("my-app", &live)?;

        let calls = cf.runner().calls();
        assert_eq!(
            calls[2..],
            [
                args(&["map-route", "my-app-g1", "apps.example.com", "-n", "my-app"]),
                args(&["unmap-route", "my-app", "apps.example.com", "-n", "my-app"]),
            ]
        );
        assert!(
            calls
                .iter()
                .all(|call| !call.iter().any(|arg| arg.starts_with("v2/routes")))
        );
        Ok(())
    }

    #[test]
    fn map_route_returns_errors() {
        let cf = client(FakeRunner::default().failing("map-route", "route taken"));

        let err = cf
            .map_route("my-app-g1", &route("apps.example.com"))
            .expect_err("should fail");

        assert!(err.to_string().contains("route taken"));
    }
}
