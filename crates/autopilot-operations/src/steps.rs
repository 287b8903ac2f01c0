//! The steps rollout plans are assembled from.
//!
//! Push steps share a [`RolloutContext`], rollback steps a [`RollbackContext`].
//! A compensation reverses the step before its own, never the step itself.

use std::marker::PhantomData;

use autopilot_rewind::RewindStep;
use tracing::{debug, warn};

use crate::OperationError;
use crate::context::{RollbackContext, RolloutContext};
use crate::naming::{Generation, generation_app_name};
use crate::traits::{AppRoute, RemoteOperations};

/// Delete a live app that is not running. Leads in a zero-downtime push.
pub struct DeleteLiveAppStep<R> {
    venerable_exists: bool,
    _marker: PhantomData<R>,
}

impl<R> DeleteLiveAppStep<R> {
    /// `venerable_exists` seeds the clean-up flag: a venerable app left over
    /// from an earlier run is restored or removed like a fresh one.
    #[must_use]
    pub fn new(venerable_exists: bool) -> Self {
        Self {
            venerable_exists,
            _marker: PhantomData,
        }
    }
}

impl<R: RemoteOperations> RewindStep for DeleteLiveAppStep<R> {
    type Context = R;
    type State = RolloutContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "delete_live_app"
    }

    fn forward(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        state.have_venerable_to_clean_up = self.venerable_exists;
        remote.delete_application(&state.app_name)?;
        debug!(app = %state.app_name, "deleted unstarted live app");
        Ok(())
    }
}

/// Delete a venerable app left behind by an earlier push.
pub struct DeleteStaleVenerableStep<R> {
    _marker: PhantomData<R>,
}

impl<R> DeleteStaleVenerableStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for DeleteStaleVenerableStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RemoteOperations> RewindStep for DeleteStaleVenerableStep<R> {
    type Context = R;
    type State = RolloutContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "delete_stale_venerable"
    }

    fn forward(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        remote.delete_application(&state.venerable_name)?;
        debug!(app = %state.venerable_name, "deleted stale venerable app");
        Ok(())
    }
}

/// Move the live app out of the way so the new version can take its name.
pub struct RenameLiveToVenerableStep<R> {
    _marker: PhantomData<R>,
}

impl<R> RenameLiveToVenerableStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for RenameLiveToVenerableStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RemoteOperations> RewindStep for RenameLiveToVenerableStep<R> {
    type Context = R;
    type State = RolloutContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "rename_live_to_venerable"
    }

    fn forward(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        remote.rename_application(&state.app_name, &state.venerable_name)?;
        state.have_venerable_to_clean_up = true;
        debug!(
            app = %state.app_name,
            venerable = %state.venerable_name,
            "moved live app aside"
        );
        Ok(())
    }
}

/// Push the new version under the live name.
///
/// When it replaces an existing app, a failed push deletes whatever was
/// half-created and renames the parked previous version back.
pub struct PushAppStep<R> {
    start_separately: bool,
    rewindable: bool,
    _marker: PhantomData<R>,
}

impl<R> PushAppStep<R> {
    /// Push with nothing to restore on failure.
    #[must_use]
    pub fn new_app(start_separately: bool) -> Self {
        Self {
            start_separately,
            rewindable: false,
            _marker: PhantomData,
        }
    }

    /// Push in place of an app the lead-in step moved aside.
    #[must_use]
    pub fn replacing(start_separately: bool) -> Self {
        Self {
            start_separately,
            rewindable: true,
            _marker: PhantomData,
        }
    }
}

impl<R: RemoteOperations> RewindStep for PushAppStep<R> {
    type Context = R;
    type State = RolloutContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "push"
    }

    fn forward(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        remote.push_application(
            &state.app_name,
            &state.manifest_path,
            state.app_path.as_deref(),
            self.start_separately,
        )?;
        if self.start_separately {
            remote.start_application(&state.app_name)?;
        }
        debug!(app = %state.app_name, "pushed new version");
        Ok(())
    }

    fn has_compensation(&self) -> bool {
        self.rewindable
    }

    fn compensate(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        if !state.have_venerable_to_clean_up {
            debug!(app = %state.app_name, "no previous version to restore");
            return Ok(());
        }

        // The push may have failed before the app was created.
        if let Err(e) = remote.delete_application(&state.app_name) {
            warn!(app = %state.app_name, error = %e, "could not delete half-pushed app");
        }
        remote.rename_application(&state.venerable_name, &state.app_name)?;
        debug!(
            app = %state.app_name,
            venerable = %state.venerable_name,
            "restored previous version"
        );
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "delete the half-pushed app and restore the previous version".to_string()
    }
}

/// Delete the parked previous version once the new one is up.
pub struct DeleteVenerableStep<R> {
    _marker: PhantomData<R>,
}

impl<R> DeleteVenerableStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for DeleteVenerableStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RemoteOperations> RewindStep for DeleteVenerableStep<R> {
    type Context = R;
    type State = RolloutContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "delete_venerable"
    }

    fn forward(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        if !state.have_venerable_to_clean_up {
            debug!(app = %state.app_name, "no venerable app to delete");
            return Ok(());
        }
        remote.delete_application(&state.venerable_name)?;
        debug!(app = %state.venerable_name, "deleted venerable app");
        Ok(())
    }
}

/// Shift retained generations down one slot and park the live app as `-g1`.
pub struct RotateGenerationsStep<R> {
    generation_one_exists: bool,
    generation_two_exists: bool,
    _marker: PhantomData<R>,
}

impl<R> RotateGenerationsStep<R> {
    #[must_use]
    pub fn new(generation_one_exists: bool, generation_two_exists: bool) -> Self {
        Self {
            generation_one_exists,
            generation_two_exists,
            _marker: PhantomData,
        }
    }
}

impl<R: RemoteOperations> RewindStep for RotateGenerationsStep<R> {
    type Context = R;
    type State = RolloutContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "rotate_generations"
    }

    fn forward(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        let generation_two = generation_app_name(&state.app_name, Generation::G2);

        if self.generation_two_exists {
            remote.delete_application(&generation_two)?;
        }
        if self.generation_one_exists {
            remote.rename_application(&state.venerable_name, &generation_two)?;
        }
        remote.rename_application(&state.app_name, &state.venerable_name)?;
        state.have_venerable_to_clean_up = true;

        debug!(
            app = %state.app_name,
            dropped_oldest = self.generation_two_exists,
            shifted = self.generation_one_exists,
            "rotated generations"
        );
        Ok(())
    }
}

/// Take the live route off the previous generation and stop it.
pub struct RetirePreviousGenerationStep<R> {
    _marker: PhantomData<R>,
}

impl<R> RetirePreviousGenerationStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for RetirePreviousGenerationStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RemoteOperations> RewindStep for RetirePreviousGenerationStep<R> {
    type Context = R;
    type State = RolloutContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "retire_previous_generation"
    }

    fn forward(&self, remote: &R, state: &mut RolloutContext) -> Result<(), OperationError> {
        if !state.have_venerable_to_clean_up {
            return Ok(());
        }
        let route = live_route_of(remote, &state.app_name)?;
        remote.unmap_route(&state.venerable_name, &route)?;
        remote.stop_application(&state.venerable_name)?;
        debug!(app = %state.venerable_name, host = %route.host, "retired previous generation");
        Ok(())
    }
}

/// Start the generation a rollback returns to.
pub struct StartGenerationStep<R> {
    _marker: PhantomData<R>,
}

impl<R> StartGenerationStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for StartGenerationStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RemoteOperations> RewindStep for StartGenerationStep<R> {
    type Context = R;
    type State = RollbackContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "start_generation"
    }

    fn forward(&self, remote: &R, state: &mut RollbackContext) -> Result<(), OperationError> {
        remote.start_application(&state.generation_name)?;
        debug!(app = %state.generation_name, "started generation");
        Ok(())
    }
}

/// Map the live route onto the generation, then unmap it from the live app.
pub struct MoveRouteStep<R> {
    _marker: PhantomData<R>,
}

impl<R> MoveRouteStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for MoveRouteStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RemoteOperations> RewindStep for MoveRouteStep<R> {
    type Context = R;
    type State = RollbackContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "move_route"
    }

    fn forward(&self, remote: &R, state: &mut RollbackContext) -> Result<(), OperationError> {
        let route = live_route_of(remote, &state.app_name)?;
        remote.map_route(&state.generation_name, &route)?;
        remote.unmap_route(&state.app_name, &route)?;
        debug!(
            from = %state.app_name,
            to = %state.generation_name,
            host = %route.host,
            domain = %route.domain,
            "moved route"
        );
        state.host_name = Some(route.host);
        Ok(())
    }
}

/// Exchange the names of the live app and the generation.
pub struct SwapNamesStep<R> {
    _marker: PhantomData<R>,
}

impl<R> SwapNamesStep<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<R> Default for SwapNamesStep<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RemoteOperations> RewindStep for SwapNamesStep<R> {
    type Context = R;
    type State = RollbackContext;
    type Error = OperationError;

    fn name(&self) -> &'static str {
        "swap_names"
    }

    fn forward(&self, remote: &R, state: &mut RollbackContext) -> Result<(), OperationError> {
        remote.swap_applications(&state.app_name, &state.generation_name)?;
        debug!(
            app = %state.app_name,
            generation = %state.generation_name,
            "swapped names"
        );
        Ok(())
    }
}

fn live_route_of<R: RemoteOperations>(
    remote: &R,
    app_name: &str,
) -> Result<AppRoute, OperationError> {
    remote
        .get_app_route(app_name)
        .map_err(|source| OperationError::HostNameUnavailable {
            name: app_name.to_string(),
            source: Box::new(source),
        })
}
