//! Choosing the steps of a rollout from the observed remote state.

use std::fmt;

use autopilot_rewind::{Plan, PlanBuilder};

use crate::OperationError;
use crate::context::{RollbackContext, RolloutContext};
use crate::steps::{
    DeleteLiveAppStep, DeleteStaleVenerableStep, DeleteVenerableStep, MoveRouteStep, PushAppStep,
    RenameLiveToVenerableStep, RetirePreviousGenerationStep, RotateGenerationsStep,
    StartGenerationStep, SwapNamesStep,
};
use crate::traits::{AppMetadata, RemoteOperations};

/// Shown in front of the compensation error when a rewind fails.
pub const REWIND_FAILURE_MESSAGE: &str = "Oh no. Something's gone wrong. I've tried to roll back but you should check to see if everything is OK.";

pub type RolloutPlan<R> = Plan<R, RolloutContext, OperationError>;
pub type RollbackPlan<R> = Plan<R, RollbackContext, OperationError>;

/// Starting condition of a zero-downtime push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroDowntimeScenario {
    /// No live app: push it.
    NewApp,
    /// The live app exists but is not running: delete it, then push.
    ReplaceUnstarted { venerable_exists: bool },
    /// The live app is running: park it as venerable, push, then delete it.
    ReplaceStarted { venerable_exists: bool },
}

impl ZeroDowntimeScenario {
    /// `live_app` is `None` when no live app exists or its metadata could not
    /// be found.
    #[must_use]
    pub fn decide(live_app: Option<&AppMetadata>, venerable_exists: bool) -> Self {
        match live_app {
            None => Self::NewApp,
            Some(app) if app.is_started() => Self::ReplaceStarted { venerable_exists },
            Some(_) => Self::ReplaceUnstarted { venerable_exists },
        }
    }
}

impl fmt::Display for ZeroDowntimeScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewApp => f.write_str("new app"),
            Self::ReplaceUnstarted { .. } => f.write_str("replace unstarted app"),
            Self::ReplaceStarted { .. } => f.write_str("replace started app"),
        }
    }
}

/// Starting condition of a blue/green push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlueGreenScenario {
    NewApp,
    Rotate {
        generation_one_exists: bool,
        generation_two_exists: bool,
    },
}

impl BlueGreenScenario {
    #[must_use]
    pub fn decide(live_exists: bool, generation_one_exists: bool, generation_two_exists: bool) -> Self {
        if live_exists {
            Self::Rotate {
                generation_one_exists,
                generation_two_exists,
            }
        } else {
            Self::NewApp
        }
    }
}

impl fmt::Display for BlueGreenScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewApp => f.write_str("new app"),
            Self::Rotate { .. } => f.write_str("rotate generations"),
        }
    }
}

/// Steps of a zero-downtime push. With `keep_old_app` the parked previous
/// version is left in place instead of being deleted at the end.
#[must_use]
pub fn zero_downtime_plan<R>(scenario: ZeroDowntimeScenario, keep_old_app: bool) -> RolloutPlan<R>
where
    R: RemoteOperations + 'static,
{
    let builder: PlanBuilder<R, RolloutContext, OperationError> =
        PlanBuilder::new().rewind_failure_message(REWIND_FAILURE_MESSAGE);

    match scenario {
        ZeroDowntimeScenario::NewApp => builder.step(PushAppStep::<R>::new_app(true)).build(),
        ZeroDowntimeScenario::ReplaceUnstarted { venerable_exists } => {
            // Without a venerable app the deleted live app cannot be brought back.
            let push = if venerable_exists {
                PushAppStep::<R>::replacing(true)
            } else {
                PushAppStep::<R>::new_app(true)
            };
            builder
                .step(DeleteLiveAppStep::<R>::new(venerable_exists))
                .step(push)
                .step_if(!keep_old_app, DeleteVenerableStep::<R>::new())
                .build()
        }
        ZeroDowntimeScenario::ReplaceStarted { venerable_exists } => builder
            .step_if(venerable_exists, DeleteStaleVenerableStep::<R>::new())
            .step(RenameLiveToVenerableStep::<R>::new())
            .step(PushAppStep::<R>::replacing(true))
            .step_if(!keep_old_app, DeleteVenerableStep::<R>::new())
            .build(),
    }
}

#[must_use]
pub fn blue_green_plan<R>(scenario: BlueGreenScenario) -> RolloutPlan<R>
where
    R: RemoteOperations + 'static,
{
    let builder: PlanBuilder<R, RolloutContext, OperationError> =
        PlanBuilder::new().rewind_failure_message(REWIND_FAILURE_MESSAGE);

    match scenario {
        BlueGreenScenario::NewApp => builder.step(PushAppStep::<R>::new_app(false)).build(),
        BlueGreenScenario::Rotate {
            generation_one_exists,
            generation_two_exists,
        } => builder
            .step(RotateGenerationsStep::<R>::new(
                generation_one_exists,
                generation_two_exists,
            ))
            .step(PushAppStep::<R>::replacing(false))
            .step(RetirePreviousGenerationStep::<R>::new())
            .build(),
    }
}

/// Steps of a rollback. None of them can be compensated.
#[must_use]
pub fn rollback_plan<R>() -> RollbackPlan<R>
where
    R: RemoteOperations + 'static,
{
    PlanBuilder::new()
        .step(StartGenerationStep::<R>::new())
        .step(MoveRouteStep::<R>::new())
        .step(SwapNamesStep::<R>::new())
        .build()
}
