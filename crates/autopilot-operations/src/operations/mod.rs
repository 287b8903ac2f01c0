mod blue_green;
mod rollback;
mod zero_downtime;

pub use blue_green::{BlueGreenPushInput, BlueGreenPushOperation, BlueGreenPushOutput};
pub use rollback::{BlueGreenRollbackInput, BlueGreenRollbackOperation, BlueGreenRollbackOutput};
pub use zero_downtime::{ZeroDowntimePushInput, ZeroDowntimePushOperation, ZeroDowntimePushOutput};

use autopilot_rewind::{Outcome, Plan};
use tracing::{debug, warn};

use crate::traits::RemoteOperations;
use crate::{OperationError, Result};

/// Run a plan and return the names of the steps it ran.
fn run_plan<R, S>(plan: &Plan<R, S, OperationError>, remote: &R, state: &mut S) -> Result<Vec<String>> {
    let (result, audit_log) = plan.execute_with_audit(remote, state);
    debug!(outcome = ?Outcome::of(&result), steps = %audit_log.summary(), "plan finished");
    result?;
    Ok(audit_log
        .records()
        .iter()
        .map(|record| record.name.clone())
        .collect())
}

/// Show the apps in the space. A failed listing is logged, not returned.
fn list_applications<R: RemoteOperations>(remote: &R) -> bool {
    match remote.list_applications() {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "could not list applications");
            false
        }
    }
}
