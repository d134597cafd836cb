//! Built-in Kubernetes health-check responses.
//!
//! Kubernetes asks two questions. plinth answers them.
//!
//! | Probe | Conventional path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! There is no router to register these on — call them from the matching
//! arm of your handler:
//!
//! ```rust,no_run
//! use plinth::{health, Request, Rendered, Response};
//!
//! async fn handle(req: Request) -> Rendered {
//!     match req.path_segments().as_slice() {
//!         ["healthz"] => health::liveness(),
//!         ["readyz"]  => health::readiness(),
//!         _ => Response::new(404).render(),
//!     }
//! }
//! ```
//!
//! Replace the readiness arm with your own logic if traffic must be gated on
//! dependency availability (database connections, downstream services).

use crate::response::{Rendered, Response};

/// Liveness probe response: `200 OK`, body `"ok"`.
///
/// If the process can produce this at all, it is alive — intentionally
/// dependency-free.
pub fn liveness() -> Rendered {
    Response::ok_with(|r| {
        r.text("ok");
    })
    .render()
}

/// Default readiness probe response: `200 OK`, body `"ready"`.
///
/// Substitute your own arm if the application needs a warm-up period or must
/// verify dependency health before accepting traffic.
pub fn readiness() -> Rendered {
    Response::ok_with(|r| {
        r.text("ready");
    })
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probes_answer_200() {
        assert_eq!(liveness().status(), 200);
        assert_eq!(readiness().status(), 200);
    }
}
