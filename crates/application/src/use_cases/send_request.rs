//! Send request use case.

use courier_domain::{Environment, ProxyResponse, RequestDraft, ResolvedRequest, generate_id};
use tracing::{Instrument, info, info_span, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::pipeline::resolve_request;
use crate::ports::{ApiBackend, AuthToken};

/// Result of one send.
#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    /// Time-ordered id tagging this send in the logs.
    pub send_id: String,
    /// The payload that went to the proxy.
    pub request: ResolvedRequest,
    /// What the proxy answered, including proxy-level failures.
    pub response: ProxyResponse,
}

/// Resolves the draft and sends it through the backend proxy.
pub struct SendRequest<'a, B: ApiBackend> {
    backend: &'a B,
}

impl<'a, B: ApiBackend> SendRequest<'a, B> {
    /// Creates a new `SendRequest` use case.
    #[must_use]
    pub const fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Executes the use case.
    ///
    /// Validation runs before anything leaves the process. The call is made
    /// once; there is no retry. Without a token the proxy is called
    /// unauthenticated.
    ///
    /// # Errors
    ///
    /// - `Domain(MissingUrl | InvalidBody)` if the draft does not resolve
    /// - `Backend` if the proxy could not be reached
    pub async fn execute(
        &self,
        draft: &RequestDraft,
        environment: Option<&Environment>,
        token: Option<&AuthToken>,
    ) -> ApplicationResult<SendOutcome> {
        let send_id = generate_id();
        let span = info_span!(
            "send",
            id = %send_id,
            method = %draft.template().method,
            environment = environment.map_or("none", |e| e.name.as_str()),
        );

        async move {
            let request = resolve_request(draft, environment)?;
            let response = self.backend.proxy(&request, token).await.inspect_err(|e| {
                warn!(error = %e, "proxy unreachable");
            })?;

            match &response {
                ProxyResponse::Success(ok) => {
                    info!(status = ok.status, time_ms = ok.time, "response received");
                }
                ProxyResponse::Failure { error } => warn!(%error, "proxy reported an error"),
            }

            Ok::<_, ApplicationError>(SendOutcome {
                send_id,
                request,
                response,
            })
        }
        .instrument(span)
        .await
    }
}
