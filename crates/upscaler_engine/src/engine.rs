use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::{select, Either};
use futures_util::pin_mut;
use tokio_util::sync::CancellationToken;
use upscaler_logging::{upscaler_debug, upscaler_info, upscaler_warn};

use crate::client::{ReqwestUpscaleClient, UpscaleClient, UpscaleSettings};
use crate::timer::sleep;
use crate::{FailureKind, RequestId, UpscaleError, UpscaleRequest, UpscaleResponse};

struct InFlight {
    request_id: RequestId,
    token: CancellationToken,
}

/// A registered request waiting for [`UpscaleEngine::send`].
#[derive(Debug)]
pub struct UpscaleTicket {
    request_id: RequestId,
    token: CancellationToken,
}

impl UpscaleTicket {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Runs upscale requests one at a time, each bounded by a deadline and
/// abortable by id.
///
/// Starting a new request cancels whatever was still running.
pub struct UpscaleEngine {
    client: Arc<dyn UpscaleClient>,
    request_timeout: Duration,
    in_flight: Mutex<Option<InFlight>>,
}

impl UpscaleEngine {
    pub fn new(settings: UpscaleSettings) -> Result<Self, UpscaleError> {
        let request_timeout = settings.request_timeout;
        let client = ReqwestUpscaleClient::new(settings)?;
        Ok(Self::with_client(Arc::new(client), request_timeout))
    }

    pub fn with_client(client: Arc<dyn UpscaleClient>, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
            in_flight: Mutex::new(None),
        }
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.lock().as_ref().map(|in_flight| in_flight.request_id)
    }

    /// Cancels `request_id` if it is the one running. Returns whether it was.
    pub fn cancel(&self, request_id: RequestId) -> bool {
        let mut slot = self.lock();
        match slot.as_ref() {
            Some(in_flight) if in_flight.request_id == request_id => {
                upscaler_info!("Cancelling upscale request {}", request_id);
                in_flight.token.cancel();
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Registers `request_id` as the running request, cancelling any other.
    ///
    /// From here on [`UpscaleEngine::cancel`] can reach the request, even
    /// while its payload is still being read.
    pub fn begin(&self, request_id: RequestId) -> UpscaleTicket {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock().replace(InFlight {
            request_id,
            token: token.clone(),
        }) {
            upscaler_warn!(
                "Request {} superseded by {}",
                previous.request_id,
                request_id
            );
            previous.token.cancel();
        }
        UpscaleTicket { request_id, token }
    }

    pub async fn run(
        &self,
        request_id: RequestId,
        request: UpscaleRequest,
    ) -> Result<UpscaleResponse, UpscaleError> {
        let ticket = self.begin(request_id);
        self.send(ticket, async move { Ok::<_, UpscaleError>(request) }).await
    }

    /// Awaits `payload`, then uploads it, unless the ticket is cancelled or the
    /// deadline passes first. Nothing reaches the backend once cancelled.
    pub async fn send<F>(
        &self,
        ticket: UpscaleTicket,
        payload: F,
    ) -> Result<UpscaleResponse, UpscaleError>
    where
        F: Future<Output = Result<UpscaleRequest, UpscaleError>>,
    {
        let UpscaleTicket { request_id, token } = ticket;
        let outcome = if token.is_cancelled() {
            Err(cancelled(request_id))
        } else {
            let work = async {
                let request = payload.await?;
                if token.is_cancelled() {
                    return Err(cancelled(request_id));
                }
                self.client.upscale(&request).await
            };
            let stop = token.cancelled();
            let deadline = sleep(self.request_timeout);
            pin_mut!(work, stop, deadline);

            match select(work, select(stop, deadline)).await {
                Either::Left((result, _)) => result,
                Either::Right((Either::Left(_), _)) => Err(cancelled(request_id)),
                Either::Right((Either::Right(_), _)) => Err(UpscaleError::new(
                    FailureKind::Timeout,
                    format!("no answer within {}s", self.request_timeout.as_secs()),
                )),
            }
        };

        self.finish(request_id);
        match &outcome {
            Ok(response) => upscaler_debug!("Request {} produced {}", request_id, response.url),
            Err(err) => upscaler_warn!("Request {} failed: {}", request_id, err),
        }
        outcome
    }

    fn finish(&self, request_id: RequestId) {
        let mut slot = self.lock();
        if slot
            .as_ref()
            .is_some_and(|in_flight| in_flight.request_id == request_id)
        {
            *slot = None;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<InFlight>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn cancelled(request_id: RequestId) -> UpscaleError {
    UpscaleError::new(
        FailureKind::Cancelled,
        format!("request {request_id} cancelled"),
    )
}
