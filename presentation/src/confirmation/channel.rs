//! Channel-based ToolConfirmationHandler
//!
//! Instead of blocking on stdin, sends a [`ConfirmationRequest`] through a
//! channel to whichever task owns the terminal, which shows the dialog and
//! sends back the decision.

use async_trait::async_trait;
use insight_bridge_application::{ConfirmationError, ToolConfirmationHandler};
use insight_bridge_domain::{ToolContext, ToolDescriptor, ToolRequest, ToolUserDecision};
use tokio::sync::{mpsc, oneshot};

/// A question waiting for a human answer
#[derive(Debug)]
pub struct ConfirmationRequest {
    pub descriptor: ToolDescriptor,
    pub request: ToolRequest,
    pub reply: oneshot::Sender<ToolUserDecision>,
}

/// Sends confirmation requests to the UI owner via mpsc,
/// then awaits the decision on a oneshot channel.
pub struct ChannelConfirmationHandler {
    tx: mpsc::UnboundedSender<ConfirmationRequest>,
}

impl ChannelConfirmationHandler {
    pub fn new(tx: mpsc::UnboundedSender<ConfirmationRequest>) -> Self {
        Self { tx }
    }

    /// Handler plus the receiving end the UI owner serves
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ConfirmationRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl ToolConfirmationHandler for ChannelConfirmationHandler {
    async fn confirm(
        &self,
        descriptor: &ToolDescriptor,
        request: &ToolRequest,
        _context: &ToolContext,
    ) -> Result<ToolUserDecision, ConfirmationError> {
        let (reply, answer) = oneshot::channel();

        self.tx
            .send(ConfirmationRequest {
                descriptor: descriptor.clone(),
                request: request.clone(),
                reply,
            })
            .map_err(|_| ConfirmationError::Unavailable)?;

        answer.await.map_err(|_| ConfirmationError::Abandoned)
    }
}
