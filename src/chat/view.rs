//! The chat view controller.
//!
//! `ChatView` owns the conversation and the draft query and turns a submit
//! into one request to the agent plus one appended reply.  It knows nothing
//! about terminals; a front end feeds it keystrokes and renders what it holds.

use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll, ready};

use futures::FutureExt;
use tokio::task::JoinHandle;

use crate::client::Agent;
use crate::observability::{
    CHAT_BLANK_SUBMISSIONS, CHAT_ERROR_REPLIES, CHAT_FALLBACK_REPLIES, CHAT_SUBMISSIONS,
};
use crate::types::{
    AGENT_ERROR_TEXT, Conversation, Message, NO_RESPONSE_TEXT, is_blank, response_text,
};

#[derive(Debug, Default)]
struct ViewState {
    conversation: Conversation,
    draft: String,
}

/// State container for one chat window.
///
/// Clones share the same conversation and draft.  Nothing stops a second
/// submission while an earlier one is still waiting on the agent; replies are
/// appended in the order they arrive.
pub struct ChatView<A: Agent> {
    agent: Arc<A>,
    state: Arc<Mutex<ViewState>>,
}

impl<A: Agent> Clone for ChatView<A> {
    fn clone(&self) -> Self {
        Self {
            agent: Arc::clone(&self.agent),
            state: Arc::clone(&self.state),
        }
    }
}

impl<A: Agent + 'static> ChatView<A> {
    /// Creates an empty view that talks to `agent`.
    pub fn new(agent: A) -> Self {
        Self::with_shared_agent(Arc::new(agent))
    }

    /// Creates an empty view around an agent that is shared elsewhere.
    pub fn with_shared_agent(agent: Arc<A>) -> Self {
        Self {
            agent,
            state: Arc::new(Mutex::new(ViewState::default())),
        }
    }

    /// Replaces the draft query.  No validation is applied.
    pub fn set_draft(&self, value: impl Into<String>) {
        self.lock().draft = value.into();
    }

    /// Returns the current draft query.
    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    /// Returns a snapshot of the conversation in display order.
    pub fn messages(&self) -> Vec<Message> {
        self.lock().conversation.as_slice().to_vec()
    }

    /// Returns a snapshot of the conversation.
    pub fn conversation(&self) -> Conversation {
        self.lock().conversation.clone()
    }

    /// Returns the number of messages in the conversation.
    pub fn message_count(&self) -> usize {
        self.lock().conversation.len()
    }

    /// Submits the draft query.
    ///
    /// A draft that is blank by [`is_blank`] is ignored: nothing is appended,
    /// nothing is sent and the draft is left as it was.  Otherwise the
    /// untrimmed draft is appended as a user message and the request is
    /// started on the Tokio runtime before this returns.
    ///
    /// Once the agent answers, the reply (or the generic error text) is
    /// appended and the draft is cleared.  The returned [`PendingReply`] only
    /// observes that; dropping it does not stop the request.
    ///
    /// # Panics
    ///
    /// Panics if called from outside a Tokio runtime.
    pub fn submit(&self) -> Option<PendingReply> {
        let query = {
            let mut state = self.lock();
            if is_blank(&state.draft) {
                CHAT_BLANK_SUBMISSIONS.click();
                return None;
            }
            let query = state.draft.clone();
            state.conversation.push(Message::user(query.clone()));
            query
        };
        CHAT_SUBMISSIONS.click();
        tracing::debug!(%query, "query submitted");

        let agent = Arc::clone(&self.agent);
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let outcome = AssertUnwindSafe(agent.query(&query)).catch_unwind().await;
            let reply = match outcome {
                Ok(Ok(body)) => match response_text(&body) {
                    Some(text) => Message::bot(text),
                    None => {
                        CHAT_FALLBACK_REPLIES.click();
                        tracing::debug!(%body, "agent reply has no usable response field");
                        Message::bot(NO_RESPONSE_TEXT)
                    }
                },
                Ok(Err(err)) => {
                    CHAT_ERROR_REPLIES.click();
                    tracing::warn!(error = %err, "error contacting agent");
                    Message::bot(AGENT_ERROR_TEXT)
                }
                Err(_) => {
                    CHAT_ERROR_REPLIES.click();
                    tracing::error!("agent panicked while answering a query");
                    Message::bot(AGENT_ERROR_TEXT)
                }
            };

            let mut state = lock_state(&state);
            state.conversation.push(reply.clone());
            state.draft.clear();
            reply
        });

        Some(PendingReply { handle })
    }

    fn lock(&self) -> MutexGuard<'_, ViewState> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    // Every critical section leaves the state consistent, so a poisoned lock
    // is still safe to use.
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A submission waiting on the agent.
///
/// Resolves to the bot message that was appended to the conversation.  The
/// request runs on its own task, so dropping this detaches it.
pub struct PendingReply {
    handle: JoinHandle<Message>,
}

impl Future for PendingReply {
    type Output = Message;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match ready!(Pin::new(&mut self.handle).poll(cx)) {
            Ok(reply) => Poll::Ready(reply),
            Err(err) => {
                // Only reachable when the runtime shuts down under the task.
                tracing::warn!(error = %err, "reply task did not finish");
                Poll::Ready(Message::bot(AGENT_ERROR_TEXT))
            }
        }
    }
}
