use biometrics::{Collector, Counter, Moments};

pub(crate) static CHAT_SUBMISSIONS: Counter = Counter::new("agent_chat.view.submissions");
pub(crate) static CHAT_BLANK_SUBMISSIONS: Counter =
    Counter::new("agent_chat.view.blank_submissions");
pub(crate) static CHAT_FALLBACK_REPLIES: Counter =
    Counter::new("agent_chat.view.fallback_replies");
pub(crate) static CHAT_ERROR_REPLIES: Counter = Counter::new("agent_chat.view.error_replies");

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("agent_chat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter =
    Counter::new("agent_chat.client.request_errors");
pub(crate) static CLIENT_NON_SUCCESS_STATUS: Counter =
    Counter::new("agent_chat.client.non_success_status");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("agent_chat.client.request_duration_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CHAT_SUBMISSIONS);
    collector.register_counter(&CHAT_BLANK_SUBMISSIONS);
    collector.register_counter(&CHAT_FALLBACK_REPLIES);
    collector.register_counter(&CHAT_ERROR_REPLIES);

    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_NON_SUCCESS_STATUS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);
}
