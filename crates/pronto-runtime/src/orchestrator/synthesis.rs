//! Result synthesis.
//!
//! Specialist results are folded into one natural-language answer via the
//! configured LLM; when no backend is configured or the call fails, the
//! labeled block itself becomes the answer so the caller always gets the
//! underlying facts.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use pronto_llm::{LlmClient, LlmRequest};

use crate::types::AgentResult;

/// Render results as a labeled block, one line per specialist.
///
/// Successful slots carry their JSON payload; failed slots carry the error
/// text. Order follows the input slice, which follows plan order.
#[must_use]
pub fn labeled_block(results: &[AgentResult]) -> String {
    results
        .iter()
        .map(|result| {
            if result.success {
                let data = result.data.clone().unwrap_or(Value::Null);
                format!("[{}]: {data}", result.agent_name)
            } else {
                let error = result.error.as_deref().unwrap_or("unknown error");
                format!("[{}]: Error - {error}", result.agent_name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fold specialist results into one answer.
///
/// Tries the LLM first; any failure (including an unconfigured backend) or an
/// empty reply falls back to the labeled block with a count header. The
/// fallback is a valid answer, not an error.
pub async fn synthesize(
    llm: &Arc<dyn LlmClient>,
    request: &str,
    results: &[AgentResult],
) -> String {
    let block = labeled_block(results);
    let prompt = format!(
        "Original request: {request}\n\n\
         Agent responses:\n{block}\n\n\
         Synthesize these responses into a clear, unified answer."
    );

    match llm.generate(LlmRequest::new(prompt)).await {
        Ok(reply) if !reply.content.trim().is_empty() => reply.content,
        Ok(_) => {
            debug!("llm returned empty synthesis, using labeled fallback");
            fallback(results.len(), &block)
        }
        Err(err) => {
            debug!(error = %err, "llm synthesis unavailable, using labeled fallback");
            fallback(results.len(), &block)
        }
    }
}

fn fallback(count: usize, block: &str) -> String {
    format!("Based on analysis from {count} agents:\n\n{block}")
}
