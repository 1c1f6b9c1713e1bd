//! Structured conversion of Bedrock agent traces
//!
//! The SDK types carry no serde support, so each trace variant is mapped to
//! JSON by hand, keyed the way the service's wire format keys them. Absent
//! fields are left out.

use aws_sdk_bedrockagentruntime::types::{
    ActionGroupInvocationInput, FailureTrace, GuardrailTrace, InvocationInput,
    KnowledgeBaseLookupInput, ModelInvocationInput, Observation, OrchestrationModelInvocationOutput,
    OrchestrationTrace, PostProcessingModelInvocationOutput, PostProcessingTrace,
    PreProcessingModelInvocationOutput, PreProcessingTrace, Rationale, RawResponse, Trace, TracePart,
};
use serde_json::{json, Value};

/// Payload of one trace event: agent/session metadata plus the trace itself
pub(super) fn trace_payload(part: &TracePart) -> Value {
    prune_nulls(json!({
        "agentId": part.agent_id(),
        "agentAliasId": part.agent_alias_id(),
        "agentVersion": part.agent_version(),
        "sessionId": part.session_id(),
        "trace": part.trace().map(trace_to_json),
    }))
}

pub(super) fn trace_to_json(trace: &Trace) -> Value {
    match trace {
        Trace::FailureTrace(failure) => json!({ "failureTrace": failure_trace(failure) }),
        Trace::GuardrailTrace(guardrail) => json!({ "guardrailTrace": guardrail_trace(guardrail) }),
        Trace::OrchestrationTrace(orchestration) => {
            json!({ "orchestrationTrace": orchestration_trace(orchestration) })
        }
        Trace::PreProcessingTrace(pre) => json!({ "preProcessingTrace": pre_processing_trace(pre) }),
        Trace::PostProcessingTrace(post) => {
            json!({ "postProcessingTrace": post_processing_trace(post) })
        }
        // Trace kinds this client does not map yet
        _ => json!({ "unknown": {} }),
    }
}

fn failure_trace(failure: &FailureTrace) -> Value {
    json!({
        "traceId": failure.trace_id(),
        "failureReason": failure.failure_reason(),
    })
}

fn guardrail_trace(guardrail: &GuardrailTrace) -> Value {
    json!({
        "traceId": guardrail.trace_id(),
        "action": guardrail.action().map(|action| action.as_str()),
    })
}

fn orchestration_trace(trace: &OrchestrationTrace) -> Value {
    match trace {
        OrchestrationTrace::Rationale(rationale) => json!({ "rationale": rationale_json(rationale) }),
        OrchestrationTrace::InvocationInput(input) => {
            json!({ "invocationInput": invocation_input(input) })
        }
        OrchestrationTrace::Observation(observation) => {
            json!({ "observation": observation_json(observation) })
        }
        OrchestrationTrace::ModelInvocationInput(input) => {
            json!({ "modelInvocationInput": model_invocation_input(input) })
        }
        OrchestrationTrace::ModelInvocationOutput(output) => {
            json!({ "modelInvocationOutput": orchestration_output(output) })
        }
        _ => json!({ "unknown": {} }),
    }
}

fn pre_processing_trace(trace: &PreProcessingTrace) -> Value {
    match trace {
        PreProcessingTrace::ModelInvocationInput(input) => {
            json!({ "modelInvocationInput": model_invocation_input(input) })
        }
        PreProcessingTrace::ModelInvocationOutput(output) => {
            json!({ "modelInvocationOutput": pre_processing_output(output) })
        }
        _ => json!({ "unknown": {} }),
    }
}

fn post_processing_trace(trace: &PostProcessingTrace) -> Value {
    match trace {
        PostProcessingTrace::ModelInvocationInput(input) => {
            json!({ "modelInvocationInput": model_invocation_input(input) })
        }
        PostProcessingTrace::ModelInvocationOutput(output) => {
            json!({ "modelInvocationOutput": post_processing_output(output) })
        }
        _ => json!({ "unknown": {} }),
    }
}

fn rationale_json(rationale: &Rationale) -> Value {
    json!({
        "traceId": rationale.trace_id(),
        "text": rationale.text(),
    })
}

fn invocation_input(input: &InvocationInput) -> Value {
    json!({
        "traceId": input.trace_id(),
        "invocationType": input.invocation_type().map(|kind| kind.as_str()),
        "actionGroupInvocationInput": input.action_group_invocation_input().map(action_group_input),
        "knowledgeBaseLookupInput": input.knowledge_base_lookup_input().map(knowledge_base_input),
    })
}

fn action_group_input(input: &ActionGroupInvocationInput) -> Value {
    json!({
        "actionGroupName": input.action_group_name(),
        "verb": input.verb(),
        "apiPath": input.api_path(),
        "function": input.function(),
    })
}

fn knowledge_base_input(input: &KnowledgeBaseLookupInput) -> Value {
    json!({
        "text": input.text(),
        "knowledgeBaseId": input.knowledge_base_id(),
    })
}

fn observation_json(observation: &Observation) -> Value {
    json!({
        "traceId": observation.trace_id(),
        "type": observation.r#type().map(|kind| kind.as_str()),
        "finalResponse": observation.final_response().map(|r| json!({ "text": r.text() })),
        "actionGroupInvocationOutput": observation
            .action_group_invocation_output()
            .map(|output| json!({ "text": output.text() })),
        "repromptResponse": observation.reprompt_response().map(|r| json!({ "text": r.text() })),
    })
}

fn model_invocation_input(input: &ModelInvocationInput) -> Value {
    json!({
        "traceId": input.trace_id(),
        "type": input.r#type().map(|kind| kind.as_str()),
        "text": input.text(),
    })
}

fn raw_response(raw: &RawResponse) -> Value {
    json!({ "content": raw.content() })
}

fn orchestration_output(output: &OrchestrationModelInvocationOutput) -> Value {
    json!({
        "traceId": output.trace_id(),
        "rawResponse": output.raw_response().map(raw_response),
    })
}

fn pre_processing_output(output: &PreProcessingModelInvocationOutput) -> Value {
    json!({
        "traceId": output.trace_id(),
        "parsedResponse": output.parsed_response().map(|parsed| json!({
            "rationale": parsed.rationale(),
            "isValid": parsed.is_valid(),
        })),
        "rawResponse": output.raw_response().map(raw_response),
    })
}

fn post_processing_output(output: &PostProcessingModelInvocationOutput) -> Value {
    json!({
        "traceId": output.trace_id(),
        "parsedResponse": output.parsed_response().map(|parsed| json!({ "text": parsed.text() })),
        "rawResponse": output.raw_response().map(raw_response),
    })
}

/// Drop `null` members from objects, recursively
fn prune_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, prune_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(prune_nulls).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_trace_keeps_reason() {
        let failure = FailureTrace::builder()
            .trace_id("trace-1")
            .failure_reason("Action group Lambda timed out")
            .build();
        let part = TracePart::builder()
            .agent_id("A1")
            .session_id("s1")
            .trace(Trace::FailureTrace(failure))
            .build();

        let payload = trace_payload(&part);
        assert_eq!(
            payload["trace"]["failureTrace"]["failureReason"],
            "Action group Lambda timed out"
        );
        assert_eq!(payload["trace"]["failureTrace"]["traceId"], "trace-1");
        assert_eq!(payload["agentId"], "A1");
        assert!(payload.get("agentAliasId").is_none());
    }

    #[test]
    fn test_orchestration_rationale() {
        let rationale = Rationale::builder()
            .trace_id("trace-2")
            .text("The user wants the weather, call the forecast action")
            .build();
        let trace = Trace::OrchestrationTrace(OrchestrationTrace::Rationale(rationale));

        assert_eq!(
            trace_to_json(&trace),
            json!({
                "orchestrationTrace": {
                    "rationale": {
                        "traceId": "trace-2",
                        "text": "The user wants the weather, call the forecast action"
                    }
                }
            })
        );
    }

    #[test]
    fn test_part_without_trace_has_metadata_only() {
        let part = TracePart::builder().session_id("s1").build();
        assert_eq!(trace_payload(&part), json!({ "sessionId": "s1" }));
    }

    #[test]
    fn test_prune_nulls_is_recursive() {
        let value = json!({"a": null, "b": {"c": null, "d": 1}, "e": [{"f": null}]});
        assert_eq!(prune_nulls(value), json!({"b": {"d": 1}, "e": [{}]}));
    }
}
