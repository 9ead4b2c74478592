use chat2workers::conversion::messages::TOOL_USE_INSTRUCTIONS;
use chat2workers::models::chat::ChatCompletionRequest;
use chat2workers::models::workers::WorkersResponse;
use chat2workers::{convert_messages, convert_params, convert_tools, to_chat_response};
use serde_json::json;

fn parse_request(value: serde_json::Value) -> ChatCompletionRequest {
    serde_json::from_value(value).expect("request should deserialize")
}

#[test]
fn plain_exchange_round_trips_to_chat_completion() {
    let request = parse_request(json!({
        "model": "gpt-4o-mini",
        "messages": [{"role": "user", "content": "hi"}]
    }));

    let messages = convert_messages(&request.messages, false);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, "user");
    assert_eq!(messages[0].content, "hi");

    let result = WorkersResponse {
        response: Some("hello".into()),
        tool_calls: None,
    };
    let out = to_chat_response(&result, "gpt-4o-mini");

    assert_eq!(out.object, "chat.completion");
    assert_eq!(out.model, "gpt-4o-mini");
    let choice = &out.choices[0];
    assert_eq!(choice.message.content.as_deref(), Some("hello"));
    assert_eq!(choice.finish_reason, "stop");
    assert!(choice.message.tool_calls.is_none());
    assert_eq!(out.usage.prompt_tokens, 0);
    assert_eq!(out.usage.completion_tokens, 0);
    assert_eq!(out.usage.total_tokens, 0);
}

#[test]
fn tool_call_id_resolves_to_name_across_turns() {
    let request = parse_request(json!({
        "messages": [
            {"role": "user", "content": "look up x"},
            {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "c1",
                    "type": "function",
                    "function": {"name": "lookup", "arguments": "{\"q\":\"x\"}"}
                }]
            },
            {"role": "tool", "tool_call_id": "c1", "content": "result"}
        ]
    }));

    let messages = convert_messages(&request.messages, false);
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].role, "assistant");
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&messages[1].content).unwrap(),
        json!([{"name": "lookup", "arguments": {"q": "x"}}])
    );
    assert_eq!(messages[2].role, "tool");
    assert_eq!(messages[2].name.as_deref(), Some("lookup"));
    assert_eq!(messages[2].content, "result");
}

#[test]
fn tools_present_injects_instructions_and_flattens_declarations() {
    let request = parse_request(json!({
        "messages": [
            {"role": "system", "content": "Be terse."},
            {"role": "user", "content": "weather in Lisbon?"}
        ],
        "tools": [{
            "type": "function",
            "function": {
                "name": "get_weather",
                "description": "Current weather",
                "parameters": {"type": "object", "properties": {"city": {"type": "string"}}}
            }
        }]
    }));

    let tools_present = request.tools.as_deref().map(|t| !t.is_empty()).unwrap_or(false);
    let messages = convert_messages(&request.messages, tools_present);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].content.starts_with("Be terse."));
    assert!(messages[0].content.contains(TOOL_USE_INSTRUCTIONS));

    let tools = convert_tools(request.tools.as_deref().unwrap());
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "get_weather");
    assert_eq!(tools[0].description, "Current weather");
}

#[test]
fn generation_params_clamp_through_full_request() {
    let request = parse_request(json!({
        "messages": [{"role": "user", "content": "hi"}],
        "temperature": 10,
        "top_p": 2,
        "top_k": 0,
        "max_tokens": 0,
        "seed": 123.7
    }));

    let params = convert_params(&request.params);
    assert_eq!(params.temperature, Some(5.0));
    assert_eq!(params.top_p, Some(1.0));
    assert_eq!(params.top_k, Some(1));
    assert_eq!(params.max_tokens, Some(1));
    assert_eq!(params.seed, Some(123));
    // absent in input -> absent in output
    assert_eq!(params.frequency_penalty, None);
    assert_eq!(params.presence_penalty, None);
    assert_eq!(params.repetition_penalty, None);
    assert_eq!(params.lora, None);
}

#[test]
fn provider_tool_calls_become_string_encoded_arguments() {
    let result: WorkersResponse = serde_json::from_value(json!({
        "tool_calls": [{"name": "foo", "arguments": {"a": 1}}]
    }))
    .unwrap();

    let out = to_chat_response(&result, "m");
    let value = serde_json::to_value(&out).unwrap();
    let message = &value["choices"][0]["message"];

    assert!(message["content"].is_null());
    assert_eq!(value["choices"][0]["finish_reason"], "tool_calls");
    assert_eq!(
        message["tool_calls"][0]["function"]["arguments"],
        json!("{\"a\":1}")
    );
    assert_eq!(message["tool_calls"][0]["type"], json!("function"));
}

#[test]
fn unknown_request_fields_are_ignored() {
    // Streaming and tool_choice are accepted but not acted on.
    let request = parse_request(json!({
        "messages": [{"role": "user", "content": "hi"}],
        "stream": true,
        "tool_choice": "auto",
        "logit_bias": {"50256": -100}
    }));
    assert_eq!(request.messages.len(), 1);
}

#[test]
fn output_never_drops_turns() {
    let request = parse_request(json!({
        "messages": [
            {"role": "developer", "content": "rules"},
            {"role": "user", "content": "a"},
            {"role": "assistant", "content": "b"},
            {"role": "user"},
            {"role": "observer", "content": "c"}
        ]
    }));

    let plain = convert_messages(&request.messages, false);
    assert_eq!(plain.len(), request.messages.len());

    let forced = convert_messages(&request.messages, true);
    // developer maps to system, so no synthesized turn is needed
    assert_eq!(forced.len(), request.messages.len());
    assert!(forced[0].content.contains(TOOL_USE_INSTRUCTIONS));
}
