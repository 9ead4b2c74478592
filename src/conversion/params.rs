use crate::models::chat::GenerationParams;
use crate::models::workers::WorkersParams;

/// Workers AI accepts a narrower numeric range per parameter than callers
/// tend to send. Out-of-range values are clamped rather than rejected.
const TEMPERATURE_RANGE: (f64, f64) = (0.0, 5.0);
const TOP_P_RANGE: (f64, f64) = (0.001, 1.0);
const TOP_K_RANGE: (f64, f64) = (1.0, 50.0);
const FREQUENCY_PENALTY_RANGE: (f64, f64) = (-2.0, 2.0);
const PRESENCE_PENALTY_RANGE: (f64, f64) = (-2.0, 2.0);
const REPETITION_PENALTY_RANGE: (f64, f64) = (0.0, 2.0);
const SEED_RANGE: (u64, u64) = (1, 9_999_999_999);

fn clamp(value: f64, (min, max): (f64, f64)) -> f64 {
    value.clamp(min, max)
}

/// Map caller generation parameters into the Workers AI ranges.
///
/// Fields absent from the input are absent from the output; defaulting is the
/// Provider's responsibility. `max_tokens` has no upper bound, only a floor
/// of 1. `seed` is floored to an integer before clamping. `lora` and
/// `response_format` pass through unchanged and unvalidated.
pub fn convert_params(params: &GenerationParams) -> WorkersParams {
    WorkersParams {
        temperature: params.temperature.map(|v| clamp(v, TEMPERATURE_RANGE)),
        top_p: params.top_p.map(|v| clamp(v, TOP_P_RANGE)),
        top_k: params.top_k.map(|v| clamp(v, TOP_K_RANGE) as u32),
        max_tokens: params.max_tokens.map(|v| v.max(1)),
        frequency_penalty: params
            .frequency_penalty
            .map(|v| clamp(v, FREQUENCY_PENALTY_RANGE)),
        presence_penalty: params
            .presence_penalty
            .map(|v| clamp(v, PRESENCE_PENALTY_RANGE)),
        repetition_penalty: params
            .repetition_penalty
            .map(|v| clamp(v, REPETITION_PENALTY_RANGE)),
        seed: params
            .seed
            .map(|v| (v.floor().max(0.0) as u64).clamp(SEED_RANGE.0, SEED_RANGE.1)),
        lora: params.lora.clone(),
        response_format: params.response_format.clone(),
    }
}
